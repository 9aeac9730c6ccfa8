//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use quickshare_core::Config;
use quickshare_storage::LocalBlobStorage;
use quickshare_store::{CleanupService, ItemStore};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.is_production())
        .context("Failed to initialize telemetry")?;

    let item_ttl = config.item_ttl()?;
    let storage = LocalBlobStorage::new(&config.upload_dir)
        .await
        .context("Failed to set up upload directory")?;

    tracing::info!(
        environment = %config.environment,
        upload_dir = %storage.root().display(),
        item_ttl_hours = config.item_ttl_hours,
        "Configuration loaded and validated successfully"
    );

    let store = Arc::new(ItemStore::new(Arc::new(storage), item_ttl));

    start_cleanup(&config, store.clone());

    let state = Arc::new(AppState::new(store));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}

/// Spawn the periodic expiry sweep unless it is disabled.
fn start_cleanup(config: &Config, store: Arc<ItemStore>) {
    match config.cleanup_interval() {
        Some(interval) => {
            Arc::new(CleanupService::new(store, interval)).start();
        }
        None => {
            tracing::info!("Background cleanup disabled; expired items are reaped on read");
        }
    }
}
