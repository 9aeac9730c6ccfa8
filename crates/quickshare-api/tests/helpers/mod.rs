//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p quickshare-api`.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use chrono::Duration;
use quickshare_api::constants;
use quickshare_api::setup::routes;
use quickshare_api::state::AppState;
use quickshare_core::Config;
use quickshare_storage::LocalBlobStorage;
use quickshare_store::ItemStore;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// API path prefix for tests (e.g. `/api`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server, store, and owned upload directory.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<ItemStore>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn upload_dir(&self) -> &Path {
        self._temp_dir.path()
    }

    /// Number of blob files currently on disk.
    pub fn blob_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir())
            .expect("Failed to read upload directory")
            .count()
    }
}

/// Setup test app with default configuration and an isolated upload directory.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(Config::default(), Duration::hours(24)).await
}

/// Setup test app with a custom configuration and item lifetime.
///
/// The lifetime bypasses config validation so tests can use a zero TTL.
pub async fn setup_test_app_with(mut config: Config, ttl: Duration) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    config.upload_dir = temp_dir.path().to_path_buf();

    let storage = LocalBlobStorage::new(temp_dir.path())
        .await
        .expect("Failed to create local storage");
    let store = Arc::new(ItemStore::new(Arc::new(storage), ttl));

    let state = Arc::new(AppState::new(store.clone()));
    let router = routes::setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        store,
        _temp_dir: temp_dir,
    }
}
