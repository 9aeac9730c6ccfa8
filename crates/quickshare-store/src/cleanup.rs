use crate::items::ItemStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

/// Periodically reaps expired items so their blobs do not wait for the next read.
#[derive(Clone)]
pub struct CleanupService {
    store: Arc<ItemStore>,
    interval: Duration,
}

impl CleanupService {
    pub fn new(store: Arc<ItemStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Start the background cleanup task.
    /// Returns a JoinHandle for graceful shutdown
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut cleanup_interval = interval(self.interval);
            cleanup_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            tracing::info!(
                interval_secs = self.interval.as_secs(),
                "Started expired item cleanup"
            );

            loop {
                cleanup_interval.tick().await;
                self.run_once().await;
            }
        })
    }

    /// Run a single sweep and return how many items were reaped.
    #[tracing::instrument(skip(self), fields(cleanup.operation = "expire_items"))]
    pub async fn run_once(&self) -> usize {
        let reaped = self.store.reap_expired().await;

        if reaped > 0 {
            tracing::info!(reaped, "Cleanup completed");
        } else {
            tracing::debug!("Cleanup found no expired items");
        }

        reaped
    }
}
