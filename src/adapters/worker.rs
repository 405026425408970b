use crate::domain::ports::{BackgroundWorker, RestaurantSource};
use crate::utils::error::{DirectoryError, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Keeps the offline cache warm by re-fetching restaurants on an interval.
/// Unsupported when no interval is configured.
pub struct CacheRefreshWorker<R: RestaurantSource + 'static> {
    source: Arc<R>,
    interval: Option<Duration>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<R: RestaurantSource + 'static> CacheRefreshWorker<R> {
    pub fn new(source: Arc<R>, interval_seconds: Option<u64>) -> Self {
        Self {
            source,
            interval: interval_seconds.map(Duration::from_secs),
            task: Mutex::new(None),
        }
    }

    pub fn is_registered(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    pub fn unregister(&self) {
        if let Some(task) = self.task.lock().unwrap_or_else(|e| e.into_inner()).take() {
            task.abort();
            tracing::debug!("Background refresh worker stopped");
        }
    }
}

#[async_trait]
impl<R: RestaurantSource + 'static> BackgroundWorker for CacheRefreshWorker<R> {
    fn is_supported(&self) -> bool {
        self.interval.is_some()
    }

    async fn register(&self, scope: &str) -> Result<()> {
        let period = self.interval.ok_or_else(|| DirectoryError::WorkerError {
            message: "no refresh interval configured".to_string(),
        })?;

        let mut task = self.task.lock().unwrap_or_else(|e| e.into_inner());
        if task.as_ref().is_some_and(|t| !t.is_finished()) {
            tracing::debug!("Background worker {} already registered", scope);
            return Ok(());
        }

        let source = Arc::clone(&self.source);
        *task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // the first tick completes immediately; the page load already fetched
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match source.fetch_restaurants().await {
                    Ok(restaurants) => {
                        tracing::debug!("Background refresh fetched {} restaurants", restaurants.len())
                    }
                    Err(e) => tracing::warn!("Background refresh failed: {}", e),
                }
            }
        }));

        tracing::info!(
            "Background worker registered at {} (every {}s)",
            scope,
            period.as_secs()
        );
        Ok(())
    }
}

impl<R: RestaurantSource + 'static> Drop for CacheRefreshWorker<R> {
    fn drop(&mut self) {
        self.unregister();
    }
}
