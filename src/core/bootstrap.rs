use crate::core::controller::{DirectoryController, UpdateOutcome};
use crate::domain::ports::{BackgroundWorker, MapWidget, Navigator, RestaurantSource};
use std::sync::Arc;

pub const WORKER_SCOPE: &str = "/sw.js";

/// Drives one page load: cache setup, worker registration, filter options,
/// then the map-ready callback.
pub struct DirectoryApp<S: RestaurantSource + 'static, M: MapWidget + 'static> {
    controller: Arc<DirectoryController<S, M>>,
    worker: Option<Arc<dyn BackgroundWorker>>,
}

impl<S, M> DirectoryApp<S, M>
where
    S: RestaurantSource + 'static,
    M: MapWidget + 'static,
{
    pub fn new(source: Arc<S>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            controller: Arc::new(DirectoryController::new(source, navigator)),
            worker: None,
        }
    }

    pub fn with_worker(mut self, worker: Arc<dyn BackgroundWorker>) -> Self {
        self.worker = Some(worker);
        self
    }

    pub fn controller(&self) -> &Arc<DirectoryController<S, M>> {
        &self.controller
    }

    /// Cache setup and worker registration; errors are logged only.
    pub async fn init(&self) {
        if let Err(e) = self.controller.source().init_cache().await {
            tracing::error!("Failed to initialize restaurant cache: {}", e);
        }
        self.register_worker().await;
    }

    pub async fn register_worker(&self) {
        let Some(worker) = &self.worker else {
            return;
        };
        if !worker.is_supported() {
            tracing::debug!("Background worker not supported; skipping registration");
            return;
        }
        if let Err(e) = worker.register(WORKER_SCOPE).await {
            tracing::error!("Background worker registration failed: {}", e);
        }
    }

    /// Fills both filter widgets. The two fetches run concurrently and
    /// complete in either order.
    pub async fn on_page_ready(&self) {
        tokio::join!(
            self.controller.fetch_neighborhoods(),
            self.controller.fetch_cuisines()
        );
    }

    pub async fn on_map_ready(&self) -> UpdateOutcome {
        self.controller.on_map_ready().await
    }

    /// Full page load in document order.
    pub async fn load(&self) -> UpdateOutcome {
        self.init().await;
        self.on_page_ready().await;
        self.on_map_ready().await
    }
}
