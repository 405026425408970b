use crate::domain::model::{
    FilterSelection, ImageSet, MapOptions, MarkerHandle, MarkerSpec, Restaurant,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn cache_dir(&self) -> &str;
    fn output_path(&self) -> &str;
    fn image_base(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn refresh_interval_seconds(&self) -> Option<u64>;
    fn initial_selection(&self) -> FilterSelection;
}

/// Data-access helper: all network and cache access to restaurant data.
#[async_trait]
pub trait RestaurantSource: Send + Sync {
    async fn init_cache(&self) -> Result<()>;
    async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>>;
    async fn fetch_neighborhoods(&self) -> Result<Vec<String>>;
    async fn fetch_cuisines(&self) -> Result<Vec<String>>;
    async fn fetch_restaurants_by_cuisine_and_neighborhood(
        &self,
        cuisine: &str,
        neighborhood: &str,
    ) -> Result<Vec<Restaurant>>;

    fn image_urls_for_restaurant(&self, restaurant: &Restaurant) -> ImageSet;
    fn url_for_restaurant(&self, restaurant: &Restaurant) -> String;
    fn map_marker_for_restaurant(&self, restaurant: &Restaurant, map: &dyn MapWidget)
        -> MarkerHandle;
}

pub type ClickListener = Box<dyn Fn() + Send + Sync>;

pub trait MapWidget: Send + Sync {
    fn create(element_id: &str, options: MapOptions) -> Self
    where
        Self: Sized;

    fn place_marker(&self, spec: MarkerSpec) -> MarkerHandle;
    /// Removes the marker from the map. Unknown handles are ignored.
    fn detach_marker(&self, marker: &MarkerHandle);
    fn add_click_listener(&self, marker: &MarkerHandle, listener: ClickListener);
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

#[async_trait]
pub trait BackgroundWorker: Send + Sync {
    fn is_supported(&self) -> bool;
    async fn register(&self, scope: &str) -> Result<()>;
}
