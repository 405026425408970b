use crate::adapters::cache::RestaurantCache;
use crate::adapters::http::ApiClient;
use crate::domain::model::{ImageSet, MarkerHandle, MarkerSpec, Restaurant, ALL};
use crate::domain::ports::{ConfigProvider, MapWidget, RestaurantSource, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Data-access helper backed by the remote API, with the last good response
/// kept in a local cache for offline use.
pub struct DataHelper<S: Storage> {
    client: ApiClient,
    cache: RestaurantCache<S>,
    image_base: String,
}

impl<S: Storage> DataHelper<S> {
    pub fn new(client: ApiClient, cache: RestaurantCache<S>, image_base: impl Into<String>) -> Self {
        Self {
            client,
            cache,
            image_base: image_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C, storage: S) -> Result<Self> {
        let client = ApiClient::new(config.api_endpoint(), config.timeout_seconds())?;
        Ok(Self::new(
            client,
            RestaurantCache::new(storage),
            config.image_base(),
        ))
    }

    fn image_url(&self, photograph: &str, variant: &str) -> String {
        format!("{}/{}-{}.jpg", self.image_base, photograph, variant)
    }
}

/// Collects one field from every restaurant, keeping the first occurrence of
/// each value in order.
fn unique_values<F>(restaurants: &[Restaurant], field: F) -> Vec<String>
where
    F: Fn(&Restaurant) -> &str,
{
    let mut values: Vec<String> = Vec::new();
    for restaurant in restaurants {
        let value = field(restaurant);
        if !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
    }
    values
}

fn matches_filter(value: &str, filter: &str) -> bool {
    filter == ALL || value == filter
}

#[async_trait]
impl<S: Storage> RestaurantSource for DataHelper<S> {
    async fn init_cache(&self) -> Result<()> {
        self.cache.init().await
    }

    async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>> {
        match self.client.fetch_restaurants().await {
            Ok(restaurants) => {
                if let Err(e) = self.cache.store(&restaurants).await {
                    tracing::warn!("Failed to update restaurant cache: {}", e);
                }
                Ok(restaurants)
            }
            Err(e) if e.is_network() => match self.cache.load().await {
                Ok(Some(snapshot)) => {
                    tracing::warn!(
                        "API unavailable ({}), serving {} cached restaurants from {}s ago",
                        e,
                        snapshot.restaurants.len(),
                        snapshot.age().num_seconds()
                    );
                    Ok(snapshot.restaurants)
                }
                Ok(None) => Err(e),
                Err(cache_err) => {
                    tracing::warn!("Restaurant cache unreadable: {}", cache_err);
                    Err(e)
                }
            },
            Err(e) => Err(e),
        }
    }

    async fn fetch_neighborhoods(&self) -> Result<Vec<String>> {
        let restaurants = self.fetch_restaurants().await?;
        Ok(unique_values(&restaurants, |r| r.neighborhood.as_str()))
    }

    async fn fetch_cuisines(&self) -> Result<Vec<String>> {
        let restaurants = self.fetch_restaurants().await?;
        Ok(unique_values(&restaurants, |r| r.cuisine_type.as_str()))
    }

    async fn fetch_restaurants_by_cuisine_and_neighborhood(
        &self,
        cuisine: &str,
        neighborhood: &str,
    ) -> Result<Vec<Restaurant>> {
        let restaurants = self.fetch_restaurants().await?;
        Ok(restaurants
            .into_iter()
            .filter(|r| matches_filter(&r.cuisine_type, cuisine))
            .filter(|r| matches_filter(&r.neighborhood, neighborhood))
            .collect())
    }

    fn image_urls_for_restaurant(&self, restaurant: &Restaurant) -> ImageSet {
        let photograph = restaurant
            .photograph
            .clone()
            .unwrap_or_else(|| restaurant.id.to_string());
        ImageSet {
            small_1x: self.image_url(&photograph, "small_1x"),
            small_2x: self.image_url(&photograph, "small_2x"),
            large_1x: self.image_url(&photograph, "large_1x"),
            large_2x: self.image_url(&photograph, "large_2x"),
        }
    }

    fn url_for_restaurant(&self, restaurant: &Restaurant) -> String {
        format!("./restaurant.html?id={}", restaurant.id)
    }

    fn map_marker_for_restaurant(
        &self,
        restaurant: &Restaurant,
        map: &dyn MapWidget,
    ) -> MarkerHandle {
        map.place_marker(MarkerSpec {
            position: restaurant.latlng,
            title: restaurant.name.clone(),
            url: self.url_for_restaurant(restaurant),
            drop_animation: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::map::MemoryMap;
    use crate::adapters::storage::LocalStorage;
    use crate::domain::model::MapOptions;
    use crate::utils::error::DirectoryError;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    fn api_body() -> serde_json::Value {
        serde_json::json!([
            {"id": 1, "name": "Mission Chinese Food", "neighborhood": "Manhattan",
             "address": "171 E Broadway", "cuisine_type": "Asian", "photograph": "1",
             "latlng": {"lat": 40.713829, "lng": -73.989667}},
            {"id": 2, "name": "Emily", "neighborhood": "Brooklyn",
             "address": "919 Fulton St", "cuisine_type": "Pizza", "photograph": "2",
             "latlng": {"lat": 40.683555, "lng": -73.966393}},
            {"id": 3, "name": "Kang Ho Dong Baekjeong", "neighborhood": "Manhattan",
             "address": "1 E 32nd St", "cuisine_type": "Asian", "photograph": "3",
             "latlng": {"lat": 40.747143, "lng": -73.985414}},
            {"id": 10, "name": "Casa Enrique", "neighborhood": "Queens",
             "address": "5-48 49th Ave", "cuisine_type": "Mexican",
             "latlng": {"lat": 40.743394, "lng": -73.954235}}
        ])
    }

    fn helper(endpoint: String, dir: &TempDir) -> DataHelper<LocalStorage> {
        let client = ApiClient::new(endpoint, 5).unwrap();
        let cache = RestaurantCache::new(LocalStorage::new(dir.path().to_str().unwrap()));
        DataHelper::new(client, cache, "/img/")
    }

    #[tokio::test]
    async fn test_neighborhoods_and_cuisines_are_unique_in_order() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/restaurants");
            then.status(200).json_body(api_body());
        });
        let dir = TempDir::new().unwrap();
        let helper = helper(server.url("/restaurants"), &dir);

        assert_eq!(
            helper.fetch_neighborhoods().await.unwrap(),
            vec!["Manhattan", "Brooklyn", "Queens"]
        );
        assert_eq!(
            helper.fetch_cuisines().await.unwrap(),
            vec!["Asian", "Pizza", "Mexican"]
        );
    }

    #[tokio::test]
    async fn test_filter_by_cuisine_and_neighborhood() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/restaurants");
            then.status(200).json_body(api_body());
        });
        let dir = TempDir::new().unwrap();
        let helper = helper(server.url("/restaurants"), &dir);

        let asian_manhattan = helper
            .fetch_restaurants_by_cuisine_and_neighborhood("Asian", "Manhattan")
            .await
            .unwrap();
        let ids: Vec<u64> = asian_manhattan.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let all = helper
            .fetch_restaurants_by_cuisine_and_neighborhood(ALL, ALL)
            .await
            .unwrap();
        assert_eq!(all.len(), 4);

        let queens = helper
            .fetch_restaurants_by_cuisine_and_neighborhood(ALL, "Queens")
            .await
            .unwrap();
        assert_eq!(queens.len(), 1);

        let none = helper
            .fetch_restaurants_by_cuisine_and_neighborhood("Pizza", "Queens")
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_serves_cache_when_api_down() {
        let dir = TempDir::new().unwrap();

        let server = MockServer::start();
        let mut up = server.mock(|when, then| {
            when.method(GET).path("/restaurants");
            then.status(200).json_body(api_body());
        });
        let online = helper(server.url("/restaurants"), &dir);
        assert_eq!(online.fetch_restaurants().await.unwrap().len(), 4);
        up.delete();

        server.mock(|when, then| {
            when.method(GET).path("/restaurants");
            then.status(503);
        });
        let offline = helper(server.url("/restaurants"), &dir);
        let restaurants = offline.fetch_restaurants().await.unwrap();
        assert_eq!(restaurants.len(), 4);
    }

    #[tokio::test]
    async fn test_malformed_body_is_not_masked_by_cache() {
        let dir = TempDir::new().unwrap();

        let server = MockServer::start();
        let mut good = server.mock(|when, then| {
            when.method(GET).path("/restaurants");
            then.status(200).json_body(api_body());
        });
        let online = helper(server.url("/restaurants"), &dir);
        assert_eq!(online.fetch_restaurants().await.unwrap().len(), 4);
        good.delete();

        server.mock(|when, then| {
            when.method(GET).path("/restaurants");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"error": "schema changed"}));
        });
        let changed = helper(server.url("/restaurants"), &dir);
        let result = changed.fetch_restaurants().await;

        assert!(matches!(result, Err(DirectoryError::SerializationError(_))));
    }

    #[tokio::test]
    async fn test_error_without_cache() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/restaurants");
            then.status(503);
        });
        let dir = TempDir::new().unwrap();
        let helper = helper(server.url("/restaurants"), &dir);

        assert!(helper.fetch_cuisines().await.is_err());
    }

    #[test]
    fn test_presentation_rules() {
        let dir = TempDir::new().unwrap();
        let helper = helper("http://localhost:1337/restaurants".to_string(), &dir);
        let restaurant: Restaurant = serde_json::from_value(api_body()[0].clone()).unwrap();

        let images = helper.image_urls_for_restaurant(&restaurant);
        assert_eq!(images.small_1x, "/img/1-small_1x.jpg");
        assert_eq!(images.large_2x, "/img/1-large_2x.jpg");
        assert_eq!(helper.url_for_restaurant(&restaurant), "./restaurant.html?id=1");

        let map = MemoryMap::create("map", MapOptions::default());
        let marker = helper.map_marker_for_restaurant(&restaurant, &map);
        assert_eq!(marker.url, "./restaurant.html?id=1");

        let placed = map.attached_markers();
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].title, "Mission Chinese Food");
        assert_eq!(placed[0].position, restaurant.latlng);
        assert!(placed[0].drop_animation);
    }
}
