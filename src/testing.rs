//! In-memory data-access helper shared by unit tests.

use crate::domain::model::{ImageSet, LatLng, MarkerHandle, MarkerSpec, Restaurant, ALL};
use crate::domain::ports::{MapWidget, RestaurantSource};
use crate::utils::error::{DirectoryError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub(crate) fn restaurant(
    id: u64,
    name: &str,
    neighborhood: &str,
    cuisine: &str,
    with_photo: bool,
) -> Restaurant {
    Restaurant {
        id,
        name: name.to_string(),
        neighborhood: neighborhood.to_string(),
        address: format!("{} Test St, New York, NY", id),
        cuisine_type: cuisine.to_string(),
        photograph: with_photo.then(|| id.to_string()),
        caption: format!("Photo of {}", name),
        alt: "interior".to_string(),
        latlng: LatLng {
            lat: 40.7 + id as f64 / 1000.0,
            lng: -73.98,
        },
    }
}

/// Holds a restaurants request for one cuisine until released.
pub(crate) struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

pub(crate) struct FakeSource {
    restaurants: Vec<Restaurant>,
    failing: AtomicBool,
    calls: AtomicUsize,
    gate: Mutex<Option<(String, Arc<Gate>)>>,
}

impl FakeSource {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self {
            restaurants,
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            gate: Mutex::new(None),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn gate_cuisine(&self, cuisine: &str) -> Arc<Gate> {
        let gate = Arc::new(Gate {
            entered: Notify::new(),
            release: Notify::new(),
        });
        *self.gate.lock().unwrap() = Some((cuisine.to_string(), Arc::clone(&gate)));
        gate
    }

    fn check(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(DirectoryError::HttpStatusError {
                status: 503,
                url: "http://localhost:1337/restaurants".to_string(),
            });
        }
        Ok(())
    }

    fn unique(&self, field: fn(&Restaurant) -> &str) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();
        for r in &self.restaurants {
            if !values.iter().any(|v| v == field(r)) {
                values.push(field(r).to_string());
            }
        }
        values
    }
}

#[async_trait]
impl RestaurantSource for FakeSource {
    async fn init_cache(&self) -> Result<()> {
        Ok(())
    }

    async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>> {
        self.check()?;
        Ok(self.restaurants.clone())
    }

    async fn fetch_neighborhoods(&self) -> Result<Vec<String>> {
        self.check()?;
        Ok(self.unique(|r| r.neighborhood.as_str()))
    }

    async fn fetch_cuisines(&self) -> Result<Vec<String>> {
        self.check()?;
        Ok(self.unique(|r| r.cuisine_type.as_str()))
    }

    async fn fetch_restaurants_by_cuisine_and_neighborhood(
        &self,
        cuisine: &str,
        neighborhood: &str,
    ) -> Result<Vec<Restaurant>> {
        self.check()?;

        let gate = self
            .gate
            .lock()
            .unwrap()
            .as_ref()
            .filter(|(gated, _)| gated == cuisine)
            .map(|(_, gate)| Arc::clone(gate));
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        Ok(self
            .restaurants
            .iter()
            .filter(|r| cuisine == ALL || r.cuisine_type == cuisine)
            .filter(|r| neighborhood == ALL || r.neighborhood == neighborhood)
            .cloned()
            .collect())
    }

    fn image_urls_for_restaurant(&self, restaurant: &Restaurant) -> ImageSet {
        let id = restaurant.id;
        ImageSet {
            small_1x: format!("/img/{}-small_1x.jpg", id),
            small_2x: format!("/img/{}-small_2x.jpg", id),
            large_1x: format!("/img/{}-large_1x.jpg", id),
            large_2x: format!("/img/{}-large_2x.jpg", id),
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
