use crate::domain::model::{MapOptions, MarkerHandle, MarkerSpec};
use crate::domain::ports::{ClickListener, MapWidget, Navigator};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

struct PlacedMarker {
    spec: MarkerSpec,
    listeners: Vec<ClickListener>,
}

/// Map widget kept entirely in memory. Detached markers are dropped together
/// with their listeners.
pub struct MemoryMap {
    element_id: String,
    options: MapOptions,
    markers: Mutex<BTreeMap<u64, PlacedMarker>>,
    next_id: AtomicU64,
}

impl MemoryMap {
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    fn markers(&self) -> MutexGuard<'_, BTreeMap<u64, PlacedMarker>> {
        self.markers.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn marker_count(&self) -> usize {
        self.markers().len()
    }

    /// Markers currently on the map, in placement order.
    pub fn attached_markers(&self) -> Vec<MarkerSpec> {
        self.markers().values().map(|m| m.spec.clone()).collect()
    }

    /// Simulates a user click. Returns false when the marker is not on the map.
    pub fn click(&self, marker: &MarkerHandle) -> bool {
        let markers = self.markers();
        match markers.get(&marker.id) {
            Some(placed) => {
                for listener in &placed.listeners {
                    listener();
                }
                true
            }
            None => false,
        }
    }
}

impl MapWidget for MemoryMap {
    fn create(element_id: &str, options: MapOptions) -> Self {
        Self {
            element_id: element_id.to_string(),
            options,
            markers: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn place_marker(&self, spec: MarkerSpec) -> MarkerHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let handle = MarkerHandle {
            id,
            url: spec.url.clone(),
        };
        tracing::trace!("Placing marker {} for {}", id, spec.title);
        self.markers().insert(
            id,
            PlacedMarker {
                spec,
                listeners: Vec::new(),
            },
        );
        handle
    }

    fn detach_marker(&self, marker: &MarkerHandle) {
        self.markers().remove(&marker.id);
    }

    fn add_click_listener(&self, marker: &MarkerHandle, listener: ClickListener) {
        if let Some(placed) = self.markers().get_mut(&marker.id) {
            placed.listeners.push(listener);
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryNavigator {
    location: Mutex<Option<String>>,
}

impl MemoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<String> {
        self.location
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Navigator for MemoryNavigator {
    fn navigate(&self, url: &str) {
        tracing::info!("Navigating to {}", url);
        *self.location.lock().unwrap_or_else(|e| e.into_inner()) = Some(url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::LatLng;
    use std::sync::Arc;

    fn spec(url: &str) -> MarkerSpec {
        MarkerSpec {
            position: LatLng { lat: 40.7, lng: -73.9 },
            title: "Roberta's Pizza".to_string(),
            url: url.to_string(),
            drop_animation: true,
        }
    }

    #[test]
    fn test_place_and_detach() {
        let map = MemoryMap::create("map", MapOptions::default());
        let first = map.place_marker(spec("./restaurant.html?id=1"));
        let second = map.place_marker(spec("./restaurant.html?id=2"));
        assert_ne!(first.id, second.id);
        assert_eq!(map.marker_count(), 2);

        map.detach_marker(&first);
        assert_eq!(map.marker_count(), 1);
        assert!(!map.click(&first));

        // detaching twice is harmless
        map.detach_marker(&first);
        assert_eq!(map.marker_count(), 1);
    }

    #[test]
    fn test_click_runs_listeners() {
        let map = MemoryMap::create("map", MapOptions::default());
        let navigator = Arc::new(MemoryNavigator::new());
        let marker = map.place_marker(spec("./restaurant.html?id=5"));

        let nav = Arc::clone(&navigator);
        let url = marker.url.clone();
        map.add_click_listener(&marker, Box::new(move || nav.navigate(&url)));

        assert!(map.click(&marker));
        assert_eq!(navigator.current().as_deref(), Some("./restaurant.html?id=5"));
    }
}
