use crate::core::page::MAP_ELEMENT_ID;
use crate::domain::model::{LatLng, MapOptions};
use crate::domain::ports::MapWidget;

pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 40.722216,
    lng: -73.987501,
};
pub const DEFAULT_ZOOM: u8 = 12;

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            center: DEFAULT_CENTER,
            scrollwheel: false,
        }
    }
}

/// Constructs the map widget on the `map` element at the fixed default view.
pub fn init_map<M: MapWidget>() -> M {
    let options = MapOptions::default();
    tracing::debug!(
        "Initializing map at ({}, {}) zoom {}",
        options.center.lat,
        options.center.lng,
        options.zoom
    );
    M::create(MAP_ELEMENT_ID, options)
}
