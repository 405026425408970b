use serde::{Deserialize, Serialize};

/// Value of the default select option; disables filtering on that dimension.
pub const ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A restaurant as returned by the remote API. Fields the directory page does
/// not use (operating hours, reviews) are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: u64,
    pub name: String,
    pub neighborhood: String,
    pub address: String,
    pub cuisine_type: String,
    #[serde(default)]
    pub photograph: Option<String>,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub alt: String,
    pub latlng: LatLng,
}

/// Responsive image URLs for one restaurant photograph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSet {
    pub small_1x: String,
    pub small_2x: String,
    pub large_1x: String,
    pub large_2x: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: LatLng,
    pub title: String,
    pub url: String,
    pub drop_animation: bool,
}

/// Handle to a marker owned by a map widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarkerHandle {
    pub id: u64,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapOptions {
    pub zoom: u8,
    pub center: LatLng,
    pub scrollwheel: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub cuisine: String,
    pub neighborhood: String,
}

impl FilterSelection {
    pub fn new(cuisine: impl Into<String>, neighborhood: impl Into<String>) -> Self {
        Self {
            cuisine: cuisine.into(),
            neighborhood: neighborhood.into(),
        }
    }
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::new(ALL, ALL)
    }
}
