//! The interactive map that coordinates are picked from
use crate::app::Dispatcher;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_ATTRIBUTION: &str = "© OpenStreetMap contributors";
pub const DEFAULT_ZOOM: u8 = 2;

/// A point on the map in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A base layer of map imagery
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TileLayer {
    pub url: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
        }
    }
}

/// Handle to a marker that has been placed on a [MapSurface]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(pub u64);

/// An interactive map widget.
///
/// Implementations forward every click on the map to the [Dispatcher] passed to
/// [MapSurface::subscribe_clicks] as a [crate::app::UiEvent::MapClick].
pub trait MapSurface {
    fn set_view(&mut self, center: LatLng, zoom: u8);

    fn add_tile_layer(&mut self, layer: &TileLayer);

    fn add_marker(&mut self, at: LatLng) -> MarkerId;

    fn remove_marker(&mut self, marker: MarkerId);

    fn subscribe_clicks(&mut self, events: Dispatcher);
}

fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}

/// Initial state of the map
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MapConfig {
    #[serde(default)]
    pub center: LatLng,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default)]
    pub tiles: TileLayer,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: LatLng::default(),
            zoom: DEFAULT_ZOOM,
            tiles: TileLayer::default(),
        }
    }
}

impl MapConfig {
    /// Center the map and add the base tile layer
    pub fn apply<M: MapSurface>(&self, map: &mut M) {
        map.set_view(self.center, self.zoom);
        map.add_tile_layer(&self.tiles);
    }
}
