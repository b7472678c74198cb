//! In-process map and page widgets that keep their state in memory.
//!
//! They back the command-line front-end and are convenient stand-ins for a browser in tests.
use crate::{
    app::{Dispatcher, UiEvent},
    map::{LatLng, MapSurface, MarkerId, TileLayer},
    page::{Field, Page},
};
use std::{collections::BTreeMap, fmt};
use tracing::warn;

#[derive(Debug, Default)]
pub struct HeadlessMap {
    view: Option<(LatLng, u8)>,
    tile_layers: Vec<TileLayer>,
    markers: BTreeMap<MarkerId, LatLng>,
    next_marker: u64,
    clicks: Option<Dispatcher>,
}

impl HeadlessMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Center and zoom level, if the view has been set
    pub fn view(&self) -> Option<(LatLng, u8)> {
        self.view
    }

    pub fn tile_layers(&self) -> &[TileLayer] {
        &self.tile_layers
    }

    pub fn markers(&self) -> &BTreeMap<MarkerId, LatLng> {
        &self.markers
    }

    /// Simulate a click on the map
    pub fn click(&self, at: LatLng) {
        match self.clicks {
            Some(ref events) => events.send(UiEvent::MapClick(at)),
            None => warn!(?at, "map clicked without a subscriber"),
        }
    }
}

impl MapSurface for HeadlessMap {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.view = Some((center, zoom));
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) {
        self.tile_layers.push(layer.clone());
    }

    fn add_marker(&mut self, at: LatLng) -> MarkerId {
        let id = MarkerId(self.next_marker);
        self.next_marker += 1;
        self.markers.insert(id, at);
        id
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.markers.remove(&marker);
    }

    fn subscribe_clicks(&mut self, events: Dispatcher) {
        self.clicks = Some(events);
    }
}

#[derive(Debug)]
pub struct HeadlessPage {
    latitude: String,
    longitude: String,
    name: String,
    result: String,
    saved_locations: String,
    submit_enabled: bool,
}

impl Default for HeadlessPage {
    fn default() -> Self {
        Self {
            latitude: String::new(),
            longitude: String::new(),
            name: String::new(),
            result: String::new(),
            saved_locations: String::new(),
            submit_enabled: true,
        }
    }
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn saved_locations(&self) -> &str {
        &self.saved_locations
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    fn field(&mut self, field: Field) -> &mut String {
        match field {
            Field::Latitude => &mut self.latitude,
            Field::Longitude => &mut self.longitude,
            Field::Name => &mut self.name,
        }
    }
}

impl Page for HeadlessPage {
    fn value(&self, field: Field) -> String {
        match field {
            Field::Latitude => self.latitude.clone(),
            Field::Longitude => self.longitude.clone(),
            Field::Name => self.name.clone(),
        }
    }

    fn set_value(&mut self, field: Field, value: String) {
        *self.field(field) = value;
    }

    fn set_result(&mut self, html: String) {
        self.result = html;
    }

    fn set_saved_locations(&mut self, html: String) {
        self.saved_locations = html;
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }
}

impl fmt::Display for HeadlessPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "latitude:  {}", self.latitude)?;
        writeln!(f, "longitude: {}", self.longitude)?;
        writeln!(f, "name:      {}", self.name)?;
        writeln!(f, "result:    {}", self.result)?;
        writeln!(f, "saved:")?;
        write!(f, "{}", self.saved_locations)
    }
}
