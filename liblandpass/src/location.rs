//! Locations as they are entered on the page and as they come back from the server
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A location read from the form, ready to be sent to the server.
///
/// The coordinates are kept as the raw text of the form fields. Range and format checks are
/// left to the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub latitude: String,
    pub longitude: String,
    pub name: String,
    /// How many hours before an overpass the server should send a notification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_lead_time: Option<u32>,
    /// Maximum cloud coverage (percent) for a scene to be reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_coverage_threshold: Option<f64>,
}

impl Location {
    /// Build a location from the current form values.
    ///
    /// Both coordinates must be non-empty. An empty name is replaced by
    /// `Location at {latitude}, {longitude}` using the unparsed field text.
    pub fn from_form(latitude: String, longitude: String, name: String) -> Result<Self> {
        if latitude.is_empty() || longitude.is_empty() {
            return Err(Error::MissingCoordinates);
        }
        let name = match name.is_empty() {
            true => default_name(&latitude, &longitude),
            false => name,
        };
        Ok(Self {
            latitude,
            longitude,
            name,
            notification_lead_time: None,
            cloud_coverage_threshold: None,
        })
    }

    pub fn with_notification_lead_time(mut self, hours: Option<u32>) -> Self {
        self.notification_lead_time = hours;
        self
    }

    pub fn with_cloud_coverage_threshold(mut self, percent: Option<f64>) -> Self {
        self.cloud_coverage_threshold = percent;
        self
    }
}

pub fn default_name(latitude: &str, longitude: &str) -> String {
    format!("Location at {latitude}, {longitude}")
}

/// A coordinate as reported by the server, which may send either a number or a string
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Number(n) => write!(f, "{n}"),
            Coordinate::Text(s) => f.write_str(s),
        }
    }
}

/// A location that the server has stored
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SavedLocation {
    pub name: String,
    pub latitude: Coordinate,
    pub longitude: Coordinate,
}

impl fmt::Display for SavedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.latitude, self.longitude)
    }
}
