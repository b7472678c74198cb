//! Objects related to reporting errors from this library

/// Message shown when the form is submitted without a complete coordinate pair
pub const MISSING_COORDINATES_MESSAGE: &str = "Please enter both latitude and longitude.";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{}", MISSING_COORDINATES_MESSAGE)]
    MissingCoordinates,

    #[error("invalid server url '{}'", .0)]
    InvalidUrl(String),

    #[error("request failed")]
    Http(#[from] reqwest::Error),

    #[error("server responded with status {status}: {message}")]
    Server { status: u16, message: String },

    #[error("unable to parse response")]
    Parse(#[from] serde_json::Error),

    #[error("unable to render template")]
    Render(#[from] minijinja::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
