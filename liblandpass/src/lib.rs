//! This is a library that provides the pieces of a map-driven location picker: choose a
//! coordinate on a map, submit it as a named location to a backend, and show the upcoming
//! satellite overpasses together with the locations that have been saved so far.
//!
//! The map widget and the page are abstracted behind the [map::MapSurface] and [page::Page]
//! traits so that [app::App] can be driven by a real front-end, by the [headless] widgets, or
//! by test doubles.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod headless;
pub mod location;
pub mod map;
pub mod page;
pub mod picker;
pub mod render;
pub mod saved;
pub mod submit;

pub use error::Error;
pub use error::Result;
