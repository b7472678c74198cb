//! Settings for the page components
use crate::{map::MapConfig, render::Markup, submit::SubmitOptions};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientConfig {
    pub map: MapConfig,
    pub submit: SubmitOptions,
    /// Format of the fragments put into the result area and the saved locations list
    pub markup: Markup,
}
