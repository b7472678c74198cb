//! The form and output areas of the page

/// Editable text fields on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Latitude,
    Longitude,
    Name,
}

/// The part of the page that the components read from and render into.
///
/// `set_result` and `set_saved_locations` receive HTML fragments that have already been
/// escaped by [crate::render::Templates].
pub trait Page {
    fn value(&self, field: Field) -> String;

    fn set_value(&mut self, field: Field, value: String);

    /// Replace the content of the submission result area
    fn set_result(&mut self, html: String);

    /// Replace the items of the saved locations list
    fn set_saved_locations(&mut self, html: String);

    fn set_submit_enabled(&mut self, enabled: bool);
}
