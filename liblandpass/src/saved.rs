//! The list of locations that have been saved on the server
use crate::{
    api::LocationApi,
    app::{Completion, Pending},
    error::Result,
    location::SavedLocation,
    page::Page,
    render::Templates,
};
use std::sync::Arc;
use tracing::{debug, error};

/// Fetches the saved locations and renders them into the page.
///
/// A failed fetch is only logged. The list on the page keeps whatever it showed before.
/// Refreshes are numbered, and a response that arrives after a newer one has been applied is
/// discarded.
#[derive(Debug, Default)]
pub struct SavedLocationsViewer {
    issued: u64,
    applied: u64,
}

impl SavedLocationsViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh<A: LocationApi + 'static>(&mut self, api: &Arc<A>) -> Pending {
        self.issued += 1;
        let refresh = self.issued;
        let api = Arc::clone(api);
        Box::pin(async move { Completion::LocationsLoaded(refresh, api.get_locations().await) })
    }

    pub fn finish<P: Page>(
        &mut self,
        refresh: u64,
        result: Result<Vec<SavedLocation>>,
        page: &mut P,
        templates: &Templates,
    ) {
        if refresh < self.applied {
            debug!(refresh, applied = self.applied, "discarding stale saved locations");
            return;
        }
        self.applied = refresh;
        match result.and_then(|locations| {
            debug!(refresh, count = locations.len(), "received saved locations");
            templates.saved_locations(&locations)
        }) {
            Ok(html) => page.set_saved_locations(html),
            Err(e) => error!(error = ?e, "failed to load saved locations"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Error,
        headless::HeadlessPage,
        render::Markup,
        location::Coordinate,
    };

    fn saved(name: &str) -> Vec<SavedLocation> {
        vec![SavedLocation {
            name: name.into(),
            latitude: Coordinate::Number(1.0),
            longitude: Coordinate::Number(2.0),
        }]
    }

    #[test]
    fn test_out_of_order_responses() {
        let templates = Templates::new(Markup::Html).expect("failed to load templates");
        let mut page = HeadlessPage::new();
        let mut viewer = SavedLocationsViewer::new();

        viewer.finish(2, Ok(saved("Newer")), &mut page, &templates);
        viewer.finish(1, Ok(saved("Older")), &mut page, &templates);
        assert_eq!(page.saved_locations(), "<li>Newer (1, 2)</li>");

        // a failed newer refresh keeps the list and still outranks older responses
        let failed = Err(Error::Server {
            status: 500,
            message: "boom".into(),
        });
        viewer.finish(4, failed, &mut page, &templates);
        viewer.finish(3, Ok(saved("Older")), &mut page, &templates);
        assert_eq!(page.saved_locations(), "<li>Newer (1, 2)</li>");

        viewer.finish(5, Ok(saved("Latest")), &mut page, &templates);
        assert_eq!(page.saved_locations(), "<li>Latest (1, 2)</li>");
    }
}
