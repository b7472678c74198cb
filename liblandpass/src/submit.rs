//! Sends the location in the form to the server and shows the answer
use crate::{
    api::{LocationApi, SubmitResponse},
    app::{Completion, Pending},
    error::Result,
    location::Location,
    page::{Field, Page},
    render::Templates,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};

/// Message shown for any failure to submit a location. The details only go to the log.
pub const SUBMIT_FAILED_MESSAGE: &str = "An error occurred while submitting the location.";

/// Optional settings that are sent along with every new location
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SubmitOptions {
    /// Hours of advance notice the server should give before an overpass
    pub notification_lead_time: Option<u32>,
    /// Highest acceptable cloud coverage, in percent
    pub cloud_coverage_threshold: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    InFlight,
}

/// Handles presses of the submit button.
///
/// Only one submission can be outstanding. The submit control is disabled until its response
/// arrives and presses in the meantime are ignored.
#[derive(Debug)]
pub struct SubmissionController {
    state: SubmitState,
    options: SubmitOptions,
}

impl SubmissionController {
    pub fn new(options: SubmitOptions) -> Self {
        Self {
            state: SubmitState::Idle,
            options,
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// Validate the form and start the request. Returns `None` when no request was made.
    pub fn press<P: Page, A: LocationApi + 'static>(
        &mut self,
        page: &mut P,
        api: &Arc<A>,
        templates: &Templates,
    ) -> Option<Pending> {
        if self.state == SubmitState::InFlight {
            debug!("ignoring submit while another submission is in flight");
            return None;
        }
        let location = match Location::from_form(
            page.value(Field::Latitude),
            page.value(Field::Longitude),
            page.value(Field::Name),
        ) {
            Ok(location) => location
                .with_notification_lead_time(self.options.notification_lead_time)
                .with_cloud_coverage_threshold(self.options.cloud_coverage_threshold),
            Err(e) => {
                show_message(page, templates, &e.to_string());
                return None;
            }
        };

        self.state = SubmitState::InFlight;
        page.set_submit_enabled(false);
        let api = Arc::clone(api);
        Some(Box::pin(async move {
            Completion::Submitted(api.submit_location(&location).await)
        }))
    }

    /// Show the outcome of a submission. Returns `true` if the saved locations should be
    /// refreshed.
    pub fn finish<P: Page>(
        &mut self,
        result: Result<SubmitResponse>,
        page: &mut P,
        templates: &Templates,
    ) -> bool {
        self.state = SubmitState::Idle;
        page.set_submit_enabled(true);
        match result.and_then(|response| templates.submit_result(&response)) {
            Ok(html) => {
                page.set_result(html);
                true
            }
            Err(e) => {
                error!(error = ?e, "failed to submit location");
                show_message(page, templates, SUBMIT_FAILED_MESSAGE);
                false
            }
        }
    }
}

fn show_message<P: Page>(page: &mut P, templates: &Templates, message: &str) {
    match templates.message(message) {
        Ok(html) => page.set_result(html),
        Err(e) => {
            error!(error = ?e, "failed to render message");
            page.set_result(message.to_string());
        }
    }
}
