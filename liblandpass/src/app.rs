//! Dispatches page events to the components.
//!
//! Everything runs on a single task. Each event is handled to completion before the next one
//! is looked at. Network requests do not block event handling: they are kept as pending futures
//! and their results are applied as [Completion]s on the same task once they arrive.
use crate::{
    api::{LocationApi, SubmitResponse},
    config::ClientConfig,
    error::Result,
    location::SavedLocation,
    map::{LatLng, MapSurface},
    page::{Field, Page},
    picker::CoordinatePicker,
    render::Templates,
    saved::SavedLocationsViewer,
    submit::{SubmissionController, SubmitState},
};
use futures::{StreamExt, future::BoxFuture, stream::FuturesUnordered};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

/// Something the user or the browser did
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The page finished loading
    Loaded,
    MapClick(LatLng),
    /// The user typed into one of the form fields
    Edit(Field, String),
    SubmitPressed,
    /// The page is going away
    Unload,
}

/// The result of a network request started by one of the components
#[derive(Debug)]
pub enum Completion {
    Submitted(Result<SubmitResponse>),
    /// Response to the saved locations request with the given refresh number
    LocationsLoaded(u64, Result<Vec<SavedLocation>>),
}

pub type Pending = BoxFuture<'static, Completion>;

/// Sending half of the event queue of an [App]
#[derive(Debug, Clone)]
pub struct Dispatcher(mpsc::UnboundedSender<UiEvent>);

impl Dispatcher {
    pub fn send(&self, event: UiEvent) {
        if let Err(e) = self.0.send(event) {
            warn!(event = ?e.0, "event dispatched after the page was closed");
        }
    }
}

pub struct App<M, P, A> {
    map: M,
    page: P,
    api: Arc<A>,
    templates: Templates,
    picker: CoordinatePicker,
    submitter: SubmissionController,
    viewer: SavedLocationsViewer,
    pending: FuturesUnordered<Pending>,
    dispatcher: Dispatcher,
    events: mpsc::UnboundedReceiver<UiEvent>,
}

impl<M, P, A> App<M, P, A>
where
    M: MapSurface,
    P: Page,
    A: LocationApi + 'static,
{
    /// Set up the map and wire its clicks into the event queue
    pub fn new(mut map: M, page: P, api: A, config: &ClientConfig) -> Result<Self> {
        config.map.apply(&mut map);
        let (tx, events) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher(tx);
        map.subscribe_clicks(dispatcher.clone());
        Ok(Self {
            map,
            page,
            api: Arc::new(api),
            templates: Templates::new(config.markup)?,
            picker: CoordinatePicker::new(),
            submitter: SubmissionController::new(config.submit.clone()),
            viewer: SavedLocationsViewer::new(),
            pending: FuturesUnordered::new(),
            dispatcher,
            events,
        })
    }

    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submitter.state()
    }

    /// Number of requests that have been started but whose results have not been applied yet
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn handle(&mut self, event: UiEvent) {
        trace!(?event, "handling event");
        match event {
            UiEvent::Loaded => self.refresh_saved_locations(),
            UiEvent::MapClick(at) => self.picker.pick(at, &mut self.map, &mut self.page),
            UiEvent::Edit(field, value) => self.page.set_value(field, value),
            UiEvent::SubmitPressed => {
                if let Some(request) =
                    self.submitter
                        .press(&mut self.page, &self.api, &self.templates)
                {
                    self.pending.push(request);
                }
            }
            UiEvent::Unload => debug!("page unloaded"),
        }
    }

    fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::Submitted(result) => {
                if self
                    .submitter
                    .finish(result, &mut self.page, &self.templates)
                {
                    self.refresh_saved_locations();
                }
            }
            Completion::LocationsLoaded(refresh, result) => {
                self.viewer
                    .finish(refresh, result, &mut self.page, &self.templates)
            }
        }
    }

    fn refresh_saved_locations(&mut self) {
        let request = self.viewer.refresh(&self.api);
        self.pending.push(request);
    }

    /// Wait for all outstanding requests, including any that are started by their results
    pub async fn settle(&mut self) {
        while let Some(completion) = self.pending.next().await {
            self.complete(completion);
        }
    }

    /// Process events from the queue until [UiEvent::Unload] is received. Requests that are
    /// still outstanding at that point are waited for before returning.
    pub async fn run(mut self) -> Self {
        loop {
            tokio::select! {
                event = self.events.recv() => match event {
                    Some(UiEvent::Unload) | None => break,
                    Some(event) => self.handle(event),
                },
                Some(completion) = self.pending.next(), if !self.pending.is_empty() => {
                    self.complete(completion)
                }
            }
        }
        debug!(pending = self.pending.len(), "event loop stopped");
        self.settle().await;
        self
    }
}
