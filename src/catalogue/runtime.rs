use std::sync::Arc;

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{Instant, sleep_until},
};

use crate::{
    catalogue::{
        controller::{CatalogueController, LoadTicket, RenderModel},
        debounce::Debouncer,
    },
    config::CatalogueConfig,
    error::CatalogueError,
    models::Product,
    source::{LoadFilter, ProductSource},
};

/// UI interactions accepted by a running catalogue.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogueEvent {
    Load,
    SearchInput(String),
    SubmitSearch,
    ClearSearch,
    SetCategory(String),
    SetPrice { min: Option<f64>, max: Option<f64> },
    SetPriceRange(String),
    SetStatus(String),
    SetSort(String),
    ResetFilters,
    GoToPage(usize),
    PreviousPage,
    NextPage,
}

/// Handle to a catalogue controller running on its own task.
///
/// Events are processed in order on that task; every visible change is
/// published as a new [`RenderModel`].
#[derive(Debug)]
pub struct CatalogueHandle {
    events: mpsc::UnboundedSender<CatalogueEvent>,
    renders: watch::Receiver<RenderModel>,
    task: JoinHandle<()>,
}

impl CatalogueHandle {
    pub fn spawn<S>(source: Arc<S>, config: CatalogueConfig) -> Self
    where
        S: ProductSource + 'static,
    {
        let controller = CatalogueController::new(config.page_size);
        let (renders_tx, renders) = watch::channel(controller.render());
        let (events, events_rx) = mpsc::unbounded_channel();

        let runtime = CatalogueRuntime {
            source,
            load_filter: LoadFilter {
                status: config.load_status,
            },
            published: controller.revision(),
            controller,
            search: Debouncer::new(config.search_debounce),
            search_text: String::new(),
            in_flight: None,
            renders: renders_tx,
        };
        let task = tokio::spawn(runtime.run(events_rx));

        Self {
            events,
            renders,
            task,
        }
    }

    pub fn send(&self, event: CatalogueEvent) -> Result<(), CatalogueError> {
        self.events.send(event).map_err(|_| CatalogueError::Closed)
    }

    pub fn load(&self) -> Result<(), CatalogueError> {
        self.send(CatalogueEvent::Load)
    }

    /// Retry trigger; starts a fresh load and drops any load in flight.
    pub fn reload(&self) -> Result<(), CatalogueError> {
        self.send(CatalogueEvent::Load)
    }

    pub fn set_search(&self, text: impl Into<String>) -> Result<(), CatalogueError> {
        self.send(CatalogueEvent::SearchInput(text.into()))
    }

    pub fn submit_search(&self) -> Result<(), CatalogueError> {
        self.send(CatalogueEvent::SubmitSearch)
    }

    pub fn clear_search(&self) -> Result<(), CatalogueError> {
        self.send(CatalogueEvent::ClearSearch)
    }

    pub fn set_category_filter(&self, value: impl Into<String>) -> Result<(), CatalogueError> {
        self.send(CatalogueEvent::SetCategory(value.into()))
    }

    pub fn set_price_filter(&self, min: Option<f64>, max: Option<f64>) -> Result<(), CatalogueError> {
        self.send(CatalogueEvent::SetPrice { min, max })
    }

    pub fn set_price_range(&self, value: impl Into<String>) -> Result<(), CatalogueError> {
        self.send(CatalogueEvent::SetPriceRange(value.into()))
    }

    pub fn set_status_filter(&self, value: impl Into<String>) -> Result<(), CatalogueError> {
        self.send(CatalogueEvent::SetStatus(value.into()))
    }

    pub fn set_sort(&self, key: impl Into<String>) -> Result<(), CatalogueError> {
        self.send(CatalogueEvent::SetSort(key.into()))
    }

    pub fn reset_filters(&self) -> Result<(), CatalogueError> {
        self.send(CatalogueEvent::ResetFilters)
    }

    pub fn go_to_page(&self, n: usize) -> Result<(), CatalogueError> {
        self.send(CatalogueEvent::GoToPage(n))
    }

    pub fn previous_page(&self) -> Result<(), CatalogueError> {
        self.send(CatalogueEvent::PreviousPage)
    }

    pub fn next_page(&self) -> Result<(), CatalogueError> {
        self.send(CatalogueEvent::NextPage)
    }

    pub fn subscribe(&self) -> watch::Receiver<RenderModel> {
        self.renders.clone()
    }

    pub fn current(&self) -> RenderModel {
        self.renders.borrow().clone()
    }

    /// Stops the event loop after it drains queued events.
    pub async fn shutdown(self) {
        drop(self.events);
        if let Err(err) = self.task.await {
            tracing::warn!(error = %err, "catalogue task ended abnormally");
        }
    }
}

struct LoadDone {
    ticket: LoadTicket,
    outcome: Result<Vec<Product>, CatalogueError>,
}

struct CatalogueRuntime<S> {
    source: Arc<S>,
    load_filter: LoadFilter,
    controller: CatalogueController,
    search: Debouncer<String>,
    search_text: String,
    in_flight: Option<JoinHandle<()>>,
    renders: watch::Sender<RenderModel>,
    published: u64,
}

impl<S> CatalogueRuntime<S>
where
    S: ProductSource + 'static,
{
    async fn run(mut self, mut events: mpsc::UnboundedReceiver<CatalogueEvent>) {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<LoadDone>();

        loop {
            let deadline = self.search.deadline();
            tokio::select! {
                Some(done) = done_rx.recv() => {
                    self.controller.complete_load(done.ticket, done.outcome);
                }
                event = events.recv() => match event {
                    Some(event) => self.handle(event, &done_tx),
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(text) = self.search.take_due(Instant::now()) {
                        self.controller.apply_search(&text);
                    }
                }
            }
            self.publish();
        }

        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
        tracing::debug!("catalogue runtime stopped");
    }

    fn handle(&mut self, event: CatalogueEvent, done_tx: &mpsc::UnboundedSender<LoadDone>) {
        match event {
            CatalogueEvent::Load => self.start_load(done_tx),
            CatalogueEvent::SearchInput(text) => {
                self.search_text = text.clone();
                self.search.push(text, Instant::now());
            }
            CatalogueEvent::SubmitSearch => {
                self.search.cancel();
                self.controller.apply_search(&self.search_text);
            }
            CatalogueEvent::ClearSearch => {
                self.search.cancel();
                self.search_text.clear();
                self.controller.clear_search();
            }
            CatalogueEvent::SetCategory(value) => self.controller.set_category_filter(&value),
            CatalogueEvent::SetPrice { min, max } => self.controller.set_price_filter(min, max),
            CatalogueEvent::SetPriceRange(value) => self.controller.set_price_range(&value),
            CatalogueEvent::SetStatus(value) => self.controller.set_status_filter(&value),
            CatalogueEvent::SetSort(value) => self.controller.set_sort(&value),
            CatalogueEvent::ResetFilters => {
                self.search.cancel();
                self.search_text.clear();
                self.controller.reset_filters();
            }
            CatalogueEvent::GoToPage(n) => {
                self.controller.go_to_page(n);
            }
            CatalogueEvent::PreviousPage => {
                self.controller.previous_page();
            }
            CatalogueEvent::NextPage => {
                self.controller.next_page();
            }
        }
    }

    fn start_load(&mut self, done_tx: &mpsc::UnboundedSender<LoadDone>) {
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }

        let ticket = self.controller.begin_load();
        let source = Arc::clone(&self.source);
        let filter = self.load_filter;
        let done_tx = done_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = source.load_products(filter).await;
            // The runtime may have stopped; nothing to deliver to then.
            let _ = done_tx.send(LoadDone { ticket, outcome });
        }));
    }

    fn publish(&mut self) {
        let revision = self.controller.revision();
        if revision == self.published {
            return;
        }
        self.published = revision;
        self.renders.send_replace(self.controller.render());
    }
}
