use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    catalogue::{
        filter::{FilterState, parse_price_range, sanitize_bound},
        paginate::{PageButton, PageState, page_window, paginate},
        run_pipeline,
        sort::SortKey,
    },
    error::CatalogueError,
    format::results_label,
    models::Product,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// What the catalogue page should currently show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Idle,
    Loading,
    Results,
    NoResults,
    Error,
}

/// Identifies one load attempt; only the most recent ticket is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Read-only snapshot handed to the rendering side after each update.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RenderModel {
    pub items: Vec<Product>,
    pub total_count: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub is_loading: bool,
    pub is_error: bool,
    pub error_message: Option<String>,
    pub view: View,
    pub page_buttons: Vec<PageButton>,
    pub has_previous: bool,
    pub has_next: bool,
    pub results_label: String,
    pub filters: FilterState,
    pub revision: u64,
}

/// Catalogue state machine. Owns the filter and page state for one view
/// over an immutable product snapshot.
#[derive(Debug)]
pub struct CatalogueController {
    phase: Phase,
    snapshot: Arc<[Product]>,
    results: Vec<Product>,
    filters: FilterState,
    page: PageState,
    load_seq: u64,
    revision: u64,
}

impl CatalogueController {
    pub fn new(page_size: usize) -> Self {
        Self {
            phase: Phase::Idle,
            snapshot: Arc::from(Vec::new()),
            results: Vec::new(),
            filters: FilterState::default(),
            page: PageState::new(page_size),
            load_seq: 0,
            revision: 0,
        }
    }

    /// A controller already `Ready` over `snapshot` with `filters` applied.
    pub fn from_snapshot(snapshot: Arc<[Product]>, filters: FilterState, page_size: usize) -> Self {
        let mut controller = Self::new(page_size);
        controller.snapshot = snapshot;
        controller.filters = filters;
        controller.phase = Phase::Ready;
        controller.recompute();
        controller
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn view(&self) -> View {
        match self.phase {
            Phase::Idle => View::Idle,
            Phase::Loading => View::Loading,
            Phase::Error(_) => View::Error,
            Phase::Ready if self.results.is_empty() => View::NoResults,
            Phase::Ready => View::Results,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Filtered and sorted products across all pages.
    pub fn results(&self) -> &[Product] {
        &self.results
    }

    pub fn current_items(&self) -> &[Product] {
        if self.phase != Phase::Ready {
            return &[];
        }
        paginate(&self.results, self.page.current_page, self.page.page_size)
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_seq += 1;
        self.phase = Phase::Loading;
        self.page.current_page = 1;
        self.bump();
        tracing::debug!(load = self.load_seq, "catalogue load started");
        LoadTicket(self.load_seq)
    }

    /// Applies a load outcome. Returns `false` when the ticket was superseded
    /// by a newer load and the outcome was dropped.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<Vec<Product>, CatalogueError>,
    ) -> bool {
        if ticket.0 != self.load_seq || self.phase != Phase::Loading {
            tracing::debug!(load = ticket.0, latest = self.load_seq, "ignoring stale catalogue load");
            return false;
        }

        match outcome {
            Ok(products) => {
                tracing::info!(count = products.len(), "catalogue products loaded");
                self.snapshot = Arc::from(products);
                self.phase = Phase::Ready;
                self.recompute();
            }
            Err(err) => {
                tracing::warn!(error = %err, "catalogue load failed");
                self.results.clear();
                self.page.total_items = 0;
                self.page.current_page = 1;
                self.phase = Phase::Error(err.to_string());
                self.bump();
            }
        }
        true
    }

    pub fn apply_search(&mut self, text: &str) {
        self.filters.search = text.trim().to_string();
        self.refresh();
    }

    pub fn clear_search(&mut self) {
        self.apply_search("");
    }

    pub fn set_category_filter(&mut self, value: &str) {
        self.filters.category = value.trim().to_string();
        self.refresh();
    }

    pub fn set_status_filter(&mut self, value: &str) {
        self.filters.status = value.trim().to_string();
        self.refresh();
    }

    pub fn set_price_filter(&mut self, min: Option<f64>, max: Option<f64>) {
        let (clean_min, clean_max) = (sanitize_bound(min), sanitize_bound(max));
        if clean_min != min || clean_max != max {
            tracing::warn!(?min, ?max, "ignoring invalid price bound");
        }
        self.filters.price_min = clean_min;
        self.filters.price_max = clean_max;
        self.refresh();
    }

    /// Applies a price select value such as `"500-1000"` or `"5000+"`.
    pub fn set_price_range(&mut self, value: &str) {
        match parse_price_range(value) {
            Ok(range) => {
                self.filters.price_min = range.min;
                self.filters.price_max = range.max;
                self.refresh();
            }
            Err(err) => tracing::warn!(error = %err, "price filter unchanged"),
        }
    }

    pub fn set_sort(&mut self, value: &str) {
        let key = SortKey::parse(value);
        if key.is_none() {
            tracing::warn!(sort = value, "unknown sort key, keeping loaded order");
        }
        self.set_sort_key(key);
    }

    pub fn set_sort_key(&mut self, key: Option<SortKey>) {
        self.filters.sort = key;
        self.refresh();
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterState::default();
        self.refresh();
    }

    /// Moves to page `n`. Returns `false` for out-of-range or current pages.
    pub fn go_to_page(&mut self, n: usize) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        let total_pages = self.page.total_pages();
        if n < 1 || n > total_pages || n == self.page.current_page {
            return false;
        }
        self.page.current_page = n;
        self.bump();
        true
    }

    pub fn previous_page(&mut self) -> bool {
        match self.page.current_page.checked_sub(1) {
            Some(n) => self.go_to_page(n),
            None => false,
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page.current_page + 1)
    }

    pub fn render(&self) -> RenderModel {
        let is_ready = self.phase == Phase::Ready;
        let total_pages = if is_ready { self.page.total_pages() } else { 0 };
        let total_count = if is_ready { self.page.total_items } else { 0 };
        let error_message = match &self.phase {
            Phase::Error(message) => Some(message.clone()),
            _ => None,
        };

        RenderModel {
            items: self.current_items().to_vec(),
            total_count,
            current_page: self.page.current_page,
            total_pages,
            page_size: self.page.page_size,
            is_loading: self.phase == Phase::Loading,
            is_error: error_message.is_some(),
            error_message,
            view: self.view(),
            page_buttons: page_window(self.page.current_page, total_pages),
            has_previous: is_ready && self.page.has_previous(),
            has_next: is_ready && self.page.has_next(),
            results_label: results_label(total_count),
            filters: self.filters.clone(),
            revision: self.revision,
        }
    }

    fn refresh(&mut self) {
        if self.phase == Phase::Ready {
            self.recompute();
        } else {
            self.bump();
        }
    }

    fn recompute(&mut self) {
        self.results = run_pipeline(&self.snapshot, &self.filters);
        self.page.total_items = self.results.len();
        self.page.current_page = 1;
        self.bump();
        tracing::debug!(
            total = self.page.total_items,
            search = %self.filters.search,
            "catalogue results recomputed"
        );
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}
