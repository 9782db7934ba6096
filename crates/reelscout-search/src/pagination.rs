//! Result list state: page tracking, merge rules, and stale-reply fencing.

use reelscout_api::tmdb::TmdbError;

use crate::dispatcher::{SearchDispatcher, SearchRequest, SearchResponse};
use crate::error::SearchError;
use crate::item::{DisplayItem, SearchTarget};

/// Rows from the end of the list at which the next page is requested.
pub const DEFAULT_LOAD_MORE_THRESHOLD: usize = 6;

/// What a fetch is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchAction {
    /// Reload from page 1.
    Refresh,
    /// Append the next page.
    LoadMore,
}

/// Page counters of a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    /// Last page merged into the list.
    pub current_page: u32,
    /// Total pages reported by the server, at least 1.
    pub total_pages: u32,
    /// Total results reported by the server.
    pub total_results: u32,
    /// A fetch is in flight.
    pub is_loading: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_results: 0,
            is_loading: false,
        }
    }
}

impl PaginationState {
    /// Returns true while pages remain after the current one.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// How movie results are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutType {
    /// One row per movie.
    #[default]
    List,
    /// Poster cards.
    Card,
}

impl LayoutType {
    /// The other layout.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::List => Self::Card,
            Self::Card => Self::List,
        }
    }
}

/// Everything a result screen renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSnapshot {
    /// Screen title.
    pub title: String,
    /// Merged rows.
    pub items: Vec<DisplayItem>,
    /// Page counters.
    pub pagination: PaginationState,
    /// Error to show, if any.
    pub error: Option<SearchError>,
    /// Current layout.
    pub layout: LayoutType,
    /// The layout toggle is enabled.
    pub can_switch_layout: bool,
}

/// A fetch the controller has committed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    /// Sequence number the reply must carry.
    pub seq: u64,
    /// Page requested.
    pub page: u32,
    /// Request to send.
    pub request: SearchRequest,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    seq: u64,
    page: u32,
}

/// Result list state machine.
///
/// [`begin`](Self::begin) commits to a fetch and returns the request to send;
/// [`complete`](Self::complete) merges its reply. Replies whose sequence
/// number is no longer current are dropped.
#[derive(Debug, Clone)]
pub struct SearchResultController {
    dispatcher: SearchDispatcher,
    items: Vec<DisplayItem>,
    pagination: PaginationState,
    error: Option<SearchError>,
    layout: LayoutType,
    can_switch_layout: bool,
    load_more_threshold: usize,
    next_seq: u64,
    in_flight: Option<InFlight>,
}

impl SearchResultController {
    /// Creates an empty controller for a result screen.
    #[must_use]
    pub fn new(dispatcher: SearchDispatcher) -> Self {
        Self {
            dispatcher,
            items: Vec::new(),
            pagination: PaginationState::default(),
            error: None,
            layout: LayoutType::List,
            can_switch_layout: true,
            load_more_threshold: DEFAULT_LOAD_MORE_THRESHOLD,
            next_seq: 0,
            in_flight: None,
        }
    }

    /// Creates a controller for the screen a selected row opens.
    #[must_use]
    pub fn for_target(target: SearchTarget) -> Self {
        Self::new(SearchDispatcher::new(target))
    }

    /// Sets the load-more proximity threshold.
    #[must_use]
    pub const fn with_load_more_threshold(mut self, threshold: usize) -> Self {
        self.load_more_threshold = threshold;
        self
    }

    /// Starts a fetch.
    ///
    /// Returns `None` while another fetch is in flight, when `LoadMore` has
    /// no page left, or when the dispatcher has nothing to request.
    pub fn begin(&mut self, action: FetchAction) -> Option<PendingFetch> {
        if self.pagination.is_loading {
            tracing::debug!(?action, "fetch already in flight, ignoring");
            return None;
        }
        let page = match action {
            FetchAction::Refresh => 1,
            FetchAction::LoadMore if self.pagination.has_more() => {
                self.pagination.current_page.saturating_add(1)
            }
            FetchAction::LoadMore => return None,
        };
        let request = self.dispatcher.determine_request(page)?;

        self.next_seq = self.next_seq.wrapping_add(1);
        let seq = self.next_seq;
        self.in_flight = Some(InFlight { seq, page });
        self.pagination.is_loading = true;
        tracing::debug!(seq, page, ?action, "fetch started");
        Some(PendingFetch { seq, page, request })
    }

    /// Merges the reply for fetch `seq`.
    ///
    /// Page 1 replaces the list, later pages append. An empty list after the
    /// merge surfaces `NoData`; an empty later page keeps the loaded rows
    /// on screen without an error. A failure surfaces `FetchFailed` and
    /// keeps the current rows and page. Returns false when the reply was
    /// stale.
    pub fn complete(&mut self, seq: u64, result: Result<SearchResponse, TmdbError>) -> bool {
        let Some(in_flight) = self.in_flight.filter(|f| f.seq == seq) else {
            tracing::debug!(seq, "dropping stale reply");
            return false;
        };
        self.in_flight = None;
        self.pagination.is_loading = false;

        match result {
            Ok(response) => {
                let parsed = self.dispatcher.parse(response);
                self.can_switch_layout = parsed.can_switch_layout;
                if in_flight.page == 1 {
                    self.items = parsed.items;
                } else {
                    self.items.extend(parsed.items);
                }
                self.pagination.current_page = in_flight.page;
                self.pagination.total_pages = parsed.total_pages.max(1);
                self.pagination.total_results = parsed.total_results;
                self.error = self.items.is_empty().then_some(SearchError::NoData);
                tracing::debug!(
                    page = in_flight.page,
                    total_pages = self.pagination.total_pages,
                    items = self.items.len(),
                    "page merged"
                );
            }
            Err(e) => {
                tracing::warn!(page = in_flight.page, error = %e, "search request failed");
                self.error = Some(SearchError::from(&e));
            }
        }
        true
    }

    /// Returns true when row `index` is close enough to the end to load more.
    #[must_use]
    pub fn should_load_more(&self, index: usize) -> bool {
        index.saturating_add(self.load_more_threshold) > self.items.len()
    }

    /// Row `index` became visible; starts `LoadMore` when it is near the end.
    pub fn item_visible(&mut self, index: usize) -> Option<PendingFetch> {
        if self.should_load_more(index) {
            self.begin(FetchAction::LoadMore)
        } else {
            None
        }
    }

    /// Switches between list and card layout. Returns false when disabled.
    pub fn toggle_layout(&mut self) -> bool {
        if !self.can_switch_layout {
            return false;
        }
        self.layout = self.layout.toggled();
        true
    }

    /// Replaces the query and abandons any in-flight fetch.
    ///
    /// The caller refreshes afterwards.
    pub fn update_query(&mut self, query: impl Into<String>) {
        self.dispatcher.set_query(query);
        if let Some(in_flight) = self.in_flight.take() {
            tracing::debug!(seq = in_flight.seq, "query changed, abandoning fetch");
        }
        self.pagination.is_loading = false;
    }

    /// Screen title.
    #[must_use]
    pub fn navigation_title(&self) -> String {
        self.dispatcher.navigation_title()
    }

    /// Merged rows.
    #[must_use]
    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    /// Page counters.
    #[must_use]
    pub const fn pagination(&self) -> PaginationState {
        self.pagination
    }

    /// Current error.
    #[must_use]
    pub const fn error(&self) -> Option<SearchError> {
        self.error
    }

    /// Current layout.
    #[must_use]
    pub const fn layout(&self) -> LayoutType {
        self.layout
    }

    /// Renderable copy of the state.
    #[must_use]
    pub fn snapshot(&self) -> ResultSnapshot {
        ResultSnapshot {
            title: self.navigation_title(),
            items: self.items.clone(),
            pagination: self.pagination,
            error: self.error,
            layout: self.layout,
            can_switch_layout: self.can_switch_layout,
        }
    }
}
