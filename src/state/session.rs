//! Search session state machine (pure).
//!
//! [`SearchSession`] owns the active query, the accumulated results and the
//! loading/overlay flags. Every transition is synchronous and side-effect
//! free: when a fetch is needed the transition returns a [`FetchRequest`]
//! and the caller is responsible for running it and feeding the
//! [`FetchCompletion`] back through [`SearchSession::complete_fetch`].
//!
//! # Staleness
//!
//! Each request carries a [`FetchTicket`]. The session remembers the ticket
//! of the one fetch it is waiting for; any completion with another ticket
//! is discarded without touching state. Submitting a new query therefore
//! supersedes whatever was in flight, including a load-more for the old
//! query.
//!
//! # Invariants
//!
//! - `results.len() <= total_available` after every transition.
//! - Items in `results` are ordered by page, then by position within a page.
//! - At most one fetch is tracked as in flight.
//! - The overlay, when open, shows an item taken from `results`.

use crate::fetch::{FetchCompletion, FetchRequest, FetchTicket};
use crate::model::{PageNumber, ResultItem, SearchQuery};
pub use crate::model::DEFAULT_QUERY;
use crate::state::{Notice, OverlayState};
use tracing::{debug, info, warn};

// ===== Transition outcomes =====

/// Result of [`SearchSession::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was blank; nothing changed.
    EmptyQuery,
    /// Input equals the active query; nothing changed.
    DuplicateQuery(SearchQuery),
    /// A new query was accepted; the request must be dispatched.
    Started(FetchRequest),
}

impl SubmitOutcome {
    /// Notice to show the user, if any.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            SubmitOutcome::EmptyQuery => Some(Notice::EmptyQuery),
            SubmitOutcome::DuplicateQuery(query) => {
                Some(Notice::DuplicateQuery(query.as_str().to_string()))
            }
            SubmitOutcome::Started(_) => None,
        }
    }

    /// Whether the search bar text should be cleared.
    ///
    /// Blank input is left alone so the user can keep typing.
    pub fn clears_input(&self) -> bool {
        !matches!(self, SubmitOutcome::EmptyQuery)
    }

    /// Consume the outcome, yielding the request to dispatch.
    pub fn into_fetch(self) -> Option<FetchRequest> {
        match self {
            SubmitOutcome::Started(request) => Some(request),
            _ => None,
        }
    }
}

/// Result of [`SearchSession::complete_fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page was appended.
    Merged {
        added: usize,
        notice: Option<Notice>,
    },
    /// The fetch failed; results are unchanged.
    Failed(Notice),
    /// The completion belongs to a superseded request and was dropped.
    Stale,
}

impl FetchOutcome {
    /// Notice to show for this outcome, if any.
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            FetchOutcome::Merged { notice, .. } => notice.as_ref(),
            FetchOutcome::Failed(notice) => Some(notice),
            FetchOutcome::Stale => None,
        }
    }

    /// Whether the completion was discarded as superseded.
    pub fn is_stale(&self) -> bool {
        matches!(self, FetchOutcome::Stale)
    }
}

/// Read-only view of a session for rendering.
#[derive(Debug, Clone, Copy)]
pub struct SessionSnapshot<'a> {
    /// Active query.
    pub query: &'a SearchQuery,
    /// Last page requested.
    pub page: PageNumber,
    /// Whether a fetch is in flight.
    pub is_loading: bool,
    /// Accumulated results in request order.
    pub results: &'a [ResultItem],
    /// Total hits reported by the endpoint.
    pub total_available: u32,
    /// Detail overlay state.
    pub overlay: &'a OverlayState,
    /// Whether the "load more" row is shown.
    pub show_load_more: bool,
}

// ===== SearchSession =====

/// Query, pagination and results for one interactive search session.
#[derive(Debug, Clone)]
pub struct SearchSession {
    query: SearchQuery,
    /// Highest page requested for `query`.
    page: PageNumber,
    results: Vec<ResultItem>,
    total_available: u32,
    in_flight: Option<FetchTicket>,
    /// Page of the last failed fetch, cleared by any successful merge.
    failed_page: Option<PageNumber>,
    next_ticket: u64,
    overlay: OverlayState,
}

impl SearchSession {
    /// Start a session for `query` and return the request for its first page.
    pub fn start(query: SearchQuery) -> (Self, FetchRequest) {
        let mut session = Self {
            query,
            page: PageNumber::FIRST,
            results: Vec::new(),
            total_available: 0,
            in_flight: None,
            failed_page: None,
            next_ticket: 1,
            overlay: OverlayState::Closed,
        };
        info!(query = session.query.as_str(), "Starting search session");
        let request = session.issue(PageNumber::FIRST);
        (session, request)
    }

    /// Start a session for [`DEFAULT_QUERY`].
    pub fn start_default() -> (Self, FetchRequest) {
        Self::start(SearchQuery::default())
    }

    // ===== Transitions =====

    /// Submit a new search term from the input field.
    ///
    /// Blank input and a term equal to the active query are rejected with a
    /// notice. Anything else resets pagination and results, closes the
    /// overlay and supersedes any fetch in flight.
    pub fn submit(&mut self, raw: &str) -> SubmitOutcome {
        let Some(query) = SearchQuery::new(raw) else {
            debug!("Ignoring blank search term");
            return SubmitOutcome::EmptyQuery;
        };

        if query == self.query {
            debug!(query = query.as_str(), "Ignoring duplicate search term");
            return SubmitOutcome::DuplicateQuery(query);
        }

        info!(
            from = self.query.as_str(),
            to = query.as_str(),
            "Search query changed"
        );
        if let Some(ticket) = self.in_flight {
            debug!(ticket = ticket.get(), "Superseding in-flight fetch");
        }

        self.query = query;
        self.page = PageNumber::FIRST;
        self.results.clear();
        self.total_available = 0;
        self.failed_page = None;
        self.overlay = OverlayState::Closed;

        SubmitOutcome::Started(self.issue(PageNumber::FIRST))
    }

    /// Request the next page of the active query.
    ///
    /// Returns `None` while a fetch is in flight or when every result has
    /// already been loaded.
    pub fn load_more(&mut self) -> Option<FetchRequest> {
        if self.is_loading() {
            debug!("Load more ignored: fetch in flight");
            return None;
        }
        if self.is_exhausted() {
            debug!("Load more ignored: no further results");
            return None;
        }

        let next = self.page.next();
        self.page = next;
        self.failed_page = None;
        Some(self.issue(next))
    }

    /// Re-issue the fetch that failed most recently.
    ///
    /// This is the only way to recover when the first page of a query
    /// fails, since resubmitting the same term is rejected as a duplicate.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        if self.is_loading() {
            return None;
        }
        let page = self.failed_page.take()?;
        info!(query = self.query.as_str(), page = page.get(), "Retrying fetch");
        self.page = page;
        Some(self.issue(page))
    }

    /// Feed a finished fetch back into the session.
    pub fn complete_fetch(&mut self, completion: FetchCompletion) -> FetchOutcome {
        let FetchCompletion { request, result } = completion;

        if self.in_flight != Some(request.ticket) {
            debug!(
                ticket = request.ticket.get(),
                query = request.query.as_str(),
                page = request.page.get(),
                "Discarding stale fetch completion"
            );
            return FetchOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                let added = page.items.len();
                self.results.extend(page.items);
                self.failed_page = None;

                if added == 0 && !request.page.is_first() {
                    // Server promised more than it delivered.
                    self.total_available = self.results_len();
                } else {
                    self.total_available = page.total_hits;
                }

                if self.results_len() > self.total_available {
                    warn!(
                        reported = self.total_available,
                        loaded = self.results.len(),
                        "Endpoint reported fewer hits than returned; clamping total"
                    );
                    self.total_available = self.results_len();
                }

                debug!(
                    query = request.query.as_str(),
                    page = request.page.get(),
                    added,
                    total = self.total_available,
                    "Merged fetch results"
                );

                let notice = if self.results.is_empty() {
                    Some(Notice::NoResults(self.query.as_str().to_string()))
                } else if !request.page.is_first() && self.is_exhausted() {
                    Some(Notice::EndOfResults)
                } else {
                    None
                };
                FetchOutcome::Merged { added, notice }
            }
            Err(e) => {
                warn!(
                    query = request.query.as_str(),
                    page = request.page.get(),
                    error = %e,
                    "Fetch failed"
                );
                // Roll back so the next load-more asks for the same page.
                if let Some(prev) = PageNumber::new(request.page.get() - 1) {
                    self.page = prev;
                }
                self.failed_page = Some(request.page);
                FetchOutcome::Failed(Notice::FetchFailed(e.to_string()))
            }
        }
    }

    /// Open the detail overlay for `results[index]`.
    ///
    /// Returns false (and leaves the overlay alone) if `index` is out of
    /// range. Opening while already open replaces the item.
    pub fn open_overlay(&mut self, index: usize) -> bool {
        match self.results.get(index) {
            Some(item) => {
                self.overlay = OverlayState::Open(item.clone());
                true
            }
            None => false,
        }
    }

    /// Close the detail overlay. No-op when closed.
    pub fn close_overlay(&mut self) {
        self.overlay = OverlayState::Closed;
    }

    // ===== Queries =====

    /// Active query.
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Last page requested.
    pub fn page(&self) -> PageNumber {
        self.page
    }

    /// Accumulated results in request order.
    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    /// Total hits reported for the active query.
    pub fn total_available(&self) -> u32 {
        self.total_available
    }

    /// Detail overlay state.
    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Ticket of the fetch the session is waiting for.
    pub fn in_flight(&self) -> Option<FetchTicket> {
        self.in_flight
    }

    /// Whether the last fetch failed and can be retried.
    pub fn can_retry(&self) -> bool {
        !self.is_loading() && self.failed_page.is_some()
    }

    /// All results for the active query have been loaded.
    pub fn is_exhausted(&self) -> bool {
        self.results_len() >= self.total_available
    }

    /// Whether the "load more" control should be offered.
    pub fn show_load_more(&self) -> bool {
        !self.is_loading() && self.results_len() != self.total_available
    }

    /// Borrowed view of everything the screen needs.
    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            query: &self.query,
            page: self.page,
            is_loading: self.is_loading(),
            results: &self.results,
            total_available: self.total_available,
            overlay: &self.overlay,
            show_load_more: self.show_load_more(),
        }
    }

    // ===== Internals =====

    fn issue(&mut self, page: PageNumber) -> FetchRequest {
        let ticket = FetchTicket::new(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        FetchRequest {
            ticket,
            query: self.query.clone(),
            page,
        }
    }

    fn results_len(&self) -> u32 {
        u32::try_from(self.results.len()).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
