//! Remote result retrieval (impure shell).
//!
//! This module provides:
//! - [`ResultFetcher`]: the seam between the search session and a search backend
//! - [`PixabayFetcher`]: the HTTP backend
//! - [`FetchWorker`]: runs fetches off the event-loop thread and hands back completions
//!
//! The session never calls a fetcher directly. Transitions return a
//! [`FetchRequest`]; the shell dispatches it and later feeds the matching
//! [`FetchCompletion`] back into the session.

use crate::model::{FetchError, PageNumber, ResultPage, SearchQuery};

pub mod pixabay;
pub mod worker;

pub use pixabay::PixabayFetcher;
pub use worker::FetchWorker;

/// Retrieves one page of results for a query.
///
/// Implementations are stateless from the session's point of view: the same
/// `(query, page)` may be requested again after a failure. Page numbering is
/// 1-based and the page size is the fetcher's own choice.
pub trait ResultFetcher: Send + Sync {
    /// Fetch `page` of the results for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport failure, non-2xx status or an
    /// undecodable response.
    fn fetch(&self, query: &str, page: u32) -> Result<ResultPage, FetchError>;
}

impl<F> ResultFetcher for F
where
    F: Fn(&str, u32) -> Result<ResultPage, FetchError> + Send + Sync,
{
    fn fetch(&self, query: &str, page: u32) -> Result<ResultPage, FetchError> {
        self(query, page)
    }
}

/// Identifies one fetch issued by a session.
///
/// Tickets increase monotonically within a session. A completion is merged
/// only if its ticket is the one the session is still waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw ticket number.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A fetch the shell must perform on behalf of a session.
///
/// Captures the query and page at the moment the transition happened, so a
/// late completion can be recognised as stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Identifies this request for the staleness check.
    pub ticket: FetchTicket,
    /// Term to search for.
    pub query: SearchQuery,
    /// Page to fetch, 1-based.
    pub page: PageNumber,
}

impl FetchRequest {
    /// Run this request synchronously against `fetcher`.
    pub fn run(self, fetcher: &dyn ResultFetcher) -> FetchCompletion {
        let result = fetcher.fetch(self.query.as_str(), self.page.get());
        FetchCompletion {
            request: self,
            result,
        }
    }
}

/// Outcome of a dispatched [`FetchRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCompletion {
    /// The request this completion answers.
    pub request: FetchRequest,
    /// Fetched page, or why the fetch failed.
    pub result: Result<ResultPage, FetchError>,
}
