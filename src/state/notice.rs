//! User-facing notices produced by the search session.
//!
//! Notices never alter control flow. The shell shows the most recent one in
//! the status bar until it expires.

use std::time::{Duration, Instant};

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Something to know, nothing went wrong.
    Info,
    /// The user's input was rejected.
    Warning,
    /// A fetch failed.
    Error,
}

/// A transient notification for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Submitted term was empty or whitespace-only.
    EmptyQuery,
    /// Submitted term equals the active query.
    DuplicateQuery(String),
    /// A fetch failed; carries the human-readable reason.
    FetchFailed(String),
    /// First page of a query came back empty.
    NoResults(String),
    /// A load-more fetch reached the last available result.
    EndOfResults,
}

impl Notice {
    /// Text shown to the user.
    pub fn message(&self) -> String {
        match self {
            Notice::EmptyQuery => "Please enter a search term".to_string(),
            Notice::DuplicateQuery(query) => {
                format!("Already showing results for \"{query}\"")
            }
            Notice::FetchFailed(reason) => format!("Search failed: {reason}"),
            Notice::NoResults(query) => format!("No images found for \"{query}\""),
            Notice::EndOfResults => "You've reached the end of the results".to_string(),
        }
    }

    /// Severity used to style the notice.
    pub fn level(&self) -> NoticeLevel {
        match self {
            Notice::EmptyQuery | Notice::DuplicateQuery(_) => NoticeLevel::Warning,
            Notice::FetchFailed(_) => NoticeLevel::Error,
            Notice::NoResults(_) | Notice::EndOfResults => NoticeLevel::Info,
        }
    }
}

/// Holds the notice currently on screen and when it expires.
///
/// A newer notice replaces the current one; there is no queue. A deadline of
/// `None` means the notice stays until replaced or dismissed.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    current: Option<(Notice, Option<Instant>)>,
    lifetime: Duration,
}

impl NotificationCenter {
    /// Center whose notices stay visible for `lifetime`.
    pub fn new(lifetime: Duration) -> Self {
        Self {
            current: None,
            lifetime,
        }
    }

    /// Show `notice`, replacing whatever was shown.
    pub fn push(&mut self, notice: Notice) {
        self.push_at(notice, Instant::now());
    }

    pub(crate) fn push_at(&mut self, notice: Notice, now: Instant) {
        self.current = Some((notice, now.checked_add(self.lifetime)));
    }

    /// The visible notice, if it has not expired.
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref().map(|(notice, _)| notice)
    }

    /// Drop the current notice if it expired by `now`.
    ///
    /// Returns true when something was dropped (a redraw is needed).
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.current {
            Some((_, Some(deadline))) if *deadline <= now => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the current notice immediately.
    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(Duration::from_secs(4))
    }
}
