//! Query and page newtypes with smart constructors.
//!
//! Raw constructors are never exported - use smart constructors only.

use std::fmt;

// ===== SearchQuery =====

/// Term searched for when a session starts.
pub const DEFAULT_QUERY: &str = "love";

/// Validated search query. Never empty or whitespace-only.
///
/// Stored exactly as typed; blankness is checked on the trimmed form but the
/// term itself is not normalised, so `"cats"` and `"cats "` are different
/// queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Smart constructor: validates query is non-blank.
    /// Returns None if query is empty or whitespace-only.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let s = raw.into();
        if s.trim().is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// The trimmed term.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self(DEFAULT_QUERY.to_string())
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ===== PageNumber =====

/// 1-based page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageNumber(u32);

impl PageNumber {
    /// First page of any query.
    pub const FIRST: PageNumber = PageNumber(1);

    /// Smart constructor: rejects 0.
    pub fn new(raw: u32) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Raw 1-based page number.
    pub fn get(self) -> u32 {
        self.0
    }

    /// The following page. Saturates at `u32::MAX`.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Whether this is page 1.
    pub fn is_first(self) -> bool {
        self.0 == 1
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ===== Tests =====
