//! Search result records returned by a [`ResultFetcher`](crate::fetch::ResultFetcher).
//!
//! The session treats these as opaque: it only accumulates them and compares
//! them by identity. Rendering code reads the metadata fields.

use std::fmt;

/// Identifier assigned to a result by the remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResultId(u64);

impl ResultId {
    /// Wrap a raw identifier.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single image hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    /// Remote identifier.
    pub id: ResultId,
    /// Small preview image reference (grid thumbnail).
    pub preview_url: String,
    /// Full-size image reference shown in the detail overlay.
    pub large_url: String,
    /// Comma-separated tags as reported by the endpoint.
    pub tags: String,
    /// Original image width in pixels.
    pub width: u32,
    /// Original image height in pixels.
    pub height: u32,
    /// Uploader display name.
    pub author: String,
    /// View count.
    pub views: u64,
    /// Like count.
    pub likes: u64,
    /// Download count.
    pub downloads: u64,
}

impl ResultItem {
    /// Minimal constructor used by fetchers that only know the references.
    ///
    /// Metadata fields start empty/zero and can be filled in by the caller.
    pub fn new(id: ResultId, preview_url: impl Into<String>, large_url: impl Into<String>) -> Self {
        Self {
            id,
            preview_url: preview_url.into(),
            large_url: large_url.into(),
            tags: String::new(),
            width: 0,
            height: 0,
            author: String::new(),
            views: 0,
            likes: 0,
            downloads: 0,
        }
    }

    /// Tags split on commas, trimmed, empty entries dropped.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Human-readable dimensions, e.g. `1920x1280`.
    pub fn dimensions(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// One page of results plus the total the endpoint reports for the query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultPage {
    /// Items in the order the endpoint ranked them.
    pub items: Vec<ResultItem>,
    /// Total number of results reachable for the query across all pages.
    pub total_hits: u32,
}

impl ResultPage {
    /// Page holding `items` out of `total_hits` reachable results.
    pub fn new(items: Vec<ResultItem>, total_hits: u32) -> Self {
        Self { items, total_hits }
    }

    /// Whether the page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
