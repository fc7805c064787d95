//! State for the result detail overlay.

use crate::model::ResultItem;

/// Detail overlay state.
///
/// Sum type: either nothing is open, or exactly one item is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OverlayState {
    /// No overlay.
    #[default]
    Closed,
    /// Showing the detail view for this item.
    Open(ResultItem),
}

impl OverlayState {
    /// Check if the overlay is visible.
    pub fn is_open(&self) -> bool {
        matches!(self, OverlayState::Open(_))
    }

    /// The item being shown, if any.
    pub fn item(&self) -> Option<&ResultItem> {
        match self {
            OverlayState::Open(item) => Some(item),
            OverlayState::Closed => None,
        }
    }
}
