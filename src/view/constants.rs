//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

use std::time::Duration;

/// Height of the search bar in lines (border + input line).
pub const SEARCH_BAR_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
///
/// Single line for loading state, result counts, notices and key hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Width percentage for the result detail popup.
pub const DETAIL_POPUP_WIDTH_PERCENT: u16 = 80;

/// Height percentage for the result detail popup.
pub const DETAIL_POPUP_HEIGHT_PERCENT: u16 = 60;

/// How long the event loop waits for input before checking for finished
/// fetches and expired notices.
pub const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);
