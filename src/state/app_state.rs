//! Application state and transitions.
//!
//! AppState is the root state type containing all UI state. It wraps the
//! [`SearchSession`] and adds what only the terminal front end needs: the
//! search bar text, focus, selection, help visibility and notifications.
//! Transitions that require a fetch return the [`FetchRequest`] for the
//! shell to dispatch.

use crate::fetch::{FetchCompletion, FetchRequest};
use crate::state::{FetchOutcome, NotificationCenter, QueryInput, SearchSession};
use std::time::Duration;
use tracing::debug;

// ===== FocusPane =====

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPane {
    /// Search bar; printable keys edit the query.
    #[default]
    Search,
    /// Result list; keys navigate and act on results.
    Results,
}

// ===== AppState =====

/// Application state. Pure data, no side effects.
///
/// # Selection
///
/// `selected` indexes the result list. When the "load more" row is shown it
/// is selectable too, at index `results.len()`. The index is clamped after
/// every transition that can shrink the list.
///
/// `scroll_offset` is the first visible row of the list. It survives between
/// frames and is adjusted by the view when the selection leaves the window.
#[derive(Debug, Clone)]
pub struct AppState {
    session: SearchSession,

    /// Text being typed in the search bar.
    pub input: QueryInput,

    /// Pane receiving keyboard input.
    pub focus: FocusPane,

    selected: usize,

    scroll_offset: usize,

    /// Whether the help overlay is currently visible.
    pub help_visible: bool,

    /// Notice shown in the status bar.
    pub notifications: NotificationCenter,
}

impl AppState {
    /// State for `session` with the search bar focused.
    pub fn new(session: SearchSession, notice_lifetime: Duration) -> Self {
        Self {
            session,
            input: QueryInput::new(),
            focus: FocusPane::Search,
            selected: 0,
            scroll_offset: 0,
            help_visible: false,
            notifications: NotificationCenter::new(notice_lifetime),
        }
    }

    /// The search session being displayed.
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    // ===== Search =====

    /// Submit the search bar text.
    ///
    /// Clears the search bar unless the text was blank. A new query moves
    /// focus to the result list and resets the selection.
    pub fn submit_input(&mut self) -> Option<FetchRequest> {
        let outcome = self.session.submit(self.input.text());

        if outcome.clears_input() {
            self.input.clear();
        }
        if let Some(notice) = outcome.notice() {
            self.notifications.push(notice);
        }

        let request = outcome.into_fetch()?;
        self.selected = 0;
        self.scroll_offset = 0;
        self.focus = FocusPane::Results;
        self.notifications.dismiss();
        Some(request)
    }

    /// Request the next page, if the session allows it.
    pub fn load_more(&mut self) -> Option<FetchRequest> {
        let request = self.session.load_more();
        self.clamp_selection();
        request
    }

    /// Re-issue the last failed page and clear its notice.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        let request = self.session.retry();
        if request.is_some() {
            self.notifications.dismiss();
        }
        request
    }

    /// Merge a finished fetch and surface its notice.
    pub fn apply_completion(&mut self, completion: FetchCompletion) -> FetchOutcome {
        let outcome = self.session.complete_fetch(completion);
        if let Some(notice) = outcome.notice() {
            self.notifications.push(notice.clone());
        }
        self.clamp_selection();
        outcome
    }

    // ===== Selection =====

    /// Number of selectable rows, including the "load more" row.
    pub fn row_count(&self) -> usize {
        self.session.results().len() + usize::from(self.session.show_load_more())
    }

    /// Selected row, or `None` when the list is empty.
    pub fn selected(&self) -> Option<usize> {
        (self.row_count() > 0).then_some(self.selected)
    }

    /// Whether the "load more" row is the selected row.
    pub fn load_more_selected(&self) -> bool {
        self.session.show_load_more() && self.selected == self.session.results().len()
    }

    /// Move the selection by `delta` rows, saturating at both ends.
    pub fn move_selection(&mut self, delta: isize) {
        let last = self.row_count().saturating_sub(1);
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    /// Select the first row.
    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    /// Select the last row, which may be the "load more" row.
    pub fn select_last(&mut self) {
        self.selected = self.row_count().saturating_sub(1);
    }

    /// Select `row` if it exists.
    pub fn select_row(&mut self, row: usize) -> bool {
        if row < self.row_count() {
            self.selected = row;
            true
        } else {
            false
        }
    }

    /// First visible row of the result list.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Record the first visible row after a draw.
    pub fn set_scroll_offset(&mut self, offset: usize) {
        self.scroll_offset = offset;
    }

    /// Act on the selected row: open its detail overlay, or load more when
    /// the "load more" row is selected.
    pub fn activate_selected(&mut self) -> Option<FetchRequest> {
        if self.load_more_selected() {
            return self.load_more();
        }
        if !self.session.open_overlay(self.selected) {
            debug!(selected = self.selected, "Nothing to open at selection");
        }
        None
    }

    // ===== Overlays =====

    /// Close the detail overlay.
    pub fn close_overlay(&mut self) {
        self.session.close_overlay();
    }

    /// Whether the detail overlay is showing.
    pub fn overlay_open(&self) -> bool {
        self.session.overlay().is_open()
    }

    /// Show or hide the help overlay.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    // ===== Focus =====

    /// Move focus to the other pane.
    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::Search => FocusPane::Results,
            FocusPane::Results => FocusPane::Search,
        };
    }

    /// Focus the search bar.
    pub fn focus_search(&mut self) {
        self.focus = FocusPane::Search;
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.row_count().saturating_sub(1));
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
