//! Screen layout rendering.
//!
//! Pure layout logic: splits the frame into search bar, result list and
//! status bar, then draws overlays on top.

use super::constants::{SEARCH_BAR_HEIGHT, STATUS_BAR_HEIGHT};
use super::detail_overlay::render_detail_overlay;
use super::help::render_help_overlay;
use super::result_list::ResultList;
use super::search_input::SearchInput;
use super::status_bar::render_status_bar;
use super::styles::UiStyles;
use crate::state::{AppState, FocusPane};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Areas of the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Search bar.
    pub search: Rect,
    /// Result list, including its border.
    pub results: Rect,
    /// Status bar.
    pub status: Rect,
}

/// Split the frame into its fixed regions.
pub fn calculate_areas(frame_area: Rect) -> ScreenAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SEARCH_BAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(frame_area);

    ScreenAreas {
        search: chunks[0],
        results: chunks[1],
        status: chunks[2],
    }
}

/// Render the whole screen for `state`.
pub fn render_layout(frame: &mut Frame, state: &AppState, styles: &UiStyles) {
    let areas = calculate_areas(frame.area());
    let snapshot = state.session().snapshot();

    frame.render_widget(
        SearchInput::new(
            &state.input,
            snapshot.query.as_str(),
            state.focus == FocusPane::Search,
            styles,
        ),
        areas.search,
    );

    frame.render_widget(
        ResultList::new(
            snapshot,
            state.selected(),
            state.scroll_offset(),
            state.focus == FocusPane::Results,
            styles,
        ),
        areas.results,
    );

    render_status_bar(frame, areas.status, state, styles);

    if let Some(item) = snapshot.overlay.item() {
        render_detail_overlay(frame, item, styles);
    }

    if state.help_visible {
        render_help_overlay(frame, styles);
    }
}

/// Calculate a rect centered in `area` with the given percentage size.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
