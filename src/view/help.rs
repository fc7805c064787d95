//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with all keyboard shortcuts grouped by category.
//! Triggered by '?' key, dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::layout::centered_rect;
use super::styles::UiStyles;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Shortcut table: (category, [(keys, description)]).
const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Search bar",
        &[
            ("Enter", "Search for the typed term"),
            ("←/→ Home/End", "Move cursor"),
            ("Backspace/Del", "Delete character"),
            ("Tab/Esc/↓", "Go to results"),
        ],
    ),
    (
        "Results",
        &[
            ("j/↓  k/↑", "Select next / previous"),
            ("Ctrl+d/PgDn", "Page down"),
            ("Ctrl+u/PgUp", "Page up"),
            ("g/Home  G/End", "First / last result"),
            ("Enter/Space", "Open result (or load more)"),
            ("m", "Load more results"),
            ("r", "Retry failed search"),
            ("/ or i", "Go to search bar"),
        ],
    ),
    (
        "Detail view",
        &[("Esc/Enter/q", "Close"), ("Click outside", "Close")],
    ),
    (
        "Application",
        &[("?", "Toggle this help"), ("q/Ctrl+c", "Quit")],
    ),
];

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, styles: &UiStyles) {
    let area = frame.area();
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);

    // Clear the background for the overlay
    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(styles))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(styles.focused_border),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);

    // Render dismissal hint at the bottom
    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };

    let hint = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc or ? to close ",
        styles.muted,
    )]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// Build the help content lines grouped by category.
fn build_help_content(styles: &UiStyles) -> Vec<Line<'static>> {
    let desc_style = Style::default();
    let mut lines = Vec::new();

    for (index, (category, entries)) in SHORTCUTS.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*category, styles.section_header)));
        for (keys, description) in entries.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<16}"), styles.key),
                Span::styled(*description, desc_style),
            ]));
        }
    }

    lines
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
