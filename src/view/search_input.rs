//! Search input widget for rendering the search bar.

use crate::state::QueryInput;
use crate::view::styles::UiStyles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const PLACEHOLDER: &str = "Search images and photos";

/// Search input widget.
///
/// Shows the text being typed, with a block cursor while focused. The
/// active query is shown in the title so it stays visible after the input
/// is cleared on submit.
pub struct SearchInput<'a> {
    input: &'a QueryInput,
    active_query: &'a str,
    focused: bool,
    styles: &'a UiStyles,
}

impl<'a> SearchInput<'a> {
    /// Input widget for the search bar.
    pub fn new(
        input: &'a QueryInput,
        active_query: &'a str,
        focused: bool,
        styles: &'a UiStyles,
    ) -> Self {
        Self {
            input,
            active_query,
            focused,
            styles,
        }
    }

    fn content(&self) -> Line<'static> {
        let text = self.input.text();

        if !self.focused {
            return if text.is_empty() {
                Line::from(Span::styled(PLACEHOLDER, self.styles.muted))
            } else {
                Line::from(text.to_string())
            };
        }

        // Split text into before/after cursor for rendering cursor
        let cursor = self.input.cursor();
        let before: String = text.chars().take(cursor).collect();
        let mut after = text.chars().skip(cursor);
        let cursor_char = after.next().map(String::from).unwrap_or_else(|| " ".to_string());
        let rest: String = after.collect();

        Line::from(vec![
            Span::raw(before),
            Span::styled(
                cursor_char,
                Style::default().add_modifier(Modifier::REVERSED),
            ),
            Span::raw(rest),
        ])
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Search: {} ", self.active_query);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(self.styles.border(self.focused));

        Paragraph::new(self.content()).block(block).render(area, buf);
    }
}
