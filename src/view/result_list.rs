//! Result list widget.
//!
//! One line per result, followed by the "load more" row when the session
//! allows it. The scroll offset is kept in [`AppState`](crate::state::AppState)
//! between frames and only moves when the selection leaves the visible rows.
//! Mouse hit testing reads the same stored offset.

use crate::model::ResultItem;
use crate::state::SessionSnapshot;
use crate::view::styles::UiStyles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Width reserved for the tag column.
const TAG_COLUMN_WIDTH: usize = 36;

/// Result list widget.
pub struct ResultList<'a> {
    snapshot: SessionSnapshot<'a>,
    selected: Option<usize>,
    offset: usize,
    focused: bool,
    styles: &'a UiStyles,
}

impl<'a> ResultList<'a> {
    /// Widget for `snapshot` scrolled to `offset`.
    pub fn new(
        snapshot: SessionSnapshot<'a>,
        selected: Option<usize>,
        offset: usize,
        focused: bool,
        styles: &'a UiStyles,
    ) -> Self {
        Self {
            snapshot,
            selected,
            offset,
            focused,
            styles,
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let snap = &self.snapshot;

        if snap.results.is_empty() {
            let text = if snap.is_loading {
                format!("Searching for \"{}\"…", snap.query)
            } else {
                "No results".to_string()
            };
            return vec![Line::from(Span::styled(text, self.styles.muted))];
        }

        let mut lines: Vec<Line<'static>> = snap
            .results
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let line = Line::from(result_row(index, item));
                if self.selected == Some(index) {
                    line.style(self.styles.selected_row)
                } else {
                    line
                }
            })
            .collect();

        if snap.show_load_more {
            let text = format!(
                "  ▼ Load more ({} of {})",
                snap.results.len(),
                snap.total_available
            );
            let style = if self.selected == Some(snap.results.len()) {
                self.styles.selected_row
            } else {
                self.styles.load_more
            };
            lines.push(Line::from(Span::styled(text, style)));
        } else if snap.is_loading {
            lines.push(Line::from(Span::styled(
                "  Loading more…",
                self.styles.loading,
            )));
        }

        lines
    }
}

impl Widget for ResultList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Results ")
            .border_style(self.styles.border(self.focused));
        let visible = usize::from(block.inner(area).height);
        let offset = follow_selection(self.offset, self.selected.unwrap_or(0), visible);

        Paragraph::new(self.lines())
            .block(block)
            .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0))
            .render(area, buf);
    }
}

/// Smallest change to `offset` that puts `selected` on screen.
///
/// The offset is unchanged while the selection stays within the window.
pub fn follow_selection(offset: usize, selected: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 || selected < offset {
        selected.min(offset)
    } else if selected >= offset + visible_rows {
        selected + 1 - visible_rows
    } else {
        offset
    }
}

/// Map a terminal cell to a list row index.
///
/// `area` is the full widget area including borders. Returns `None` for
/// clicks on the border or outside the widget; the caller checks the index
/// against the row count. `offset` must be the offset of the last draw.
pub fn row_at(area: Rect, offset: usize, column: u16, row: u16) -> Option<usize> {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let inside = column >= inner.x
        && column < inner.x + inner.width
        && row >= inner.y
        && row < inner.y + inner.height;
    if !inside {
        return None;
    }
    Some(offset + usize::from(row - inner.y))
}

/// Number of rows visible inside `area`.
pub fn visible_rows(area: Rect) -> usize {
    usize::from(Block::default().borders(Borders::ALL).inner(area).height)
}

fn result_row(index: usize, item: &ResultItem) -> String {
    let tags = if item.tags.is_empty() {
        format!("#{}", item.id)
    } else {
        item.tags.clone()
    };
    let mut row = format!(
        "{:>4}. {}  {:>9}",
        index + 1,
        fit_to_width(&tags, TAG_COLUMN_WIDTH),
        item.dimensions()
    );
    if !item.author.is_empty() {
        row.push_str(&format!("  by {}", item.author));
    }
    row.push_str(&format!("  ♥ {}", item.likes));
    row
}

/// Truncate or pad `text` to exactly `width` display columns.
fn fit_to_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    let total: usize = text.chars().filter_map(UnicodeWidthChar::width).sum();

    if total <= width {
        out.push_str(text);
        used = total;
    } else {
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w + 1 > width {
                break;
            }
            out.push(ch);
            used += w;
        }
        out.push('…');
        used += 1;
    }

    out.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    out
}
