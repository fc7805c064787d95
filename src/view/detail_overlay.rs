//! Detail overlay for a single result.
//!
//! Centered popup with the full-size image reference and metadata.
//! Dismissed by Esc, Enter, q or a click outside the popup.

use super::constants::{DETAIL_POPUP_HEIGHT_PERCENT, DETAIL_POPUP_WIDTH_PERCENT};
use super::layout::centered_rect;
use super::styles::UiStyles;
use crate::model::ResultItem;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Area the popup occupies within `frame_area`.
pub fn detail_popup_area(frame_area: Rect) -> Rect {
    centered_rect(
        DETAIL_POPUP_WIDTH_PERCENT,
        DETAIL_POPUP_HEIGHT_PERCENT,
        frame_area,
    )
}

/// Draw the detail popup for `item` over the frame.
pub fn render_detail_overlay(frame: &mut Frame, item: &ResultItem, styles: &UiStyles) {
    let popup_area = detail_popup_area(frame.area());
    frame.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(build_detail_content(item, styles))
        .block(
            Block::default()
                .title(format!(" Image #{} ", item.id))
                .borders(Borders::ALL)
                .border_style(styles.focused_border),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };
    let hint = Paragraph::new(Line::from(Span::styled(
        " Esc/Enter/q to close ",
        styles.muted,
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}

fn build_detail_content(item: &ResultItem, styles: &UiStyles) -> Vec<Line<'static>> {
    let field = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<11}"), styles.key),
            Span::raw(value),
        ])
    };

    let tags = item.tag_list().join(", ");
    let mut lines = vec![
        field("Full size", item.large_url.clone()),
        field("Preview", item.preview_url.clone()),
        Line::default(),
        field("Tags", if tags.is_empty() { "-".to_string() } else { tags }),
        field("Size", item.dimensions()),
    ];
    if !item.author.is_empty() {
        lines.push(field("Author", item.author.clone()));
    }
    lines.push(field(
        "Stats",
        format!(
            "{} views, {} likes, {} downloads",
            item.views, item.likes, item.downloads
        ),
    ));
    lines
}
