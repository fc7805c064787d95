//! Single-line status bar.
//!
//! Left: loading state or result counts. Right: the current notice, or key
//! hints for the focused pane when there is no notice.

use crate::state::{AppState, FocusPane};
use crate::view::styles::UiStyles;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Text describing what the session is doing.
pub fn progress_text(state: &AppState) -> String {
    let session = state.session();
    let loaded = session.results().len();

    if session.is_loading() {
        if loaded == 0 {
            format!("Searching \"{}\"…", session.query())
        } else {
            format!("Loading page {}…", session.page())
        }
    } else {
        format!(
            "{} of {} for \"{}\"",
            loaded,
            session.total_available(),
            session.query()
        )
    }
}

/// Key hints for the focused pane.
pub fn key_hints(state: &AppState) -> &'static str {
    if state.session().can_retry() && state.focus == FocusPane::Results {
        return "r: retry | /: search | ?: help | q: quit";
    }
    match state.focus {
        FocusPane::Search => "Enter: search | Tab: results | Ctrl+c: quit",
        FocusPane::Results => "j/k: move | Enter: open | m: more | /: search | ?: help | q: quit",
    }
}

/// Draw progress on the left and a notice or key hints on the right.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, styles: &UiStyles) {
    let progress = progress_text(state);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(u16::try_from(progress.chars().count() + 2).unwrap_or(u16::MAX)),
            Constraint::Min(0),
        ])
        .split(area);

    let progress_style = if state.session().is_loading() {
        styles.loading
    } else {
        styles.muted
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {progress}"), progress_style))),
        chunks[0],
    );

    let right = match state.notifications.current() {
        Some(notice) => Line::from(Span::styled(notice.message(), styles.notice(notice.level()))),
        None => Line::from(Span::styled(key_hints(state), styles.muted)),
    };
    frame.render_widget(Paragraph::new(right.right_aligned()), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchCompletion;
    use crate::model::{FetchError, ResultId, ResultItem, ResultPage};
    use crate::state::SearchSession;
    use std::time::Duration;

    fn fresh() -> (AppState, crate::fetch::FetchRequest) {
        let (session, request) = SearchSession::start_default();
        (AppState::new(session, Duration::from_secs(5)), request)
    }

    #[test]
    fn progress_while_first_page_loads() {
        let (state, _) = fresh();
        assert_eq!(progress_text(&state), "Searching \"love\"…");
    }

    #[test]
    fn progress_after_page_loads() {
        let (mut state, request) = fresh();
        state.apply_completion(FetchCompletion {
            request,
            result: Ok(ResultPage::new(
                vec![ResultItem::new(ResultId::new(1), "p", "l")],
                40,
            )),
        });

        assert_eq!(progress_text(&state), "1 of 40 for \"love\"");

        state.load_more();
        assert_eq!(progress_text(&state), "Loading page 2…");
    }

    #[test]
    fn hints_follow_focus() {
        let (mut state, _) = fresh();
        assert!(key_hints(&state).starts_with("Enter: search"));
        state.cycle_focus();
        assert!(key_hints(&state).contains("m: more"));
    }

    #[test]
    fn hints_offer_retry_after_failure() {
        let (mut state, request) = fresh();
        state.apply_completion(FetchCompletion {
            request,
            result: Err(FetchError::Transport("offline".to_string())),
        });
        state.focus = FocusPane::Results;

        assert!(key_hints(&state).starts_with("r: retry"));
    }
}
