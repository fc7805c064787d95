//! Acceptance Test Harness for TUI testing
//!
//! Wraps TuiApp<TestBackend> with a scripted in-memory fetcher and
//! convenient methods for simulating user interactions.

use crate::config::KeyBindings;
use crate::fetch::{FetchWorker, ResultFetcher};
use crate::model::{FetchError, ResultId, ResultItem, ResultPage};
use crate::state::{AppState, FocusPane, SearchSession};
use crate::view::{TuiApp, TuiError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Convert a ratatui buffer to a string representation.
///
/// Captures the visual output character by character, preserving layout.
/// Empty lines are removed to keep assertions readable.
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// In-memory search backend with a fixed number of hits per query.
///
/// Queries listed in `failing` return a transport error. Every call is
/// recorded so tests can assert what was requested.
#[derive(Default)]
pub struct ScriptedFetcher {
    totals: Vec<(String, u32)>,
    failing: Mutex<Vec<String>>,
    per_page: u32,
    calls: Mutex<Vec<(String, u32)>>,
}

impl ScriptedFetcher {
    pub fn new(per_page: u32) -> Self {
        Self {
            per_page,
            ..Self::default()
        }
    }

    /// Serve `total` hits for `query`.
    pub fn with_total(mut self, query: &str, total: u32) -> Self {
        self.totals.push((query.to_string(), total));
        self
    }

    /// Make `query` fail until [`ScriptedFetcher::recover`] is called.
    pub fn failing(self, query: &str) -> Self {
        self.failing.lock().unwrap().push(query.to_string());
        self
    }

    pub fn recover(&self, query: &str) {
        self.failing.lock().unwrap().retain(|q| q != query);
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ResultFetcher for ScriptedFetcher {
    fn fetch(&self, query: &str, page: u32) -> Result<ResultPage, FetchError> {
        self.calls.lock().unwrap().push((query.to_string(), page));

        if self.failing.lock().unwrap().iter().any(|q| q == query) {
            return Err(FetchError::Transport("connection refused".to_string()));
        }

        let total = self
            .totals
            .iter()
            .find(|(q, _)| q == query)
            .map_or(0, |(_, total)| *total);
        let start = (page - 1) * self.per_page;
        let end = (start + self.per_page).min(total);
        let items = (start..end)
            .map(|n| {
                let id = u64::from(n) + 1;
                let mut item = ResultItem::new(
                    ResultId::new(id),
                    format!("https://cdn.test/{query}/{id}_preview.jpg"),
                    format!("https://cdn.test/{query}/{id}_large.jpg"),
                );
                item.tags = format!("{query}, photo {id}");
                item.author = "tester".to_string();
                item
            })
            .collect();
        Ok(ResultPage::new(items, total))
    }
}

/// Test harness for acceptance testing
///
/// The initial search for the default query is dispatched and settled
/// during construction, so every test starts from a loaded first page.
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    fetcher: Arc<ScriptedFetcher>,
}

impl AcceptanceTestHarness {
    /// Harness with a 100x30 terminal.
    pub fn new(fetcher: ScriptedFetcher) -> Result<Self, TuiError> {
        Self::with_size(fetcher, 100, 30)
    }

    pub fn with_size(fetcher: ScriptedFetcher, width: u16, height: u16) -> Result<Self, TuiError> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let fetcher = Arc::new(fetcher);
        let worker = FetchWorker::new(Arc::clone(&fetcher) as Arc<dyn ResultFetcher>);

        let (session, initial) = SearchSession::start_default();
        let app_state = AppState::new(session, Duration::from_secs(4));

        let mut app = TuiApp::new_for_test(terminal, app_state, worker, KeyBindings::default());
        app.dispatch_test(initial);
        app.settle_fetches(SETTLE_TIMEOUT);
        app.render_test()?;

        Ok(Self { app, fetcher })
    }

    /// Send a key without modifiers. Returns true if the app quit.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        let _ = self.app.render_test();
        quit
    }

    /// Type each character of `text` into the focused pane.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.send_key(KeyCode::Char(ch));
        }
    }

    /// Focus the search bar, type `query` and press Enter.
    pub fn search(&mut self, query: &str) {
        if self.state().focus != FocusPane::Search {
            self.send_key(KeyCode::Char('/'));
        }
        self.type_text(query);
        self.send_key(KeyCode::Enter);
    }

    pub fn click_at(&mut self, column: u16, row: u16) {
        self.app.handle_mouse_test(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
        let _ = self.app.render_test();
    }

    /// Wait for in-flight fetches and redraw.
    pub fn settle(&mut self) {
        self.app.settle_fetches(SETTLE_TIMEOUT);
        let _ = self.app.render_test();
    }

    pub fn state(&self) -> &AppState {
        self.app.app_state()
    }

    pub fn fetcher(&self) -> &ScriptedFetcher {
        &self.fetcher
    }

    pub fn render_to_string(&mut self) -> String {
        let _ = self.app.render_test();
        buffer_to_string(self.app.terminal().backend().buffer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Notice;

    fn harness() -> AcceptanceTestHarness {
        let fetcher = ScriptedFetcher::new(4)
            .with_total("love", 10)
            .with_total("cats", 2);
        AcceptanceTestHarness::new(fetcher).unwrap()
    }

    #[test]
    fn startup_shows_default_query_results() {
        let mut h = harness();
        let screen = h.render_to_string();

        assert!(screen.contains("Search: love"), "got:\n{}", screen);
        assert!(screen.contains("love, photo 1"));
        assert!(screen.contains("Load more (4 of 10)"));
        assert_eq!(h.fetcher().calls(), vec![("love".to_string(), 1)]);
    }

    #[test]
    fn load_more_until_exhausted() {
        let mut h = harness();
        h.send_key(KeyCode::Tab);

        h.send_key(KeyCode::Char('m'));
        h.settle();
        h.send_key(KeyCode::Char('m'));
        h.settle();

        assert_eq!(h.state().session().results().len(), 10);
        assert!(!h.state().session().show_load_more());
        assert_eq!(h.state().notifications.current(), Some(&Notice::EndOfResults));

        // Exhausted: no further request
        h.send_key(KeyCode::Char('m'));
        assert_eq!(h.fetcher().calls().len(), 3);

        let screen = h.render_to_string();
        assert!(!screen.contains("Load more"));
    }

    #[test]
    fn new_search_replaces_results() {
        let mut h = harness();
        h.search("cats");
        h.settle();

        assert_eq!(h.state().session().query().as_str(), "cats");
        assert_eq!(h.state().session().results().len(), 2);
        assert_eq!(h.state().focus, FocusPane::Results);
        assert!(h.render_to_string().contains("cats, photo 2"));
    }

    #[test]
    fn duplicate_search_is_rejected_without_fetch() {
        let mut h = harness();
        h.search("love");

        assert_eq!(
            h.state().notifications.current(),
            Some(&Notice::DuplicateQuery("love".to_string()))
        );
        assert_eq!(h.fetcher().calls().len(), 1);
        assert!(h.state().input.is_empty());
    }

    #[test]
    fn failed_search_can_be_retried() {
        let fetcher = ScriptedFetcher::new(4)
            .with_total("love", 10)
            .with_total("dogs", 3)
            .failing("dogs");
        let mut h = AcceptanceTestHarness::new(fetcher).unwrap();

        h.search("dogs");
        h.settle();
        assert!(h.state().session().results().is_empty());
        assert!(h.state().session().can_retry());
        assert!(h.render_to_string().contains("Search failed"));

        h.fetcher().recover("dogs");
        h.send_key(KeyCode::Char('r'));
        h.settle();

        assert_eq!(h.state().session().results().len(), 3);
        assert!(!h.state().session().can_retry());
    }

    #[test]
    fn detail_overlay_shows_full_size_reference() {
        let mut h = harness();
        h.send_key(KeyCode::Tab);
        h.send_key(KeyCode::Char('j'));
        h.send_key(KeyCode::Enter);

        let screen = h.render_to_string();
        assert!(screen.contains("Image #2"), "got:\n{}", screen);
        assert!(screen.contains("https://cdn.test/love/2_large.jpg"));

        h.send_key(KeyCode::Esc);
        assert!(!h.state().overlay_open());
    }

    #[test]
    fn clicking_load_more_row_fetches_next_page() {
        let mut h = harness();
        // Four results on rows 4..8, load-more row on row 8
        h.click_at(10, 8);
        h.settle();

        assert_eq!(h.state().session().results().len(), 8);
        assert_eq!(
            h.fetcher().calls(),
            vec![("love".to_string(), 1), ("love".to_string(), 2)]
        );
    }

    #[test]
    fn quit_from_results() {
        let mut h = harness();
        h.send_key(KeyCode::Tab);
        assert!(h.send_key(KeyCode::Char('q')));
    }
}
