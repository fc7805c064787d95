//! TUI rendering and event handling (impure shell)

pub mod constants;
mod detail_overlay;
mod help;
mod layout;
mod result_list;
mod search_input;
mod status_bar;
mod styles;

pub use detail_overlay::{detail_popup_area, render_detail_overlay};
pub use help::render_help_overlay;
pub use layout::{calculate_areas, render_layout, ScreenAreas};
pub use result_list::ResultList;
pub use search_input::SearchInput;
pub use styles::{ColorConfig, UiStyles};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::fetch::{FetchRequest, FetchWorker, PixabayFetcher};
use crate::model::{FetchError, KeyAction, SearchQuery};
use crate::state::{AppState, FocusPane, SearchSession};
use constants::EVENT_POLL_INTERVAL;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Rows moved by PageUp/PageDown before the first frame is drawn.
const FALLBACK_PAGE_ROWS: usize = 10;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// The search backend could not be set up
    #[error("Search backend error: {0}")]
    Fetch(#[from] FetchError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    worker: FetchWorker,
    key_bindings: KeyBindings,
    styles: UiStyles,
    /// Frame area of the last draw (for mouse hit testing)
    last_frame: Option<Rect>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(app_state: AppState, worker: FetchWorker, styles: UiStyles) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            app_state,
            worker,
            key_bindings: KeyBindings::default(),
            styles,
            last_frame: None,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Between input events the loop
    /// wakes every [`EVENT_POLL_INTERVAL`] to merge finished fetches and
    /// expire notices.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if event::poll(EVENT_POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if key.kind == KeyEventKind::Release {
                            continue;
                        }
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        self.draw()?;
                    }
                    Event::Resize(width, height) => {
                        debug!("Handling resize to {}x{}", width, height);
                        self.draw()?;
                    }
                    _ => {}
                }
            }

            if self.tick(Instant::now()) {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Merge finished fetches and expire notices.
    ///
    /// Returns true if anything visible changed.
    fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        for completion in self.worker.poll() {
            let ticket = completion.request.ticket.get();
            let outcome = self.app_state.apply_completion(completion);
            if outcome.is_stale() {
                debug!(ticket, "Discarded stale fetch completion");
            } else {
                changed = true;
            }
        }

        if self.app_state.notifications.expire(now) {
            changed = true;
        }

        changed
    }

    fn dispatch(&self, request: Option<FetchRequest>) {
        if let Some(request) = request {
            self.worker.dispatch(request);
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even while typing
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // Detail overlay is modal
        if self.app_state.overlay_open() {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char(' ') => {
                    self.app_state.close_overlay();
                }
                _ => {}
            }
            return false;
        }

        // Help overlay is modal too, but q still quits
        if self.app_state.help_visible {
            match key.code {
                KeyCode::Esc | KeyCode::Char('?') => self.app_state.toggle_help(),
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        if self.app_state.focus == FocusPane::Search && self.handle_search_key(key) {
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        self.handle_action(action)
    }

    /// Keys consumed by the search bar. Returns false to fall through to
    /// the global bindings.
    fn handle_search_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.app_state.input.insert_char(ch);
            }
            KeyCode::Backspace => self.app_state.input.backspace(),
            KeyCode::Delete => self.app_state.input.delete(),
            KeyCode::Left => self.app_state.input.cursor_left(),
            KeyCode::Right => self.app_state.input.cursor_right(),
            KeyCode::Home => self.app_state.input.cursor_home(),
            KeyCode::End => self.app_state.input.cursor_end(),
            KeyCode::Enter => {
                let request = self.app_state.submit_input();
                self.dispatch(request);
            }
            KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab | KeyCode::Down => {
                self.app_state.focus = FocusPane::Results;
            }
            _ => return false,
        }
        true
    }

    /// Apply a bound action. Returns true if app should quit.
    fn handle_action(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::SelectNext => self.app_state.move_selection(1),
            KeyAction::SelectPrev => self.app_state.move_selection(-1),
            KeyAction::SelectFirst => self.app_state.select_first(),
            KeyAction::SelectLast => self.app_state.select_last(),
            KeyAction::PageDown => {
                let rows = self.page_rows();
                self.app_state
                    .move_selection(isize::try_from(rows).unwrap_or(isize::MAX));
            }
            KeyAction::PageUp => {
                let rows = self.page_rows();
                self.app_state
                    .move_selection(-isize::try_from(rows).unwrap_or(isize::MAX));
            }
            KeyAction::FocusSearch => self.app_state.focus_search(),
            KeyAction::CycleFocus => self.app_state.cycle_focus(),
            KeyAction::LoadMore => {
                let request = self.app_state.load_more();
                if request.is_none() {
                    debug!("Load more ignored: loading or exhausted");
                }
                self.dispatch(request);
            }
            KeyAction::Retry => {
                let request = self.app_state.retry();
                self.dispatch(request);
            }
            KeyAction::OpenDetail => {
                let request = self.app_state.activate_selected();
                self.dispatch(request);
            }
            KeyAction::CloseOverlay => self.app_state.close_overlay(),
            KeyAction::Help => self.app_state.toggle_help(),
            KeyAction::Quit => return true,
        }
        false
    }

    fn page_rows(&self) -> usize {
        self.last_areas()
            .map(|areas| result_list::visible_rows(areas.results))
            .filter(|rows| *rows > 0)
            .unwrap_or(FALLBACK_PAGE_ROWS)
    }

    /// Handle a single mouse event
    ///
    /// Left click outside the detail popup closes it; any click closes help.
    /// Clicking a result opens it, clicking the "load more" row loads more.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let left_click = matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left));

        if self.app_state.overlay_open() {
            if left_click {
                let popup = self.last_frame.map(detail_popup_area);
                let inside = popup.is_some_and(|area| contains(area, mouse.column, mouse.row));
                if !inside {
                    self.app_state.close_overlay();
                }
            }
            return;
        }

        if self.app_state.help_visible {
            if left_click {
                self.app_state.toggle_help();
            }
            return;
        }

        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.app_state.move_selection(-1);
                return;
            }
            MouseEventKind::ScrollDown => {
                self.app_state.move_selection(1);
                return;
            }
            _ if !left_click => return,
            _ => {}
        }

        let Some(areas) = self.last_areas() else {
            return;
        };

        if contains(areas.search, mouse.column, mouse.row) {
            self.app_state.focus_search();
            return;
        }

        let offset = self.app_state.scroll_offset();
        if let Some(row) = result_list::row_at(areas.results, offset, mouse.column, mouse.row) {
            self.app_state.focus = FocusPane::Results;
            if self.app_state.select_row(row) {
                let request = self.app_state.activate_selected();
                self.dispatch(request);
            }
        }
    }

    fn last_areas(&self) -> Option<ScreenAreas> {
        self.last_frame.map(calculate_areas)
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let frame_area = Rect::new(0, 0, size.width, size.height);
        self.last_frame = Some(frame_area);

        let visible = result_list::visible_rows(calculate_areas(frame_area).results);
        let offset = result_list::follow_selection(
            self.app_state.scroll_offset(),
            self.app_state.selected().unwrap_or(0),
            visible,
        );
        self.app_state.set_scroll_offset(offset);

        let app_state = &self.app_state;
        let styles = &self.styles;
        self.terminal.draw(|frame| {
            render_layout(frame, app_state, styles);
        })?;

        Ok(())
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
#[allow(dead_code)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing without touching the real terminal.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        worker: FetchWorker,
        key_bindings: KeyBindings,
    ) -> Self {
        Self {
            terminal,
            app_state,
            worker,
            key_bindings,
            styles: UiStyles::new(ColorConfig::disabled()),
            last_frame: None,
        }
    }

    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse)
    }

    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub(crate) fn dispatch_test(&self, request: FetchRequest) {
        self.worker.dispatch(request);
    }

    /// Merge completions until nothing is in flight or `timeout` passes.
    pub(crate) fn settle_fetches(&mut self, timeout: Duration) {
        let deadline = Instant::now() + timeout;
        while self.app_state.session().is_loading() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            if let Some(completion) = self.worker.wait(remaining) {
                self.app_state.apply_completion(completion);
            }
        }
    }
}

/// Initialize and run the TUI application
///
/// Builds the search backend from `config`, issues the initial query and
/// runs the event loop. Terminal state is restored even if the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(config: &ResolvedConfig, color: ColorConfig) -> Result<(), TuiError> {
    let fetcher = PixabayFetcher::from_config(config)?;
    if config.api_key.is_none() {
        warn!("No API key configured; searches will fail until one is set");
    }
    let worker = FetchWorker::new(Arc::new(fetcher));

    let query = SearchQuery::new(config.default_query.clone()).unwrap_or_default();
    info!(query = query.as_str(), "Starting initial search");
    let (session, initial) = SearchSession::start(query);
    let app_state = AppState::new(session, Duration::from_secs(config.notice_duration_secs));
    worker.dispatch(initial);

    let mut app = TuiApp::new(app_state, worker, UiStyles::new(color))?;

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
