//! Colors and text styles for the search UI.

use crate::state::NoticeLevel;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Colors on.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Colors off.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self::enabled()
    }
}

// ===== UiStyles =====

/// Resolved styles for every styled element on screen.
///
/// With colors disabled only modifiers (bold, reversed, dim) remain, so
/// focus and selection stay visible on monochrome terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiStyles {
    /// Border of the focused pane.
    pub focused_border: Style,
    /// Border of other panes.
    pub unfocused_border: Style,
    /// Highlighted list row.
    pub selected_row: Style,
    /// The "load more" row.
    pub load_more: Style,
    /// Secondary text and key hints.
    pub muted: Style,
    /// Headings in overlays.
    pub section_header: Style,
    /// Key names in the help table.
    pub key: Style,
    /// Loading indicators.
    pub loading: Style,
    info: Style,
    warning: Style,
    error: Style,
}

impl UiStyles {
    /// Styles for the given color setting.
    pub fn new(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                focused_border: Style::default().fg(Color::Cyan),
                unfocused_border: Style::default().fg(Color::DarkGray),
                selected_row: Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
                load_more: Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                muted: Style::default().fg(Color::DarkGray),
                section_header: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                key: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                loading: Style::default().fg(Color::Yellow),
                info: Style::default().fg(Color::Green),
                warning: Style::default().fg(Color::Yellow),
                error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            }
        } else {
            Self {
                focused_border: Style::default().add_modifier(Modifier::BOLD),
                unfocused_border: Style::default(),
                selected_row: Style::default().add_modifier(Modifier::REVERSED),
                load_more: Style::default().add_modifier(Modifier::BOLD),
                muted: Style::default().add_modifier(Modifier::DIM),
                section_header: Style::default().add_modifier(Modifier::BOLD),
                key: Style::default().add_modifier(Modifier::BOLD),
                loading: Style::default(),
                info: Style::default(),
                warning: Style::default().add_modifier(Modifier::BOLD),
                error: Style::default().add_modifier(Modifier::BOLD),
            }
        }
    }

    /// Border style for a pane.
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.focused_border
        } else {
            self.unfocused_border
        }
    }

    /// Style for a notice of `level`.
    pub fn notice(&self, level: NoticeLevel) -> Style {
        match level {
            NoticeLevel::Info => self.info,
            NoticeLevel::Warning => self.warning,
            NoticeLevel::Error => self.error,
        }
    }
}

impl Default for UiStyles {
    fn default() -> Self {
        Self::new(ColorConfig::default())
    }
}

// ===== Tests =====
