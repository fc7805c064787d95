//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Character input while the search bar has focus bypasses this table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Result navigation
    /// Move selection to the previous result. Default: k/↑
    SelectPrev,
    /// Move selection to the next result. Default: j/↓
    SelectNext,
    /// Move selection up by one page. Default: Ctrl+u/Page Up
    PageUp,
    /// Move selection down by one page. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to first result. Default: g/Home
    SelectFirst,
    /// Jump to last result. Default: G/End
    SelectLast,

    // Search
    /// Move focus to the search bar. Default: / or i
    FocusSearch,
    /// Toggle focus between search bar and results. Default: Tab
    CycleFocus,
    /// Request the next page of results. Default: m
    LoadMore,
    /// Re-issue the most recent failed fetch. Default: r
    Retry,

    // Overlay
    /// Open the detail overlay for the selected result. Default: Enter/Space
    OpenDetail,
    /// Close the detail or help overlay. Default: Esc
    CloseOverlay,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
    /// Show help overlay with keyboard shortcuts. Default: ?
    Help,
}
