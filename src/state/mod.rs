//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod notice;
pub mod overlay;
pub mod query_input;
pub mod session;

// Re-export for convenience
pub use app_state::{AppState, FocusPane};
pub use notice::{Notice, NoticeLevel, NotificationCenter};
pub use overlay::OverlayState;
pub use query_input::QueryInput;
pub use session::{FetchOutcome, SearchSession, SessionSnapshot, SubmitOutcome};
