//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod key_action;
pub mod query;
pub mod result_item;

// Re-export for convenience
pub use error::{AppError, FetchError};
pub use key_action::KeyAction;
pub use query::{PageNumber, SearchQuery, DEFAULT_QUERY};
pub use result_item::{ResultId, ResultItem, ResultPage};
