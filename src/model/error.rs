//! Error types for picseek.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all fatal failures
//!   - [`ConfigError`](crate::config::ConfigError) - Config file read/parse/validation failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing subscriber setup failures
//!   - `std::io::Error` - Terminal/TUI rendering failures
//! - [`FetchError`] - Remote search failures (never fatal, see below)
//!
//! # Error Recovery Strategy
//!
//! Fetch errors are **non-fatal**: the search session clears its loading flag,
//! leaves accumulated results untouched and surfaces the message as a transient
//! notice. The user may retry with load-more or a new query. Validation
//! rejections (empty or duplicate query) are not errors at all; they are
//! outcomes of [`SearchSession::submit`](crate::state::SearchSession::submit).
//!
//! Only configuration, logging and terminal errors are fatal and propagate to
//! `main`.

use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
///
/// All domain-specific error types convert to `AppError` via `From`, enabling
/// clean error propagation with the `?` operator.
///
/// # Examples
///
/// ```no_run
/// use picseek::model::AppError;
/// use picseek::config::load_config_with_precedence;
///
/// fn load() -> Result<(), AppError> {
///     // ConfigError converts to AppError via From
///     let _file = load_config_with_precedence(None)?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or failed validation.
    ///
    /// **Recovery**: Print the error to stderr and exit. The user has to fix the
    /// config file, environment variable or CLI flag named in the message.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The tracing subscriber could not be installed.
    ///
    /// **Recovery**: Print to stderr and exit before the terminal is taken over.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal or TUI rendering error.
    ///
    /// Failures in the crossterm/ratatui layer: raw mode, alternate screen,
    /// broken pipes while drawing. Without a working terminal the client
    /// cannot function.
    ///
    /// **Recovery**: Restore the terminal, then exit with the message on stderr.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failure of a single remote page retrieval.
///
/// Returned by [`ResultFetcher::fetch`](crate::fetch::ResultFetcher::fetch).
/// Every variant carries a human-readable message because the session shows
/// it verbatim in the status bar.
///
/// # Recovery
///
/// Recovered at the fetch boundary by
/// [`SearchSession::complete_fetch`](crate::state::SearchSession::complete_fetch):
/// loading is cleared, results are left as they were, and the error text
/// becomes a [`Notice::FetchFailed`](crate::state::Notice::FetchFailed).
/// Nothing is retried automatically.
///
/// # Examples
///
/// ```
/// use picseek::model::FetchError;
///
/// let err = FetchError::Status { status: 429, body: "Too Many Requests".to_string() };
/// assert!(err.to_string().contains("429"));
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// No API key was configured for the search endpoint.
    ///
    /// Raised before any request is sent so the user learns how to fix it
    /// instead of seeing an opaque 400 from the server.
    #[error("No API key configured: set PICSEEK_API_KEY or `api_key` in config.toml")]
    MissingApiKey,

    /// The request never produced an HTTP response.
    ///
    /// Connection refused, DNS failure, TLS failure or timeout.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("Server responded with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body (trimmed), usually a short plain-text reason.
        body: String,
    },

    /// The response body was not the expected JSON document.
    #[error("Malformed response: {0}")]
    Decode(String),
}
