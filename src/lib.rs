//! picseek
//!
//! Terminal client for paged image search.
//!
//! The crate follows a Pure Core / Impure Shell split: [`state`] holds the
//! search session and UI state as plain data with transitions that return
//! fetch requests, while [`fetch`] and [`view`] perform HTTP and terminal IO.

pub mod config;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;
