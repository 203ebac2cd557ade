//! E2E Triage - run an end-to-end suite and surface what failed
//!
//! This library runs the project's end-to-end tests and, on failure, prints
//! the failed cases and opens the HTML report and the newest trace archive.

pub mod cli;
pub mod commands;
pub mod common;
pub mod triage;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use triage::{run_pipeline, Host, Outcome, RunOutput};
