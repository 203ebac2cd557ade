//! Error types for the triage CLI
//!
//! Messages are meant to be read by a developer at a terminal, so they name
//! the command or path involved and, where it helps, what to check.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the triage CLI
#[derive(Error, Debug)]
pub enum Error {
    // === Test Runner Errors ===
    #[error("Test runner '{0}' not found in PATH. Is it installed?")]
    RunnerNotFound(String),

    #[error("Failed to run '{command}': {source}")]
    RunnerFailed {
        command: String,
        #[source]
        source: io::Error,
    },

    // === Artifact Errors ===
    #[error("Failed to open report '{}': {reason}", .path.display())]
    ReportOpen { path: PathBuf, reason: String },

    #[error("Invalid trace pattern '{pattern}': {reason}")]
    TracePattern { pattern: String, reason: String },

    #[error("Trace viewer '{command}' failed: {reason}")]
    ViewerFailed { command: String, reason: String },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Internal Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a runner failure error for a command line
    pub fn runner_failed(command: &str, source: io::Error) -> Self {
        Self::RunnerFailed {
            command: command.to_string(),
            source,
        }
    }

    /// Create a viewer failure error
    pub fn viewer_failed(command: &str, reason: impl ToString) -> Self {
        Self::ViewerFailed {
            command: command.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a report open error
    pub fn report_open(path: &std::path::Path, reason: impl ToString) -> Self {
        Self::ReportOpen {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
