//! CLI command definitions
//!
//! Defines the clap commands for the triage CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq, Default)]
pub enum Commands {
    /// Run the E2E suite; on failure summarize it and open the report and latest trace
    #[default]
    Run,

    /// Print the failure summary for a saved test log
    Summarize {
        /// Path to a captured test runner log
        log: PathBuf,
    },

    /// Open the HTML report, if one exists
    Report,

    /// Open the most recently created trace archive in the trace viewer
    #[command(alias = "show-trace")]
    Trace,
}

