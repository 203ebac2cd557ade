//! CLI command handling
//!
//! Dispatches CLI commands to the triage steps and maps them to an exit code.

use std::path::Path;

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::triage::{self, report, summary, trace, SystemHost};

/// Dispatch a CLI command, returning the process exit code
pub async fn dispatch(command: Commands, config_path: Option<&Path>) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let config = Config::load(config_path, &cwd)?;
    let host = SystemHost;

    match command {
        Commands::Run => {
            let outcome = triage::run_pipeline(&host, &config, &cwd).await?;
            Ok(outcome.exit_code())
        }

        Commands::Summarize { log } => {
            let content = std::fs::read(&log).map_err(|e| Error::FileRead {
                path: log.display().to_string(),
                error: e.to_string(),
            })?;
            summary::print_summary(&String::from_utf8_lossy(&content));
            Ok(0)
        }

        Commands::Report => {
            report::open_report(&host, &cwd, &config.report).await?;
            Ok(0)
        }

        Commands::Trace => {
            trace::open_latest_trace(&host, &cwd, &config.trace).await?;
            Ok(0)
        }
    }
}
