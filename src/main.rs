//! E2E Triage CLI - run the end-to-end suite and open the evidence on failure
//!
//! Exit status is 0 when the suite passes and 1 when it fails or when the
//! tool itself hits an error.

use std::path::PathBuf;

use clap::Parser;
use e2e_triage::{cli, common::logging};
use e2e_triage::commands::Commands;

#[derive(Parser)]
#[command(name = "e2e-triage", about = "Run E2E tests and triage failures")]
#[command(version, long_about = None)]
struct Cli {
    /// Configuration file (default: ./e2e-triage.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    logging::init_cli();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    let code = match cli::dispatch(command, cli.config.as_deref()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    };

    std::process::exit(code);
}
