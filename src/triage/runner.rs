//! Test runner invocation
//!
//! Runs the suite as a child process and captures stdout and stderr merged
//! into a single text stream, in the order lines arrive.

use std::io;
use std::path::Path;
use std::process::Stdio;

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use super::host::Host;
use crate::common::config::RunnerConfig;
use crate::common::{display_command, Error, Result};

/// Result of a finished test run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Exit code, `None` if the runner was terminated by a signal
    pub exit_code: Option<i32>,
    /// Combined stdout and stderr, lossily decoded
    pub output: String,
}

impl RunOutput {
    /// Whether the suite passed (exit code zero)
    pub fn passed(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run the configured test suite, echo its output, and return the result
pub async fn execute(host: &dyn Host, config: &RunnerConfig, cwd: &Path) -> Result<RunOutput> {
    println!("{}\n", "▶ Running E2E tests...".cyan().bold());

    let run = host.run_captured(&config.program, &config.args, cwd).await?;
    println!("{}", run.output);

    tracing::debug!(exit_code = ?run.exit_code, bytes = run.output.len(), "Test runner finished");
    Ok(run)
}

/// Spawn `program` in `cwd` and block until it exits
///
/// The program is resolved through PATH first, which also picks up `.cmd`
/// shims such as `npm.cmd` on Windows.
pub async fn spawn_captured(program: &str, args: &[String], cwd: &Path) -> Result<RunOutput> {
    let command_line = display_command(program, args);
    let resolved =
        which::which(program).map_err(|_| Error::RunnerNotFound(program.to_string()))?;

    tracing::debug!(
        program = %resolved.display(),
        cwd = %cwd.display(),
        "Launching test runner"
    );

    let mut child = Command::new(&resolved)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::runner_failed(&command_line, e))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| Error::Internal("Failed to get runner stdout".to_string()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| Error::Internal("Failed to get runner stderr".to_string()))?;

    let merged = collect_merged(stdout, stderr)
        .await
        .map_err(|e| Error::runner_failed(&command_line, e))?;

    let status = child
        .wait()
        .await
        .map_err(|e| Error::runner_failed(&command_line, e))?;

    Ok(RunOutput {
        exit_code: status.code(),
        output: String::from_utf8_lossy(&merged).into_owned(),
    })
}

/// Drain two pipes concurrently, interleaving whole lines as they arrive
///
/// Both pipes are read at the same time so a child blocked on a full stderr
/// pipe cannot stall us while we wait on stdout.
async fn collect_merged<O, E>(stdout: O, stderr: E) -> io::Result<Vec<u8>>
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let mut out = BufReader::new(stdout).split(b'\n');
    let mut err = BufReader::new(stderr).split(b'\n');
    let mut merged = Vec::new();
    let mut out_open = true;
    let mut err_open = true;

    while out_open || err_open {
        tokio::select! {
            segment = out.next_segment(), if out_open => match segment? {
                Some(line) => push_line(&mut merged, &line),
                None => out_open = false,
            },
            segment = err.next_segment(), if err_open => match segment? {
                Some(line) => push_line(&mut merged, &line),
                None => err_open = false,
            },
        }
    }

    Ok(merged)
}

fn push_line(buf: &mut Vec<u8>, line: &[u8]) {
    buf.extend_from_slice(line);
    buf.push(b'\n');
}
