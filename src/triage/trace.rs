//! Trace archive discovery and viewer launch

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::SystemTime;

use colored::Colorize;
use tokio::process::Command;

use super::host::Host;
use crate::common::config::TraceConfig;
use crate::common::{display_command, Error, Result};

/// What the trace step found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceStatus {
    /// The newest trace was shown in the viewer
    Opened(PathBuf),
    /// The pattern matched nothing
    Missing,
}

/// All files under `cwd` matching `pattern`, in glob order
///
/// Wildcards never match a leading dot, so `**` does not descend into
/// hidden directories.
pub fn find_traces(cwd: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let base = glob::Pattern::escape(&cwd.to_string_lossy());
    let full = format!("{}/{}", base.trim_end_matches('/'), pattern);
    let options = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..Default::default()
    };

    let entries = glob::glob_with(&full, options).map_err(|e| Error::TracePattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let mut traces = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => traces.push(path),
            Ok(_) => {}
            Err(e) => tracing::debug!("Skipping unreadable path: {}", e),
        }
    }
    Ok(traces)
}

/// Filesystem creation time, or modification time where birth time is unavailable
pub fn creation_time(path: &Path) -> Option<SystemTime> {
    let meta = std::fs::metadata(path).ok()?;
    meta.created().or_else(|_| meta.modified()).ok()
}

/// Pick the candidate with the greatest timestamp
///
/// Ties keep the earliest candidate.
pub fn select_latest<I>(candidates: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = (PathBuf, SystemTime)>,
{
    let mut latest: Option<(PathBuf, SystemTime)> = None;
    for (path, time) in candidates {
        if latest.as_ref().map_or(true, |(_, best)| time > *best) {
            latest = Some((path, time));
        }
    }
    latest.map(|(path, _)| path)
}

/// The most recently created trace under `cwd`
pub fn latest_trace(cwd: &Path, pattern: &str) -> Result<Option<PathBuf>> {
    let candidates = find_traces(cwd, pattern)?
        .into_iter()
        .filter_map(|path| match creation_time(&path) {
            Some(time) => Some((path, time)),
            None => {
                tracing::debug!(path = %path.display(), "No timestamp for trace, skipping");
                None
            }
        });
    Ok(select_latest(candidates))
}

/// Show the newest trace in the viewer, or print a warning if there is none
pub async fn open_latest_trace(
    host: &dyn Host,
    cwd: &Path,
    config: &TraceConfig,
) -> Result<TraceStatus> {
    let Some(trace) = latest_trace(cwd, &config.pattern)? else {
        println!("\n{} No trace.zip found.", "⚠".yellow());
        return Ok(TraceStatus::Missing);
    };

    let shown = trace.strip_prefix(cwd).unwrap_or(&trace);
    println!(
        "\n{}\n{}\n",
        "🧭 Opening latest trace:".cyan(),
        shown.display()
    );

    host.run_viewer(&config.viewer, &config.viewer_args, &trace, cwd)
        .await?;
    Ok(TraceStatus::Opened(trace))
}

/// Run the viewer in the foreground and wait for it to exit
pub async fn launch_viewer(program: &str, args: &[String], trace: &Path, cwd: &Path) -> Result<()> {
    let command_line = display_command(program, args);
    let resolved = which::which(program)
        .map_err(|_| Error::viewer_failed(&command_line, "not found in PATH"))?;

    tracing::debug!(viewer = %resolved.display(), trace = %trace.display(), "Launching trace viewer");

    let status = Command::new(&resolved)
        .args(args)
        .arg(trace)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| Error::viewer_failed(&command_line, e))?;

    if !status.success() {
        tracing::warn!("Trace viewer exited with {}", status);
    }
    Ok(())
}
