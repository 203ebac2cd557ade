//! HTML report opener

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use colored::Colorize;
use tokio::process::Command;

use super::host::Host;
use crate::common::config::ReportConfig;
use crate::common::{Error, Result};

/// What the report step found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    /// The report existed and was handed to the opener
    Opened(PathBuf),
    /// No report at the expected path
    Missing(PathBuf),
}

/// Absolute path of the report for `cwd`
pub fn report_path(cwd: &Path, config: &ReportConfig) -> PathBuf {
    cwd.join(&config.path)
}

/// Open the report if it exists, otherwise print a warning
pub async fn open_report(host: &dyn Host, cwd: &Path, config: &ReportConfig) -> Result<ReportStatus> {
    let path = report_path(cwd, config);

    if !path.exists() {
        println!(
            "\n{} No Playwright report found at {}.",
            "⚠".yellow(),
            config.path.display()
        );
        return Ok(ReportStatus::Missing(path));
    }

    println!("\n{}", "📊 Opening Playwright report...".cyan());
    host.open_file(&path, config.opener.as_deref()).await?;
    Ok(ReportStatus::Opened(path))
}

/// The platform's "open with default application" command
///
/// The file path is appended after the returned arguments.
pub fn default_opener() -> (&'static str, Vec<&'static str>) {
    if cfg!(target_os = "macos") {
        ("open", vec![])
    } else if cfg!(windows) {
        // the empty string is the window title consumed by `start`
        ("cmd", vec!["/C", "start", ""])
    } else {
        ("xdg-open", vec![])
    }
}

/// Hand `path` to an opener without waiting for the application to exit
pub async fn open_with_handler(path: &Path, opener: Option<&[String]>) -> Result<()> {
    let (program, mut args): (String, Vec<OsString>) = match opener {
        Some([program, rest @ ..]) => (program.clone(), rest.iter().map(OsString::from).collect()),
        Some([]) => {
            return Err(Error::Config("report.opener must not be empty".to_string()));
        }
        None => {
            let (program, args) = default_opener();
            (program.to_string(), args.into_iter().map(OsString::from).collect())
        }
    };
    args.push(path.as_os_str().to_os_string());

    let resolved = which::which(&program)
        .map_err(|_| Error::report_open(path, format!("opener '{}' not found in PATH", program)))?;

    tracing::debug!(opener = %resolved.display(), path = %path.display(), "Opening report");

    Command::new(&resolved)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| Error::report_open(path, e))?;

    Ok(())
}
