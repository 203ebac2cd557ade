//! Configuration file handling
//!
//! Every setting has a built-in default matching a stock Playwright project,
//! so the tool runs without any configuration file at all.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::{config_path, local_config_path};
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// How to invoke the end-to-end test suite
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Where the HTML report lives and how to open it
    #[serde(default)]
    pub report: ReportConfig,

    /// Where trace archives live and which viewer shows them
    #[serde(default)]
    pub trace: TraceConfig,
}

/// Test runner invocation
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Executable name or path, resolved through PATH
    #[serde(default = "default_runner_program")]
    pub program: String,

    /// Arguments passed to the runner
    #[serde(default = "default_runner_args")]
    pub args: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: default_runner_program(),
            args: default_runner_args(),
        }
    }
}

fn default_runner_program() -> String {
    "npm".to_string()
}

fn default_runner_args() -> Vec<String> {
    vec!["run".to_string(), "test:e2e".to_string()]
}

/// HTML report settings
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Report file, relative to the working directory
    #[serde(default = "default_report_path")]
    pub path: PathBuf,

    /// Command used instead of the platform's default handler.
    /// The report path is appended as the last argument.
    #[serde(default)]
    pub opener: Option<Vec<String>>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: default_report_path(),
            opener: None,
        }
    }
}

fn default_report_path() -> PathBuf {
    PathBuf::from("playwright-report").join("index.html")
}

/// Trace archive settings
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TraceConfig {
    /// Glob matched relative to the working directory
    #[serde(default = "default_trace_pattern")]
    pub pattern: String,

    /// Viewer executable
    #[serde(default = "default_viewer")]
    pub viewer: String,

    /// Arguments placed before the trace path
    #[serde(default = "default_viewer_args")]
    pub viewer_args: Vec<String>,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            pattern: default_trace_pattern(),
            viewer: default_viewer(),
            viewer_args: default_viewer_args(),
        }
    }
}

fn default_trace_pattern() -> String {
    "test-results/**/trace.zip".to_string()
}

fn default_viewer() -> String {
    "npx".to_string()
}

fn default_viewer_args() -> Vec<String> {
    vec!["playwright".to_string(), "show-trace".to_string()]
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist. Otherwise `e2e-triage.toml` in `cwd` is
    /// tried, then the per-user config file. Returns defaults if none exist.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "config file '{}' does not exist",
                    path.display()
                )));
            }
            return Self::from_file(path);
        }

        let local = local_config_path(cwd);
        if local.exists() {
            return Self::from_file(&local);
        }

        if let Some(path) = config_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        tracing::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Read and parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }
}
