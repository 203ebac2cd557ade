//! Side effects on the outside world
//!
//! The pipeline never spawns a process directly; it asks a [`Host`]. The
//! binary uses [`SystemHost`], tests substitute a recording fake.

use std::path::Path;

use async_trait::async_trait;

use super::runner::{self, RunOutput};
use super::{report, trace};
use crate::common::Result;

/// Process and desktop operations needed by the pipeline
#[async_trait]
pub trait Host: Send + Sync {
    /// Run a command to completion, capturing stdout and stderr as one stream
    async fn run_captured(&self, program: &str, args: &[String], cwd: &Path) -> Result<RunOutput>;

    /// Open a local file with the given opener command, or the platform default
    async fn open_file(&self, path: &Path, opener: Option<&[String]>) -> Result<()>;

    /// Run the trace viewer on `trace` and wait for it to exit
    async fn run_viewer(
        &self,
        program: &str,
        args: &[String],
        trace: &Path,
        cwd: &Path,
    ) -> Result<()>;
}

/// Host backed by real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

#[async_trait]
impl Host for SystemHost {
    async fn run_captured(&self, program: &str, args: &[String], cwd: &Path) -> Result<RunOutput> {
        runner::spawn_captured(program, args, cwd).await
    }

    async fn open_file(&self, path: &Path, opener: Option<&[String]>) -> Result<()> {
        report::open_with_handler(path, opener).await
    }

    async fn run_viewer(
        &self,
        program: &str,
        args: &[String],
        trace: &Path,
        cwd: &Path,
    ) -> Result<()> {
        trace::launch_viewer(program, args, trace, cwd).await
    }
}
