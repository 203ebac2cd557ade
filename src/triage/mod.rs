//! E2E failure triage
//!
//! Runs the end-to-end suite and, when it fails, walks the developer to the
//! evidence: the failed case names, the HTML report, and the newest trace.

pub mod host;
pub mod report;
pub mod runner;
pub mod summary;
pub mod trace;

use std::path::Path;

use colored::Colorize;

use crate::common::config::Config;
use crate::common::{Error, Result};

pub use host::{Host, SystemHost};
pub use runner::RunOutput;

/// Final verdict of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
}

impl Outcome {
    /// Process exit status for this outcome
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Passed => 0,
            Outcome::Failed => 1,
        }
    }
}

/// Run the suite and triage a failure
///
/// A passing run touches nothing else. A failing run prints the summary,
/// then tries the report and then the trace; a failure in either of those
/// is reported and does not stop the next step.
pub async fn run_pipeline(host: &dyn Host, config: &Config, cwd: &Path) -> Result<Outcome> {
    let run = runner::execute(host, &config.runner, cwd).await?;

    if run.passed() {
        println!("\n{}", "✅ All tests passed!".green().bold());
        return Ok(Outcome::Passed);
    }

    println!("\n{}", "❌ Test failures found.".red().bold());

    let failures = summary::print_summary(&run.output);
    tracing::debug!(failures, "Summarized failures");

    if let Err(e) = report::open_report(host, cwd, &config.report).await {
        step_failed("report", &e);
    }

    if let Err(e) = trace::open_latest_trace(host, cwd, &config.trace).await {
        step_failed("trace", &e);
    }

    Ok(Outcome::Failed)
}

fn step_failed(step: &str, error: &Error) {
    tracing::warn!(step, "Triage step failed: {}", error);
    println!("{} {}", "✗".red(), error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Run(String),
        Open(PathBuf),
        Viewer(PathBuf),
    }

    /// Host that replays a canned run and records everything asked of it
    struct FakeHost {
        run: RunOutput,
        fail_open: bool,
        fail_viewer: bool,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeHost {
        fn new(exit_code: i32, output: &str) -> Self {
            Self {
                run: RunOutput {
                    exit_code: Some(exit_code),
                    output: output.to_string(),
                },
                fail_open: false,
                fail_viewer: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Host for FakeHost {
        async fn run_captured(&self, program: &str, args: &[String], _cwd: &Path) -> Result<RunOutput> {
            let line = crate::common::display_command(program, args);
            self.calls.lock().unwrap().push(Call::Run(line));
            Ok(self.run.clone())
        }

        async fn open_file(&self, path: &Path, _opener: Option<&[String]>) -> Result<()> {
            self.calls.lock().unwrap().push(Call::Open(path.to_path_buf()));
            if self.fail_open {
                return Err(Error::report_open(path, "permission denied"));
            }
            Ok(())
        }

        async fn run_viewer(
            &self,
            _program: &str,
            _args: &[String],
            trace: &Path,
            _cwd: &Path,
        ) -> Result<()> {
            self.calls.lock().unwrap().push(Call::Viewer(trace.to_path_buf()));
            if self.fail_viewer {
                return Err(Error::viewer_failed("npx playwright show-trace", "not found in PATH"));
            }
            Ok(())
        }
    }

    fn write_report(dir: &Path) -> PathBuf {
        let path = dir.join("playwright-report/index.html");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "<html></html>").unwrap();
        path
    }

    fn write_trace(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join("test-results").join(name).join("trace.zip");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"PK").unwrap();
        path
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Outcome::Passed.exit_code(), 0);
        assert_eq!(Outcome::Failed.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_passing_run_opens_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write_report(dir.path());
        write_trace(dir.path(), "a");
        let host = FakeHost::new(0, "Suite › caseA passed\n");

        let outcome = run_pipeline(&host, &Config::default(), dir.path()).await.unwrap();

        assert_eq!(outcome, Outcome::Passed);
        assert_eq!(host.calls(), vec![Call::Run("npm run test:e2e".to_string())]);
    }

    #[tokio::test]
    async fn test_failing_run_opens_report_then_trace() {
        let dir = tempfile::tempdir().unwrap();
        let report = write_report(dir.path());
        let trace = write_trace(dir.path(), "suite-caseA-chromium");
        let host = FakeHost::new(1, "Suite › caseA failed\nSuite › caseB passed\n");

        let outcome = run_pipeline(&host, &Config::default(), dir.path()).await.unwrap();

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(
            host.calls(),
            vec![
                Call::Run("npm run test:e2e".to_string()),
                Call::Open(report),
                Call::Viewer(trace),
            ]
        );
    }

    #[tokio::test]
    async fn test_failing_run_without_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let host = FakeHost::new(2, "Error: no tests found\n");

        let outcome = run_pipeline(&host, &Config::default(), dir.path()).await.unwrap();

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(host.calls(), vec![Call::Run("npm run test:e2e".to_string())]);
    }

    #[tokio::test]
    async fn test_trace_step_runs_after_report_error() {
        let dir = tempfile::tempdir().unwrap();
        let report = write_report(dir.path());
        let trace = write_trace(dir.path(), "x");
        let mut host = FakeHost::new(1, "");
        host.fail_open = true;

        let outcome = run_pipeline(&host, &Config::default(), dir.path()).await.unwrap();

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(
            host.calls(),
            vec![
                Call::Run("npm run test:e2e".to_string()),
                Call::Open(report),
                Call::Viewer(trace),
            ]
        );
    }

    #[tokio::test]
    async fn test_viewer_error_still_fails_run() {
        let dir = tempfile::tempdir().unwrap();
        let report = write_report(dir.path());
        let trace = write_trace(dir.path(), "x");
        let mut host = FakeHost::new(1, "Suite › caseA failed\n");
        host.fail_viewer = true;

        let outcome = run_pipeline(&host, &Config::default(), dir.path()).await.unwrap();

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(
            host.calls(),
            vec![
                Call::Run("npm run test:e2e".to_string()),
                Call::Open(report),
                Call::Viewer(trace),
            ]
        );
    }

    #[tokio::test]
    async fn test_bad_trace_pattern_still_fails_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::parse("[trace]\npattern = \"test-results/***/trace.zip\"\n").unwrap();
        let host = FakeHost::new(1, "");

        let outcome = run_pipeline(&host, &config, dir.path()).await.unwrap();

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(host.calls(), vec![Call::Run("npm run test:e2e".to_string())]);
    }

    #[tokio::test]
    async fn test_newest_trace_is_shown() {
        let dir = tempfile::tempdir().unwrap();
        write_trace(dir.path(), "z");
        std::thread::sleep(std::time::Duration::from_millis(50));
        let newest = write_trace(dir.path(), "a");
        let host = FakeHost::new(1, "");
        let config = Config::default();

        let status = trace::open_latest_trace(&host, dir.path(), &config.trace)
            .await
            .unwrap();

        assert_eq!(status, trace::TraceStatus::Opened(newest.clone()));
        assert_eq!(host.calls(), vec![Call::Viewer(newest)]);
    }

    #[tokio::test]
    async fn test_signal_killed_runner_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = FakeHost::new(0, "");
        host.run.exit_code = None;

        let outcome = run_pipeline(&host, &Config::default(), dir.path()).await.unwrap();
        assert_eq!(outcome, Outcome::Failed);
    }

    #[tokio::test]
    async fn test_configured_runner_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::parse("[runner]\nprogram = \"pnpm\"\nargs = [\"e2e\"]\n").unwrap();
        let host = FakeHost::new(0, "");

        run_pipeline(&host, &config, dir.path()).await.unwrap();
        assert_eq!(host.calls(), vec![Call::Run("pnpm e2e".to_string())]);
    }

    #[tokio::test]
    async fn test_report_missing_status() {
        let dir = tempfile::tempdir().unwrap();
        let host = FakeHost::new(1, "");
        let config = Config::default();

        let status = report::open_report(&host, dir.path(), &config.report).await.unwrap();
        assert_eq!(
            status,
            report::ReportStatus::Missing(dir.path().join("playwright-report/index.html"))
        );
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn test_trace_missing_does_not_launch_viewer() {
        let dir = tempfile::tempdir().unwrap();
        let host = FakeHost::new(1, "");
        let config = Config::default();

        let status = trace::open_latest_trace(&host, dir.path(), &config.trace)
            .await
            .unwrap();
        assert_eq!(status, trace::TraceStatus::Missing);
        assert!(host.calls().is_empty());
    }
}
