//! Failure summary
//!
//! Playwright's list reporter prints one line per test case in the form
//! `[browser] › file.spec.js:12:3 › Suite › case`, and marks failed cases
//! with the word `failed` in its summary. We keep every line carrying both.

use std::io::{self, Write};

use colored::Colorize;

/// Separator between suite, file and case names
pub const CASE_DELIMITER: char = '\u{203A}';

/// Token marking a failed case
pub const FAILURE_TOKEN: &str = "failed";

/// Lines of `output` that announce a failed test case, in input order
pub fn failed_lines(output: &str) -> Vec<&str> {
    output
        .lines()
        .filter(|line| line.contains(CASE_DELIMITER) && line.contains(FAILURE_TOKEN))
        .collect()
}

/// Print the failure summary for `output` to stdout
///
/// Returns the number of failure lines found.
pub fn print_summary(output: &str) -> usize {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match write_summary(&mut handle, output) {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!("Failed to write failure summary: {}", e);
            0
        }
    }
}

/// Write the failure summary for `output` to `out`
pub fn write_summary<W: Write>(out: &mut W, output: &str) -> io::Result<usize> {
    writeln!(out, "\n{}\n", "🧠 Failure summary:".cyan().bold())?;

    let failures = failed_lines(output);
    if failures.is_empty() {
        writeln!(
            out,
            "{}",
            "Could not extract a failed test name. Check the report.".yellow()
        )?;
    } else {
        for line in &failures {
            writeln!(out, "{} {}", "❌".red(), line)?;
        }
    }

    Ok(failures.len())
}
