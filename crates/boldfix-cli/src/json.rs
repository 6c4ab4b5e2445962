//! JSON output format for `boldfix check`.
//!
//! A flat, human-readable report: one entry per issue with its position,
//! plus per-rule counts. Paths are relative to the checked root.

use boldfix_core::{IssueRule, ProjectScan};
use serde::Serialize;
use std::path::Path;

/// Root structure for JSON output.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// Version of boldfix that produced this output.
    pub version: String,
    /// Number of Markdown files checked.
    pub files_checked: usize,
    /// Issues found, ordered by file, line and column.
    pub issues: Vec<JsonIssue>,
    /// Files that could not be read.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<JsonFailure>,
    /// Summary counts by rule.
    pub summary: JsonSummary,
}

/// A single issue in JSON format.
#[derive(Debug, Serialize)]
pub struct JsonIssue {
    /// Rule identifier (e.g., split-strong).
    pub rule: String,
    /// File path (forward slashes for cross-platform consistency).
    pub file: String,
    /// Line number (1-based).
    pub line: usize,
    /// Column number (1-based, in characters).
    pub column: usize,
    /// Issue message.
    pub message: String,
    /// Source line the issue was found on.
    pub snippet: String,
}

/// A file that was skipped, in JSON format.
#[derive(Debug, Serialize)]
pub struct JsonFailure {
    /// File path (forward slashes for cross-platform consistency).
    pub file: String,
    /// Why the file could not be checked (symlink, too large, unreadable).
    pub message: String,
}

/// Issue counts by rule.
#[derive(Debug, Default, Serialize)]
pub struct JsonSummary {
    /// Bold markers torn across two lines.
    pub split_strong: usize,
    /// Literal `**...**` left as plain text.
    pub unparsed_strong: usize,
    /// Parsed bold spans flush against surrounding text.
    pub flush_strong: usize,
    /// Number of issues across all rules.
    pub total: usize,
}

fn path_to_string(path: &Path, base_path: &Path) -> String {
    // Relative to the scanned root, forward slashes on every platform
    path.strip_prefix(base_path)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Convert a project scan to JSON output format.
///
/// Counts and issues come from a single pass over the diagnostics, which
/// keep the order `scan_project` produced.
pub fn scan_to_json(report: &ProjectScan, base_path: &Path) -> JsonOutput {
    let mut summary = JsonSummary::default();

    let issues: Vec<JsonIssue> = report
        .diagnostics
        .iter()
        .map(|diag| {
            match diag.issue.rule {
                IssueRule::SplitStrong => summary.split_strong += 1,
                IssueRule::UnparsedStrong => summary.unparsed_strong += 1,
                IssueRule::FlushStrong => summary.flush_strong += 1,
            }
            JsonIssue {
                rule: diag.issue.rule.to_string(),
                file: path_to_string(&diag.file, base_path),
                line: diag.issue.line,
                column: diag.issue.column,
                message: diag.issue.message.clone(),
                snippet: diag.issue.snippet.clone(),
            }
        })
        .collect();
    summary.total = issues.len();

    let failures = report
        .failures
        .iter()
        .map(|failure| JsonFailure {
            file: path_to_string(&failure.file, base_path),
            message: failure.message.clone(),
        })
        .collect();

    JsonOutput {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files_checked: report.files_checked,
        issues,
        failures,
        summary,
    }
}
