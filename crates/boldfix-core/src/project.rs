//! Batch scanning and fixing over a directory tree

use crate::config::BoldFixConfig;
use crate::diagnostics::{BoldFixResult, Diagnostic, FileFailure};
use crate::file_utils::safe_read_file_with_limit;
use crate::fixes::{fix_file, FixResult};
use crate::scanner::{scan, ScanOptions};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Outcome of scanning many files
#[derive(Debug, Default)]
pub struct ProjectScan {
    pub files_checked: usize,
    /// Sorted by file, then line and column
    pub diagnostics: Vec<Diagnostic>,
    pub failures: Vec<FileFailure>,
}

/// Outcome of fixing many files
#[derive(Debug, Default)]
pub struct ProjectFix {
    pub files_checked: usize,
    /// Files whose content changed, sorted by path
    pub changed: Vec<FixResult>,
    pub failures: Vec<FileFailure>,
}

/// Scan a single file
pub fn scan_file(path: &Path, config: &BoldFixConfig) -> BoldFixResult<Vec<Diagnostic>> {
    let content = safe_read_file_with_limit(path, config.max_file_size)?;
    let issues = scan(&content, &ScanOptions::from(config));
    debug!(path = %path.display(), issues = issues.len(), "scanned file");

    Ok(issues
        .into_iter()
        .map(|issue| Diagnostic::new(path.to_path_buf(), issue))
        .collect())
}

/// Markdown files under `root`, sorted. A file path is returned as is.
///
/// The walk honours `.gitignore` and hidden-file rules; the configured
/// exclude globs are matched against the path relative to `root`.
pub fn collect_markdown_files(root: &Path, config: &BoldFixConfig) -> BoldFixResult<Vec<PathBuf>> {
    use ignore::WalkBuilder;

    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let exclude_patterns = config.exclude_patterns()?;

    // Sequential walk, parallel processing
    let mut paths: Vec<PathBuf> = WalkBuilder::new(root)
        .standard_filters(true)
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .filter(|entry| config.is_markdown(entry.path()))
        .filter(|entry| {
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let relative = relative.to_string_lossy().replace('\\', "/");
            !exclude_patterns.iter().any(|p| p.matches(&relative))
        })
        .map(|entry| entry.into_path())
        .collect();

    paths.sort();
    Ok(paths)
}

/// Scan every Markdown file under `root` in parallel
pub fn scan_project(root: &Path, config: &BoldFixConfig) -> BoldFixResult<ProjectScan> {
    let paths = collect_markdown_files(root, config)?;

    let results: Vec<(PathBuf, BoldFixResult<Vec<Diagnostic>>)> = paths
        .par_iter()
        .map(|path| (path.clone(), scan_file(path, config)))
        .collect();

    let mut report = ProjectScan {
        files_checked: paths.len(),
        ..ProjectScan::default()
    };
    for (path, result) in results {
        match result {
            Ok(diagnostics) => report.diagnostics.extend(diagnostics),
            Err(e) => report.failures.push(FileFailure::new(path, &e)),
        }
    }

    report.diagnostics.sort_by(|a, b| {
        a.file
            .cmp(&b.file)
            .then_with(|| a.issue.line.cmp(&b.issue.line))
            .then_with(|| a.issue.column.cmp(&b.issue.column))
            .then_with(|| a.issue.rule.cmp(&b.issue.rule))
    });

    Ok(report)
}

/// Fix every Markdown file under `root` in parallel
pub fn fix_project(root: &Path, config: &BoldFixConfig, dry_run: bool) -> BoldFixResult<ProjectFix> {
    let paths = collect_markdown_files(root, config)?;

    let results: Vec<(PathBuf, BoldFixResult<FixResult>)> = paths
        .par_iter()
        .map(|path| (path.clone(), fix_file(path, config, dry_run)))
        .collect();

    let mut report = ProjectFix {
        files_checked: paths.len(),
        ..ProjectFix::default()
    };
    for (path, result) in results {
        match result {
            Ok(fixed) if fixed.has_changes() => report.changed.push(fixed),
            Ok(_) => {}
            Err(e) => report.failures.push(FileFailure::new(path, &e)),
        }
    }

    Ok(report)
}
