//! Fix application for files on disk

use crate::config::BoldFixConfig;
use crate::diagnostics::BoldFixResult;
use crate::file_utils::{safe_read_file_with_limit, safe_write_file};
use crate::spacing::fix_with_report;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Result of fixing one file
#[derive(Debug, Clone)]
pub struct FixResult {
    /// Path to the file
    pub path: PathBuf,
    /// Original file content
    pub original: String,
    /// Content after fixes applied
    pub fixed: String,
    /// Torn `**` markers rejoined
    pub joined_lines: usize,
    /// Spaces inserted around bold spans
    pub insertions: usize,
}

impl FixResult {
    /// Check if any fixes were actually applied
    pub fn has_changes(&self) -> bool {
        self.original != self.fixed
    }
}

/// Fix one Markdown file.
///
/// The file is written back only when the fixed text differs from what was
/// read, and never when `dry_run` is set.
pub fn fix_file(path: &Path, config: &BoldFixConfig, dry_run: bool) -> BoldFixResult<FixResult> {
    let original = safe_read_file_with_limit(path, config.max_file_size)?;
    let outcome = fix_with_report(&original, &config.engine);

    let result = FixResult {
        path: path.to_path_buf(),
        fixed: outcome.text,
        original,
        joined_lines: outcome.joined_lines,
        insertions: outcome.insertions,
    };

    if result.has_changes() && !dry_run {
        safe_write_file(path, &result.fixed)?;
    }
    debug!(
        path = %path.display(),
        changed = result.has_changes(),
        dry_run,
        "fixed file"
    );

    Ok(result)
}
