//! # boldfix-core
//!
//! Repair engine for `**bold**` spans in Chinese Markdown.
//!
//! CommonMark refuses to open or close `**` when the marker sits between a
//! CJK character and punctuation, and hard-wrapped sources sometimes tear a
//! marker across two lines. The engine:
//! - rejoins `**` markers split by a line break (outside code fences)
//! - inserts a single space where a CJK bold span touches a letter or digit
//! - reports both problems read-only for review before a bulk fix
//!
//! [`fix_chinese_bold`] and [`find_chinese_bold_issues`] are pure functions
//! over a string. The file and project helpers add safe I/O, parallel batch
//! processing and blog post discovery on top.

pub mod config;
pub mod diagnostics;
pub mod file_utils;
pub mod fixes;
pub mod insertion;
pub mod parsers;
pub mod posts;
pub mod project;
mod regex_util;
pub mod rules;
pub mod scanner;
pub mod spacing;

pub use config::{BoldFixConfig, EngineOptions, RuleConfig};
pub use diagnostics::{
    BoldFixError, BoldFixResult, Diagnostic, FileFailure, Issue, IssueRule,
};
pub use fixes::{fix_file, FixResult};
pub use insertion::{apply_insertions, Insertion, InsertionSet};
pub use posts::{list_posts, Post, PostTimestamp};
pub use project::{
    collect_markdown_files, fix_project, scan_file, scan_project, ProjectFix, ProjectScan,
};
pub use rules::split_strong::repair_split_strong_markers;
pub use scanner::{find_chinese_bold_issues, scan, ScanOptions};
pub use spacing::{fix_chinese_bold, fix_chinese_bold_with, fix_with_report, FixOutcome};
