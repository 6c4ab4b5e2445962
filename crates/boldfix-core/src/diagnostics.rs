//! Issue records and error types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type BoldFixResult<T> = Result<T, BoldFixError>;

/// Which check produced an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueRule {
    /// A `**` marker torn across a line break (`*` / `*`)
    SplitStrong,
    /// Literal `**...**` with CJK content left as plain text by the parser
    UnparsedStrong,
    /// Parsed bold span with CJK content flush against a word character
    FlushStrong,
}

impl IssueRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueRule::SplitStrong => "split-strong",
            IssueRule::UnparsedStrong => "unparsed-strong",
            IssueRule::FlushStrong => "flush-strong",
        }
    }
}

impl fmt::Display for IssueRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding from the scanner. Never mutates the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub rule: IssueRule,
    /// 1-based line
    pub line: usize,
    /// 1-based column, counted in characters
    pub column: usize,
    pub message: String,
    pub snippet: String,
}

impl Issue {
    pub fn new(
        rule: IssueRule,
        line: usize,
        column: usize,
        message: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            line,
            column,
            message: message.into(),
            snippet: snippet.into(),
        }
    }
}

/// An issue attached to the file it was found in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: PathBuf,
    #[serde(flatten)]
    pub issue: Issue,
}

impl Diagnostic {
    pub fn new(file: PathBuf, issue: Issue) -> Self {
        Self { file, issue }
    }
}

/// A file that could not be read or written during a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFailure {
    pub file: PathBuf,
    pub message: String,
}

impl FileFailure {
    pub fn new(file: PathBuf, error: &BoldFixError) -> Self {
        Self {
            file,
            message: error.to_string(),
        }
    }
}

/// Library errors
#[derive(Error, Debug)]
pub enum BoldFixError {
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to follow symlink: {path}")]
    FileSymlink { path: PathBuf },

    #[error("Not a regular file: {path}")]
    FileNotRegular { path: PathBuf },

    #[error("File too large: {path} ({size} bytes, limit {limit})")]
    FileTooBig { path: PathBuf, size: u64, limit: u64 },

    #[error("Failed to build syntax tree: {message} at byte {offset}")]
    Parse { message: String, offset: usize },

    #[error("Invalid config: {path}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid exclude pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Invalid frontmatter")]
    Frontmatter {
        #[source]
        source: serde_yaml::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_serializes_kebab_case() {
        let yaml = serde_yaml::to_string(&IssueRule::UnparsedStrong).unwrap();
        assert_eq!(yaml.trim(), "unparsed-strong");
        assert_eq!(IssueRule::SplitStrong.to_string(), "split-strong");
    }

    #[test]
    fn test_file_failure_message() {
        let err = BoldFixError::FileNotRegular {
            path: PathBuf::from("posts"),
        };
        let failure = FileFailure::new(PathBuf::from("posts"), &err);
        assert_eq!(failure.message, "Not a regular file: posts");
    }
}
