//! Configuration for scanning and fixing

use crate::diagnostics::{BoldFixError, BoldFixResult, IssueRule};
use crate::file_utils::DEFAULT_MAX_FILE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration, usually loaded from `.boldfix.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoldFixConfig {
    /// Glob patterns of paths to skip
    pub exclude: Vec<String>,

    /// File extensions treated as Markdown
    pub extensions: Vec<String>,

    /// Largest file that will be read, in bytes
    pub max_file_size: u64,

    /// Which checks the scanner reports
    pub rules: RuleConfig,

    /// Markdown parser settings
    pub engine: EngineOptions,
}

impl Default for BoldFixConfig {
    fn default() -> Self {
        Self {
            exclude: vec![
                "node_modules/**".to_string(),
                ".git/**".to_string(),
                "target/**".to_string(),
                "dist/**".to_string(),
            ],
            extensions: vec!["md".to_string(), "mdx".to_string()],
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            rules: RuleConfig::default(),
            engine: EngineOptions::default(),
        }
    }
}

/// Helper function for serde default
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// `**` markers torn across a line break
    #[serde(default = "default_true")]
    pub split_strong: bool,

    /// Literal `**...**` the parser left as text
    #[serde(default = "default_true")]
    pub unparsed_strong: bool,

    /// Bold spans flush against a word character
    #[serde(default = "default_true")]
    pub flush_strong: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            split_strong: true,
            unparsed_strong: true,
            flush_strong: true,
        }
    }
}

impl RuleConfig {
    pub fn is_enabled(&self, rule: IssueRule) -> bool {
        match rule {
            IssueRule::SplitStrong => self.split_strong,
            IssueRule::UnparsedStrong => self.unparsed_strong,
            IssueRule::FlushStrong => self.flush_strong,
        }
    }
}

/// Options handed to the Markdown parser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Parse GitHub Flavored Markdown extensions (tables, strikethrough,
    /// footnotes, task lists). Off by default, matching plain CommonMark.
    pub gfm: bool,
}

impl BoldFixConfig {
    /// Load config from file
    pub fn load(path: &Path) -> BoldFixResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BoldFixError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| BoldFixError::Config {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load config or use default
    pub fn load_or_default(path: Option<&Path>) -> Self {
        path.and_then(|p| Self::load(p).ok()).unwrap_or_default()
    }

    /// Compile the exclude globs
    pub fn exclude_patterns(&self) -> BoldFixResult<Vec<glob::Pattern>> {
        self.exclude
            .iter()
            .map(|p| {
                glob::Pattern::new(p).map_err(|e| BoldFixError::InvalidPattern {
                    pattern: p.clone(),
                    source: e,
                })
            })
            .collect()
    }

    /// Whether `path` has one of the configured Markdown extensions
    pub fn is_markdown(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}
