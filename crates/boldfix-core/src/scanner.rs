//! Read-only issue scanner

use crate::config::{BoldFixConfig, EngineOptions, RuleConfig};
use crate::diagnostics::{Issue, IssueRule};
use crate::rules::{enabled_rules, Document};

/// Which rules to run and how to parse
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub rules: RuleConfig,
    pub engine: EngineOptions,
    /// Report literal `**...**` spans even when no word character touches
    /// them. Off by default, so a clean scan means the fixer has nothing to do.
    pub report_unpadded: bool,
}

impl From<&BoldFixConfig> for ScanOptions {
    fn from(config: &BoldFixConfig) -> Self {
        Self {
            rules: config.rules.clone(),
            engine: config.engine.clone(),
            report_unpadded: false,
        }
    }
}

/// Report every problem the fixer would touch, without modifying `source`.
///
/// Torn-marker issues come first in line order, followed by the tree-based
/// issues sorted by position. If the syntax tree cannot be built only the
/// torn-marker issues are returned.
pub fn scan(source: &str, options: &ScanOptions) -> Vec<Issue> {
    if !source.contains("**") {
        return Vec::new();
    }

    let doc = Document::parse(source, &options.engine);
    let mut line_issues = Vec::new();
    let mut tree_issues = Vec::new();

    for rule in enabled_rules(&options.rules, options.report_unpadded) {
        let found = rule.check(&doc);
        if rule.id() == IssueRule::SplitStrong {
            line_issues.extend(found);
        } else {
            tree_issues.extend(found);
        }
    }

    tree_issues.sort_by_key(|issue| (issue.line, issue.column));
    line_issues.extend(tree_issues);
    line_issues
}

/// Torn markers and every CJK literal `**...**` run.
///
/// This is the narrower, unfiltered check. It does not line up exactly with
/// the fixer in either direction:
///
/// - bold spans that parsed but sit flush against text (`前缀**中文粗体**后缀`)
///   are not reported, although the fixer pads them
/// - literal runs with no word character beside them (`**中文 ** **中文`) are
///   reported, although the fixer leaves them alone
///
/// Use [`scan`] with default options when an empty result must mean the
/// fixer has nothing to change.
pub fn find_chinese_bold_issues(source: &str) -> Vec<Issue> {
    let options = ScanOptions {
        rules: RuleConfig {
            flush_strong: false,
            ..RuleConfig::default()
        },
        engine: EngineOptions::default(),
        report_unpadded: true,
    };
    scan(source, &options)
}
