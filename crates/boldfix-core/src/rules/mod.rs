//! Detection rules for broken CJK bold spans
//!
//! Each rule is a read-only check over a [`Document`]. The fixer reuses the
//! same detection functions to decide where to insert text, which keeps the
//! scanner and the fixer in agreement about what counts as a problem.

pub mod flush_strong;
pub mod split_strong;
pub mod unparsed_strong;

use crate::config::{EngineOptions, RuleConfig};
use crate::diagnostics::{Issue, IssueRule};
use crate::parsers::markdown::{LineIndex, NodeId, NodeKind, Tree};
use tracing::warn;

/// Ancestors under which the fixer leaves bold markers alone
pub const FIX_SKIP: &[NodeKind] = &[
    NodeKind::Link,
    NodeKind::LinkReference,
    NodeKind::Definition,
    NodeKind::Strong,
    NodeKind::Emphasis,
];

/// Ancestors under which the scanner reports nothing
pub const DETECT_SKIP: &[NodeKind] = &[
    NodeKind::Link,
    NodeKind::LinkReference,
    NodeKind::Definition,
    NodeKind::Strong,
    NodeKind::Emphasis,
    NodeKind::Code,
    NodeKind::InlineCode,
    NodeKind::Html,
];

/// Source text plus everything derived from it once per scan
pub struct Document<'a> {
    pub source: &'a str,
    /// `None` when the syntax tree could not be built
    pub tree: Option<Tree>,
    pub lines: LineIndex<'a>,
}

impl<'a> Document<'a> {
    pub fn parse(source: &'a str, options: &EngineOptions) -> Self {
        let tree = match Tree::parse(source, options) {
            Ok(tree) => Some(tree),
            Err(e) => {
                warn!(error = %e, "markdown parse failed; tree checks skipped");
                None
            }
        };
        Self {
            source,
            tree,
            lines: LineIndex::new(source),
        }
    }
}

/// A read-only check producing issues
pub trait Rule {
    fn id(&self) -> IssueRule;
    fn check(&self, doc: &Document<'_>) -> Vec<Issue>;
}

/// Rules enabled by `config`, line rules first. With `report_unpadded` the
/// literal rule also reports spans the fixer leaves unchanged.
pub fn enabled_rules(config: &RuleConfig, report_unpadded: bool) -> Vec<Box<dyn Rule>> {
    let all: Vec<Box<dyn Rule>> = vec![
        Box::new(split_strong::SplitStrongRule),
        Box::new(unparsed_strong::UnparsedStrongRule { report_unpadded }),
        Box::new(flush_strong::FlushStrongRule),
    ];
    all.into_iter()
        .filter(|rule| config.is_enabled(rule.id()))
        .collect()
}

/// Chinese ideograph, U+4E00..=U+9FFF
pub fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

/// Unicode letter or number
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

pub(crate) fn has_ancestor(tree: &Tree, ancestors: &[NodeId], skip: &[NodeKind]) -> bool {
    ancestors
        .iter()
        .any(|&id| skip.contains(&tree.node(id).kind))
}

/// Character just before byte `offset`
pub(crate) fn char_before(source: &str, offset: usize) -> Option<char> {
    source.get(..offset)?.chars().next_back()
}

/// Character starting at byte `offset`
pub(crate) fn char_at(source: &str, offset: usize) -> Option<char> {
    source.get(offset..)?.chars().next()
}

/// Whether the character at `offset` is escaped by an odd run of backslashes
pub(crate) fn is_escaped(source: &str, offset: usize) -> bool {
    let Some(prefix) = source.get(..offset) else {
        return false;
    };
    prefix.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}
