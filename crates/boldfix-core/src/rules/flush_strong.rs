//! Parsed bold spans glued to the surrounding text

use super::{contains_cjk, has_ancestor, is_word_char, Document, Rule, FIX_SKIP};
use crate::diagnostics::{Issue, IssueRule};
use crate::parsers::markdown::{NodeKind, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Before,
    After,
}

/// A boundary of a bold span where a space is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushBoundary {
    /// Byte offset of the boundary in the source
    pub offset: usize,
    pub side: Side,
}

/// Boundaries of CJK bold spans that touch a word character in an adjacent
/// text sibling with no gap in between. Spans under a [`FIX_SKIP`] ancestor
/// are left out.
pub fn find_flush_strong(tree: &Tree) -> Vec<FlushBoundary> {
    let mut found = Vec::new();

    tree.visit_parents(NodeKind::Strong, |id, ancestors| {
        if has_ancestor(tree, ancestors, FIX_SKIP) {
            return;
        }
        if !contains_cjk(&tree.text_content(id)) {
            return;
        }

        let span = &tree.node(id).range;
        let (prev, next) = tree.siblings(id);

        if let Some(prev) = prev.map(|p| tree.node(p)) {
            if prev.kind == NodeKind::Text
                && prev.range.end == span.start
                && prev.value.chars().next_back().is_some_and(is_word_char)
            {
                found.push(FlushBoundary {
                    offset: span.start,
                    side: Side::Before,
                });
            }
        }

        if let Some(next) = next.map(|n| tree.node(n)) {
            if next.kind == NodeKind::Text
                && next.range.start == span.end
                && next.value.chars().next().is_some_and(is_word_char)
            {
                found.push(FlushBoundary {
                    offset: span.end,
                    side: Side::After,
                });
            }
        }
    });

    found
}

pub struct FlushStrongRule;

impl Rule for FlushStrongRule {
    fn id(&self) -> IssueRule {
        IssueRule::FlushStrong
    }

    fn check(&self, doc: &Document<'_>) -> Vec<Issue> {
        let Some(tree) = &doc.tree else {
            return Vec::new();
        };

        find_flush_strong(tree)
            .into_iter()
            .map(|boundary| {
                let (line, column) = doc.lines.line_col(boundary.offset);
                let message = match boundary.side {
                    Side::Before => "Bold span starts flush against preceding text",
                    Side::After => "Bold span ends flush against following text",
                };
                Issue::new(
                    IssueRule::FlushStrong,
                    line,
                    column,
                    message,
                    doc.lines.line_text(line),
                )
            })
            .collect()
    }
}
