//! Literal `**...**` the parser did not turn into bold
//!
//! CommonMark only opens a `**` run that is left-flanking. A run squeezed
//! between a CJK character and punctuation (`这是**“引用”**内容`) is neither
//! an opener nor a closer, so both runs stay in the text verbatim. Such
//! spans are found by scanning the source slice of every text node.
//!
//! Only a span touching a letter or digit gets padded by the fixer. A span
//! with blanks just inside its markers (`，** 中文**`) and no word neighbour
//! is left alone, so by default the rule does not report it either.

use super::{
    char_at, char_before, contains_cjk, has_ancestor, is_escaped, is_word_char, Document, Rule,
    DETECT_SKIP,
};
use crate::diagnostics::{Issue, IssueRule};
use crate::parsers::markdown::{NodeKind, Tree};
use crate::regex_util::static_regex;
use regex::Regex;
use std::ops::Range;

static_regex!(fn literal_strong, r"\*\*([^*]*?)\*\*");

/// Byte range of a literal `**...**` with CJK inside
pub type LiteralStrong = Range<usize>;

/// Literal bold spans in text nodes that have no ancestor in `skip`, in
/// document order. Escaped openers and spans without CJK are ignored.
pub fn find_literal_strong(tree: &Tree, source: &str, skip: &[NodeKind]) -> Vec<LiteralStrong> {
    let mut found = Vec::new();

    tree.visit_parents(NodeKind::Text, |id, ancestors| {
        if has_ancestor(tree, ancestors, skip) {
            return;
        }
        let node = tree.node(id);
        let Some(raw) = source.get(node.range.clone()) else {
            return;
        };
        if !raw.contains("**") {
            return;
        }

        for caps in literal_strong().captures_iter(raw) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if !contains_cjk(inner.as_str()) {
                continue;
            }
            let start = node.range.start + whole.start();
            if is_escaped(source, start) {
                continue;
            }
            found.push(start..node.range.start + whole.end());
        }
    });

    found
}

/// Whether the fixer inserts a space on either side of `span`
pub fn needs_padding(source: &str, span: &LiteralStrong) -> bool {
    char_before(source, span.start).is_some_and(is_word_char)
        || char_at(source, span.end).is_some_and(is_word_char)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnparsedStrongRule {
    /// Also report spans the fixer leaves unchanged
    pub report_unpadded: bool,
}

impl Rule for UnparsedStrongRule {
    fn id(&self) -> IssueRule {
        IssueRule::UnparsedStrong
    }

    fn check(&self, doc: &Document<'_>) -> Vec<Issue> {
        let Some(tree) = &doc.tree else {
            return Vec::new();
        };

        find_literal_strong(tree, doc.source, DETECT_SKIP)
            .into_iter()
            .filter(|span| self.report_unpadded || needs_padding(doc.source, span))
            .map(|span| {
                let (line, column) = doc.lines.line_col(span.start);
                Issue::new(
                    IssueRule::UnparsedStrong,
                    line,
                    column,
                    "Literal **...** detected in text node",
                    doc.lines.line_text(line),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineOptions;
    use crate::rules::FIX_SKIP;

    fn literal(source: &str) -> Vec<&str> {
        let tree = Tree::parse(source, &EngineOptions::default()).unwrap();
        find_literal_strong(&tree, source, FIX_SKIP)
            .into_iter()
            .map(|r| &source[r])
            .collect()
    }

    #[test]
    fn test_punctuation_blocks_parsing() {
        assert_eq!(literal("这是**“引用”**内容"), vec!["**“引用”**"]);
    }

    #[test]
    fn test_parsed_strong_is_not_literal() {
        assert!(literal("前缀**中文粗体**后缀").is_empty());
    }

    #[test]
    fn test_latin_only_ignored() {
        assert!(literal("this**“quote”**here").is_empty());
    }

    #[test]
    fn test_escaped_ignored() {
        assert!(literal(r"文本\*\*中文\*\*结尾").is_empty());
    }

    #[test]
    fn test_inline_code_ignored() {
        assert!(literal("代码`a**“引用”**b`结束").is_empty());
    }

    #[test]
    fn test_link_text_ignored() {
        assert!(literal("[这是**“引用”**内容](https://example.com)").is_empty());
    }

    #[test]
    fn test_matches_in_separate_paragraphs() {
        let found = literal("甲**“一”**乙\n\n丙**“二”**丁");
        assert_eq!(found, vec!["**“一”**", "**“二”**"]);
    }

    #[test]
    fn test_rule_position_and_snippet() {
        let source = "# 标题\n\n这是**“引用”**内容\n";
        let doc = Document::parse(source, &EngineOptions::default());
        let issues = UnparsedStrongRule::default().check(&doc);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 3);
        assert_eq!(issues[0].column, 3);
        assert_eq!(issues[0].snippet, "这是**“引用”**内容");
        assert_eq!(issues[0].message, "Literal **...** detected in text node");
    }

    #[test]
    fn test_needs_padding() {
        let source = "**中文 **中文";
        let spans = literal(source);
        assert_eq!(spans, vec!["**中文 **"]);
        assert!(needs_padding(source, &(0..spans[0].len())));

        let padded = "**中文 ** 中文";
        assert!(!needs_padding(padded, &(0.."**中文 **".len())));
    }

    #[test]
    fn test_unpadded_span_reported_only_on_request() {
        let source = "**中文 ** **中文";
        let doc = Document::parse(source, &EngineOptions::default());

        assert!(UnparsedStrongRule::default().check(&doc).is_empty());

        let all = UnparsedStrongRule {
            report_unpadded: true,
        }
        .check(&doc);
        assert_eq!(all.len(), 1);
        assert_eq!((all[0].line, all[0].column), (1, 1));
    }
}
