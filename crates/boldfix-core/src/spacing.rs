//! Space insertion around CJK bold spans
//!
//! Many renderers only open `**` when the marker is not wedged between a word
//! character and punctuation, and CJK text has no spaces to fall back on.
//! The fixer rejoins torn markers, then queues a single space at every
//! boundary where a CJK bold span touches a letter or digit:
//!
//! - around parsed bold nodes flush against a text sibling
//! - around literal `**...**` runs the parser left as plain text
//!
//! Both passes write into one [`InsertionSet`], so a boundary found twice is
//! only padded once.

use crate::config::EngineOptions;
use crate::insertion::{Insertion, InsertionSet};
use crate::parsers::markdown::Tree;
use crate::rules::flush_strong::find_flush_strong;
use crate::rules::split_strong::{find_split_markers, repair_split_strong_markers};
use crate::rules::unparsed_strong::find_literal_strong;
use crate::rules::{char_at, char_before, is_word_char, FIX_SKIP};
use tracing::{trace, warn};

/// Result of one fixer run with counts of what changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    pub text: String,
    /// Torn `**` markers rejoined
    pub joined_lines: usize,
    /// Spaces inserted
    pub insertions: usize,
}

impl FixOutcome {
    fn unchanged(source: &str) -> Self {
        Self {
            text: source.to_string(),
            joined_lines: 0,
            insertions: 0,
        }
    }
}

/// Fix CJK bold spacing with default parser options.
///
/// ```
/// use boldfix_core::fix_chinese_bold;
///
/// assert_eq!(fix_chinese_bold("前缀**中文粗体**后缀"), "前缀 **中文粗体** 后缀");
/// assert_eq!(fix_chinese_bold("abc**bold**def"), "abc**bold**def");
/// ```
pub fn fix_chinese_bold(source: &str) -> String {
    fix_chinese_bold_with(source, &EngineOptions::default())
}

/// Fix CJK bold spacing with explicit parser options.
///
/// With `gfm` enabled, tables, strikethrough and footnotes are parsed, so
/// bold spans next to them are padded like any other.
///
/// ```
/// use boldfix_core::{fix_chinese_bold_with, EngineOptions};
///
/// let gfm = EngineOptions { gfm: true };
/// assert_eq!(
///     fix_chinese_bold_with("~~删除~~前缀**中文**后缀", &gfm),
///     "~~删除~~前缀 **中文** 后缀"
/// );
/// ```
pub fn fix_chinese_bold_with(source: &str, options: &EngineOptions) -> String {
    fix_with_report(source, options).text
}

/// Run the fixer and report how many joins and insertions it made.
///
/// A source without `**` is returned untouched without parsing. When the
/// syntax tree cannot be built the line-repaired text is returned as is.
pub fn fix_with_report(source: &str, options: &EngineOptions) -> FixOutcome {
    if !source.contains("**") {
        return FixOutcome::unchanged(source);
    }

    let joined_lines = find_split_markers(source).len();
    let repaired = repair_split_strong_markers(source);

    let tree = match Tree::parse(&repaired, options) {
        Ok(tree) => tree,
        Err(e) => {
            warn!(error = %e, "markdown parse failed; only torn markers repaired");
            return FixOutcome {
                text: repaired.into_owned(),
                joined_lines,
                insertions: 0,
            };
        }
    };

    let pending = collect_insertions(&tree, &repaired);
    trace!(
        joined = joined_lines,
        insertions = pending.len(),
        "spacing pass done"
    );

    FixOutcome {
        text: pending.apply(&repaired),
        joined_lines,
        insertions: pending.len(),
    }
}

fn collect_insertions(tree: &Tree, source: &str) -> InsertionSet {
    let mut pending = InsertionSet::new();

    for boundary in find_flush_strong(tree) {
        pending.push(Insertion::space(boundary.offset));
    }

    for span in find_literal_strong(tree, source, FIX_SKIP) {
        if char_before(source, span.start).is_some_and(is_word_char) {
            pending.push(Insertion::space(span.start));
        }
        if char_at(source, span.end).is_some_and(is_word_char) {
            pending.push(Insertion::space(span.end));
        }
    }

    pending
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cjk_adjacency() {
        assert_eq!(fix_chinese_bold("前缀**中文粗体**后缀"), "前缀 **中文粗体** 后缀");
    }

    #[test]
    fn test_latin_untouched() {
        assert_eq!(fix_chinese_bold("abc**bold**def"), "abc**bold**def");
    }

    #[test]
    fn test_no_markers_unchanged() {
        let source = "普通段落，没有粗体。\n\n*斜体*也不算。\n";
        assert_eq!(fix_chinese_bold(source), source);
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(fix_chinese_bold(""), "");
    }

    #[test]
    fn test_literal_pair_blocked_by_punctuation() {
        assert_eq!(
            fix_chinese_bold("这是**“引用”**内容"),
            "这是 **“引用”** 内容"
        );
    }

    #[test]
    fn test_already_spaced() {
        let source = "前缀 **中文粗体** 后缀";
        assert_eq!(fix_chinese_bold(source), source);
    }

    #[test]
    fn test_punctuation_neighbours_untouched() {
        let source = "前缀，**中文粗体**。";
        assert_eq!(fix_chinese_bold(source), source);
    }

    #[test]
    fn test_digits_count_as_word_chars() {
        assert_eq!(fix_chinese_bold("共3**个**人"), "共3 **个** 人");
    }

    #[test]
    fn test_split_marker_rejoined_and_spaced() {
        let source = "这是**粗体内容*\n*结束\n";
        assert_eq!(fix_chinese_bold(source), "这是 **粗体内容** 结束\n");
    }

    #[test]
    fn test_bold_across_soft_break_padded_not_joined() {
        // each line has a complete `**`, so nothing is torn; the parser
        // builds one bold span over the soft break
        let source = "这是**粗体\n内容**结束";
        let outcome = fix_with_report(source, &EngineOptions::default());
        assert_eq!(outcome.text, "这是 **粗体\n内容** 结束");
        assert_eq!(outcome.joined_lines, 0);
        assert_eq!(outcome.insertions, 2);
    }

    #[test]
    fn test_split_marker_keeps_crlf() {
        let source = "标题\r\n\r\n这是**粗体内容*\r\n*结束\r\n";
        assert_eq!(
            fix_chinese_bold(source),
            "标题\r\n\r\n这是 **粗体内容** 结束\r\n"
        );
    }

    #[test]
    fn test_fence_content_untouched() {
        let source = "```\n前缀**中文粗体**后缀\n这是**粗体*\n*内容\n```\n";
        assert_eq!(fix_chinese_bold(source), source);
    }

    #[test]
    fn test_inline_code_untouched() {
        let source = "代码`前缀**中文**后缀`结束";
        assert_eq!(fix_chinese_bold(source), source);
    }

    #[test]
    fn test_link_text_untouched() {
        let source = "[前缀**中文**后缀](https://example.com)";
        assert_eq!(fix_chinese_bold(source), source);
    }

    #[test]
    fn test_escaped_markers_untouched() {
        let source = r"文本\*\*中文\*\*结尾";
        assert_eq!(fix_chinese_bold(source), source);
    }

    #[test]
    fn test_frontmatter_body_fixed() {
        let source = "---\ntitle: 测试\n---\n\n前缀**中文**后缀\n";
        assert_eq!(
            fix_chinese_bold(source),
            "---\ntitle: 测试\n---\n\n前缀 **中文** 后缀\n"
        );
    }

    #[test]
    fn test_idempotent_on_examples() {
        for source in [
            "前缀**中文粗体**后缀",
            "这是**“引用”**内容",
            "这是**粗体内容*\n*结束",
            "共3**个**人，还有**“另一个”**例子",
        ] {
            let once = fix_chinese_bold(source);
            assert_eq!(fix_chinese_bold(&once), once, "input: {source:?}");
        }
    }

    #[test]
    fn test_report_counts() {
        let outcome = fix_with_report("这是**粗体内容*\n*结束", &EngineOptions::default());
        assert_eq!(outcome.joined_lines, 1);
        assert_eq!(outcome.insertions, 2);
        assert_eq!(outcome.text, "这是 **粗体内容** 结束");
    }

    #[test]
    fn test_report_clean_input() {
        let outcome = fix_with_report("没有问题", &EngineOptions::default());
        assert_eq!(outcome, FixOutcome::unchanged("没有问题"));
    }

    #[test]
    fn test_gfm_strikethrough_is_not_a_skip() {
        let options = EngineOptions { gfm: true };
        assert_eq!(
            fix_chinese_bold_with("~~删除~~前缀**中文**后缀", &options),
            "~~删除~~前缀 **中文** 后缀"
        );
    }
}
