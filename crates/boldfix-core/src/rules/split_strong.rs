//! `**` markers torn across a line break
//!
//! Hard-wrapping a paragraph sometimes lands the break inside a `**` marker,
//! leaving a lone `*` at the end of one line and another at the start of the
//! next. The parser then sees two single stars and the bold span is lost.
//! Detection and repair share [`find_split_markers`], so the scanner reports
//! exactly the pairs the fixer joins.

use super::{Document, Rule};
use crate::diagnostics::{Issue, IssueRule};
use std::borrow::Cow;

/// Visible stand-in for the line break in issue snippets
pub const NEWLINE_MARKER: char = '⏎';

/// One line of the source with its byte position
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    start: usize,
    /// Line content without `\n` or `\r\n`
    text: &'a str,
    /// Offset of the first byte after the terminator
    next_start: usize,
}

fn split_lines(source: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut start = 0;
    for raw in source.split_inclusive('\n') {
        let text = raw.strip_suffix('\n').unwrap_or(raw);
        let text = if raw.ends_with('\n') {
            text.strip_suffix('\r').unwrap_or(text)
        } else {
            text
        };
        lines.push(Line {
            start,
            text,
            next_start: start + raw.len(),
        });
        start += raw.len();
    }
    lines
}

/// Opening fence marker of a line, if any
fn fence_marker(line: &str) -> Option<&'static str> {
    let trimmed = line.trim_start();
    if trimmed.starts_with("```") {
        Some("```")
    } else if trimmed.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}

/// Whether `line` followed by `next` is a `**` marker split by the break.
///
/// `line` (trailing blanks ignored) must end in exactly one unescaped `*`,
/// and `next` must start with exactly one `*` followed by a non-blank
/// character, which rules out `* item` list markers. One side must also
/// carry a `**` run, so two consecutive italic lines are never merged.
pub fn is_torn_marker(line: &str, next: &str) -> bool {
    let trimmed = line.trim_end_matches([' ', '\t']);
    let ends_single =
        trimmed.ends_with('*') && !trimmed.ends_with("**") && !trimmed.ends_with("\\*");
    if !ends_single {
        return false;
    }

    let mut chars = next.chars();
    if chars.next() != Some('*') {
        return false;
    }
    let starts_single = matches!(chars.next(), Some(c) if c != '*' && !c.is_whitespace());
    if !starts_single {
        return false;
    }

    let before_star = &trimmed[..trimmed.len() - 1];
    let after_star = &next[1..];
    before_star.contains("**") || after_star.contains("**")
}

/// A torn marker between two adjacent lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitMarker<'a> {
    /// 1-based number of the first line
    pub line: usize,
    /// First line with trailing blanks removed
    pub left: &'a str,
    /// Second line
    pub right: &'a str,
    /// Bytes to delete to rejoin the lines (trailing blanks + line break)
    pub join: std::ops::Range<usize>,
}

/// All torn markers outside fenced code blocks, in source order. A line
/// consumed as the right half of a pair is not examined again.
pub fn find_split_markers(source: &str) -> Vec<SplitMarker<'_>> {
    let lines = split_lines(source);
    let mut markers = Vec::new();
    let mut fence: Option<&'static str> = None;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some(marker) = fence_marker(line.text) {
            match fence {
                None => fence = Some(marker),
                Some(open) if open == marker => fence = None,
                Some(_) => {}
            }
        }

        if fence.is_none() {
            if let Some(next) = lines.get(i + 1) {
                if is_torn_marker(line.text, next.text) {
                    let left = line.text.trim_end_matches([' ', '\t']);
                    markers.push(SplitMarker {
                        line: i + 1,
                        left,
                        right: next.text,
                        join: line.start + left.len()..line.next_start,
                    });
                    i += 2;
                    continue;
                }
            }
        }

        i += 1;
    }

    markers
}

/// Rejoin every torn marker. Bytes outside the joins are kept as they are,
/// line endings included.
pub fn repair_split_strong_markers(source: &str) -> Cow<'_, str> {
    let markers = find_split_markers(source);
    if markers.is_empty() {
        return Cow::Borrowed(source);
    }

    let mut out = String::with_capacity(source.len());
    let mut copied = 0;
    for marker in &markers {
        out.push_str(&source[copied..marker.join.start]);
        copied = marker.join.end;
    }
    out.push_str(&source[copied..]);
    Cow::Owned(out)
}

pub struct SplitStrongRule;

impl Rule for SplitStrongRule {
    fn id(&self) -> IssueRule {
        IssueRule::SplitStrong
    }

    fn check(&self, doc: &Document<'_>) -> Vec<Issue> {
        find_split_markers(doc.source)
            .into_iter()
            .map(|marker| {
                Issue::new(
                    IssueRule::SplitStrong,
                    marker.line,
                    marker.left.chars().count().max(1),
                    "Possible split ** marker across lines",
                    format!("{}{}{}", marker.left, NEWLINE_MARKER, marker.right),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineOptions;

    #[test]
    fn test_torn_closer_detected() {
        assert!(is_torn_marker("这是**粗体内容*", "*结束"));
        assert!(is_torn_marker("这是**粗体内容*  \t", "*结束"));
    }

    #[test]
    fn test_torn_opener_detected() {
        assert!(is_torn_marker("前文*", "*粗体**后文"));
    }

    #[test]
    fn test_complete_closer_not_torn() {
        assert!(!is_torn_marker("这是**粗体**", "*结束"));
    }

    #[test]
    fn test_list_item_not_torn() {
        assert!(!is_torn_marker("这是**粗体*", "* 列表项"));
        assert!(!is_torn_marker("这是**粗体*", "*"));
        assert!(!is_torn_marker("这是**粗体*", "**结束"));
    }

    #[test]
    fn test_escaped_star_not_torn() {
        assert!(!is_torn_marker("这是**粗体\\*", "*结束"));
    }

    #[test]
    fn test_italic_lines_not_torn() {
        assert!(!is_torn_marker("*斜体*", "*另一行*"));
    }

    #[test]
    fn test_repair_joins_lines() {
        let source = "这是**粗体内容*\n*结束\n";
        assert_eq!(repair_split_strong_markers(source), "这是**粗体内容**结束\n");
    }

    #[test]
    fn test_repair_drops_trailing_blanks() {
        let source = "这是**粗体内容* \t\n*结束";
        assert_eq!(repair_split_strong_markers(source), "这是**粗体内容**结束");
    }

    #[test]
    fn test_repair_keeps_crlf() {
        let source = "开头\r\n这是**粗体内容*\r\n*结束\r\n下一行\r\n";
        assert_eq!(
            repair_split_strong_markers(source),
            "开头\r\n这是**粗体内容**结束\r\n下一行\r\n"
        );
    }

    #[test]
    fn test_repair_without_markers_borrows() {
        let source = "普通段落\n**粗体**\n";
        assert!(matches!(
            repair_split_strong_markers(source),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_fence_protects_content() {
        let source = "```\n这是**粗体*\n*内容\n```\n";
        assert!(find_split_markers(source).is_empty());
        assert_eq!(repair_split_strong_markers(source), source);
    }

    #[test]
    fn test_fence_needs_same_marker_to_close() {
        let source = "~~~\n```\n这是**粗体*\n*内容\n~~~\n这是**粗体*\n*内容\n";
        let markers = find_split_markers(source);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].line, 6);
    }

    #[test]
    fn test_consumed_line_not_reused() {
        let source = "a**b*\n*c**d*\n*e";
        let markers = find_split_markers(source);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].line, 1);
    }

    #[test]
    fn test_rule_issue_shape() {
        let source = "第一行\n这是**粗体内容*\n*结束";
        let doc = Document::parse(source, &EngineOptions::default());
        let issues = SplitStrongRule.check(&doc);
        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert_eq!(issue.rule, IssueRule::SplitStrong);
        assert_eq!(issue.line, 2);
        assert_eq!(issue.column, 9);
        assert_eq!(issue.snippet, "这是**粗体内容*⏎*结束");
    }
}
