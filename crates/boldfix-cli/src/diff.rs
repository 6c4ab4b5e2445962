//! Unified diffs for `boldfix fix --diff`

use colored::*;
use similar::{ChangeTag, TextDiff};

/// Render a unified diff between the original and fixed text of `name`.
/// Lines are colored only when `color` is set.
pub fn unified_diff(name: &str, original: &str, fixed: &str, color: bool) -> String {
    let diff = TextDiff::from_lines(original, fixed);
    let mut out = String::new();

    out.push_str(&format!("--- a/{}\n+++ b/{}\n", name, name));
    for hunk in diff.unified_diff().context_radius(1).iter_hunks() {
        let header = hunk.header().to_string();
        if color {
            out.push_str(&format!("{}\n", header.cyan()));
        } else {
            out.push_str(&header);
            out.push('\n');
        }

        for change in hunk.iter_changes() {
            let (sign, line) = match change.tag() {
                ChangeTag::Delete => ("-", change.value()),
                ChangeTag::Insert => ("+", change.value()),
                ChangeTag::Equal => (" ", change.value()),
            };
            let line = line.trim_end_matches(['\n', '\r']);
            let rendered = format!("{}{}", sign, line);
            let rendered = match (color, change.tag()) {
                (true, ChangeTag::Delete) => rendered.red().to_string(),
                (true, ChangeTag::Insert) => rendered.green().to_string(),
                _ => rendered,
            };
            out.push_str(&rendered);
            out.push('\n');
        }
    }

    out
}
