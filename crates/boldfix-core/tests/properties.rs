//! Property tests for the fixer and scanner on generated Chinese Markdown.

use boldfix_core::{fix_chinese_bold, scan, ScanOptions};
use proptest::prelude::*;

/// A run of plain text, never containing `*`
fn word() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "中文", "粗体", "内容", "abc", "7", " ", "，", "“引用”", "\n\n",
    ])
}

/// Plain text, or a `**...**` span followed by more text so markers never
/// touch each other
fn piece() -> impl Strategy<Value = String> {
    prop_oneof![
        word().prop_map(str::to_string),
        (word(), word()).prop_map(|(inner, tail)| format!("**{inner}**{tail}")),
    ]
}

fn document() -> impl Strategy<Value = String> {
    (word(), prop::collection::vec(piece(), 0..8))
        .prop_map(|(head, pieces)| format!("{head}{}", pieces.concat()))
}

/// Whether `small` can be obtained from `big` by deleting characters
fn is_subsequence(small: &str, big: &str) -> bool {
    let mut rest = big.chars();
    small.chars().all(|c| rest.any(|b| b == c))
}

proptest! {
    #[test]
    fn fix_is_idempotent(doc in document()) {
        let once = fix_chinese_bold(&doc);
        prop_assert_eq!(fix_chinese_bold(&once), once);
    }

    #[test]
    fn fix_only_inserts_spaces(doc in document()) {
        let fixed = fix_chinese_bold(&doc);
        prop_assert!(is_subsequence(&doc, &fixed));
        prop_assert_eq!(
            fixed.chars().filter(|c| *c != ' ').collect::<String>(),
            doc.chars().filter(|c| *c != ' ').collect::<String>()
        );
    }

    #[test]
    fn text_without_markers_is_untouched(doc in "[中文粗体abc7 ，\n*_`\\[\\]]{0,40}") {
        prop_assume!(!doc.contains("**"));
        prop_assert_eq!(fix_chinese_bold(&doc), doc.clone());
        prop_assert!(scan(&doc, &ScanOptions::default()).is_empty());
    }

    #[test]
    fn fixed_output_scans_clean(doc in document()) {
        let fixed = fix_chinese_bold(&doc);
        prop_assert!(scan(&fixed, &ScanOptions::default()).is_empty());
    }

    #[test]
    fn clean_scan_means_nothing_to_fix(doc in document()) {
        if scan(&doc, &ScanOptions::default()).is_empty() {
            prop_assert_eq!(fix_chinese_bold(&doc), doc.clone());
        }
    }
}
