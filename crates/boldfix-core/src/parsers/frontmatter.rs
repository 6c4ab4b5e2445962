//! YAML frontmatter parser

use crate::diagnostics::{BoldFixError, BoldFixResult};
use serde::de::DeserializeOwned;

/// YAML between the `---` lines at the top of content.
///
/// Expects content in format:
/// ```markdown
/// ---
/// key: value
/// ---
/// body content
/// ```
/// Returns `None` when the file does not open with `---` or the block is
/// never closed.
pub fn split_frontmatter(content: &str) -> Option<&str> {
    let rest = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))?;

    // Closing marker at the start of a line
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some(&rest[..offset]);
        }
        offset += line.len();
    }
    None
}

/// Parse YAML frontmatter from markdown content. `Ok(None)` when there is
/// no frontmatter block.
pub fn parse_frontmatter<T: DeserializeOwned>(content: &str) -> BoldFixResult<Option<T>> {
    let Some(yaml) = split_frontmatter(content) else {
        return Ok(None);
    };
    serde_yaml::from_str(yaml)
        .map(Some)
        .map_err(|e| BoldFixError::Frontmatter { source: e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestFrontmatter {
        title: String,
        #[serde(default)]
        tags: Vec<String>,
    }

    #[test]
    fn test_parse_frontmatter() {
        let content = "---\ntitle: 测试文章\ntags: [rust, markdown]\n---\n正文内容";

        let fm: TestFrontmatter = parse_frontmatter(content).unwrap().unwrap();
        assert_eq!(fm.title, "测试文章");
        assert_eq!(fm.tags, vec!["rust", "markdown"]);
    }

    #[test]
    fn test_split_stops_at_closing_marker() {
        let content = "---\ntitle: a\n---\nbody\n---\n";
        assert_eq!(split_frontmatter(content), Some("title: a\n"));
    }

    #[test]
    fn test_crlf_frontmatter() {
        let content = "---\r\ntitle: a\r\n---\r\nbody";
        assert_eq!(split_frontmatter(content), Some("title: a\r\n"));
    }

    #[test]
    fn test_no_frontmatter() {
        let result: Option<TestFrontmatter> = parse_frontmatter("Just body content").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_unclosed_frontmatter() {
        assert!(split_frontmatter("---\ntitle: a\nbody").is_none());
    }

    #[test]
    fn test_invalid_yaml() {
        let result: BoldFixResult<Option<TestFrontmatter>> =
            parse_frontmatter("---\ntitle: [unclosed\n---\n");
        assert!(matches!(result, Err(BoldFixError::Frontmatter { .. })));
    }
}
