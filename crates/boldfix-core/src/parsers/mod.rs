//! Parsers for Markdown bodies and post frontmatter

pub mod frontmatter;
pub mod markdown;
