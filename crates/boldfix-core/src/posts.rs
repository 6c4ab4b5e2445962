//! Blog post discovery
//!
//! Posts live flat in one directory and are named with a creation stamp,
//! `YY-MM-DD-HH-MM[-slug].md`. Listing orders them newest first, with
//! unstamped files at the end.

use crate::diagnostics::{BoldFixError, BoldFixResult};
use crate::file_utils::safe_read_file;
use crate::parsers::frontmatter::parse_frontmatter;
use crate::regex_util::static_regex;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

static_regex!(
    fn post_stamp,
    r"^(\d{2})-(\d{2})-(\d{2})-(\d{2})-(\d{2})"
);

/// Creation time encoded in a post file name; fields compare in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PostTimestamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl PostTimestamp {
    /// Read the `YY-MM-DD-HH-MM` prefix of a file name. Two-digit years
    /// are taken as 20YY.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let caps = post_stamp().captures(name)?;
        let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u8>().ok());
        Some(Self {
            year: 2000 + u16::from(field(1)?),
            month: field(2)?,
            day: field(3)?,
            hour: field(4)?,
            minute: field(5)?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub path: PathBuf,
    pub file_name: String,
    pub timestamp: Option<PostTimestamp>,
    /// `title` from the frontmatter, if any
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PostMeta {
    #[serde(default)]
    title: Option<String>,
}

fn is_post_file(name: &str) -> bool {
    name.ends_with(".md") || name.ends_with(".mdx")
}

fn read_title(path: &Path) -> Option<String> {
    let content = match safe_read_file(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read post");
            return None;
        }
    };
    match parse_frontmatter::<PostMeta>(&content) {
        Ok(meta) => meta.and_then(|m| m.title).filter(|t| !t.trim().is_empty()),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not parse frontmatter");
            None
        }
    }
}

/// Markdown posts directly inside `dir`, newest first. Files without a
/// timestamp prefix come last, in name order.
pub fn list_posts(dir: &Path) -> BoldFixResult<Vec<Post>> {
    let entries = fs::read_dir(dir).map_err(|e| BoldFixError::FileRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut posts = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| BoldFixError::FileRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !is_file || !is_post_file(&file_name) {
            continue;
        }

        let path = entry.path();
        posts.push(Post {
            title: read_title(&path),
            timestamp: PostTimestamp::from_file_name(&file_name),
            file_name,
            path,
        });
    }

    // Some(_) > None, so reversing puts stamped posts first, newest on top
    posts.sort_by(|a, b| {
        Reverse(a.timestamp)
            .cmp(&Reverse(b.timestamp))
            .then_with(|| a.file_name.cmp(&b.file_name))
    });

    Ok(posts)
}
