//! Safe file reading and writing
//!
//! Reads reject symlinks and non-regular files and enforce a size limit, so a
//! batch run over a content directory cannot hang on a FIFO or follow a link
//! out of the tree. Writes go through a sibling temp file and a rename so an
//! interrupted fix never leaves a half-written post behind.
//!
//! ## Security Model
//!
//! Reads call `symlink_metadata()` to inspect the path without following
//! links, then require a regular file before opening it.
//!
//! There is a TOCTOU (time-of-check-time-of-use) window between the metadata
//! check and the read. Closing it needs platform-specific APIs (`O_NOFOLLOW`
//! and friends). Exploiting it needs local write access to the content
//! directory, and the worst outcome is a fix applied to unexpected text.
//!
//! Writes do not re-check the target. The temp file lives next to the target
//! so the final `rename` stays on one filesystem and replaces the file in a
//! single step; a symlink at the target path is replaced, not followed.

use crate::diagnostics::{BoldFixError, BoldFixResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Default maximum file size (1 MiB = 1,048,576 bytes)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

/// Read a file with the default size limit of [`DEFAULT_MAX_FILE_SIZE`].
///
/// This function:
/// 1. Rejects symlinks (detected with `symlink_metadata`, never followed)
/// 2. Rejects non-regular files (directories, FIFOs, sockets, devices)
/// 3. Enforces the size limit (a file of exactly the limit is accepted)
///
/// # Errors
///
/// Returns `BoldFixError::FileSymlink` if the path is a symlink.
/// Returns `BoldFixError::FileNotRegular` if the path is not a regular file.
/// Returns `BoldFixError::FileTooBig` if the file exceeds the size limit.
/// Returns `BoldFixError::FileRead` for other I/O errors, including content
/// that is not valid UTF-8.
pub fn safe_read_file(path: &Path) -> BoldFixResult<String> {
    safe_read_file_with_limit(path, DEFAULT_MAX_FILE_SIZE)
}

/// Read a file with a custom size limit.
///
/// See [`safe_read_file`] for the checks and errors. The limit uses a `>`
/// comparison: a file of exactly `max_size` bytes is accepted, anything
/// larger is rejected before it is opened. Batch runs pass
/// `BoldFixConfig::max_file_size` here.
pub fn safe_read_file_with_limit(path: &Path, max_size: u64) -> BoldFixResult<String> {
    let metadata = fs::symlink_metadata(path).map_err(|e| BoldFixError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if metadata.file_type().is_symlink() {
        return Err(BoldFixError::FileSymlink {
            path: path.to_path_buf(),
        });
    }

    if !metadata.is_file() {
        return Err(BoldFixError::FileNotRegular {
            path: path.to_path_buf(),
        });
    }

    let size = metadata.len();
    if size > max_size {
        return Err(BoldFixError::FileTooBig {
            path: path.to_path_buf(),
            size,
            limit: max_size,
        });
    }

    fs::read_to_string(path).map_err(|e| BoldFixError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Replace the contents of `path` with `content`.
///
/// The content is first written to a hidden sibling (`.name.boldfix-tmp`)
/// and then renamed over `path`. Readers see either the old file or the new
/// one, never a partial write. The temp file is removed if the rename fails.
///
/// # Errors
///
/// Returns `BoldFixError::FileWrite` if the temp file cannot be written or
/// the rename fails (for example when the directory is read-only).
pub fn safe_write_file(path: &Path, content: &str) -> BoldFixResult<()> {
    let write_err = |e| BoldFixError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    };

    let tmp = temp_sibling(path);
    fs::write(&tmp, content).map_err(write_err)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(e));
    }
    Ok(())
}

/// `dir/post.md` becomes `dir/.post.md.boldfix-tmp`
fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.boldfix-tmp", name))
}
