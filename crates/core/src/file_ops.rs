//! File discovery and relocation utilities
//!
//! Recursive artifact discovery plus the move semantics CI collection steps
//! rely on.

use crate::error::{Error, ErrorCode, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Find files matching a glob pattern recursively
///
/// With the default match options a `*`-pattern also crosses directory
/// separators, so `*.aab` matches at any depth below `root`. Results come
/// back in filesystem traversal order; no ordering is guaranteed.
pub fn find_files(root: &Path, pattern: &str) -> Vec<PathBuf> {
    let glob_pattern = glob::Pattern::new(pattern).ok();

    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            glob_pattern
                .as_ref()
                .map_or(true, |p| p.matches_path(e.path()))
        })
        .map(|e| e.path().to_path_buf())
        .collect()
}

/// Move a file into a directory, keeping only its file name
///
/// Any subdirectory position of `src` is lost. An existing destination file
/// with the same name is silently overwritten. Renames first and falls back
/// to copy-then-remove when the rename fails (e.g. across filesystems).
/// Returns the destination path.
pub fn move_file(src: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let file_name = src.file_name().ok_or_else(|| {
        Error::new(
            ErrorCode::InvalidPath,
            format!("Path has no file name: {}", src.display()),
        )
    })?;
    let dest = dest_dir.join(file_name);

    if fs::rename(src, &dest).is_err() {
        fs::copy(src, &dest)?;
        fs::remove_file(src)?;
    }

    Ok(dest)
}
