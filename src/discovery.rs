//! Script discovery.
//!
//! The directory is listed once and filtered by suffix. Patterns are never
//! expanded, so an empty directory yields an empty list rather than a literal
//! `*.py` entry. Matches are sorted by file name.

use crate::error::RunError;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// A discovered script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    /// Path handed to the interpreter.
    pub path: PathBuf,
    /// File name shown in progress output.
    pub name: String,
}

/// Check whether a file name matches `*.{extension}` the way a shell glob would:
/// hidden names never match, and the stem must be non-empty.
#[must_use]
pub fn matches_extension(file_name: &str, extension: &str) -> bool {
    if file_name.starts_with('.') {
        return false;
    }
    file_name
        .strip_suffix(extension)
        .and_then(|rest| rest.strip_suffix('.'))
        .is_some_and(|stem| !stem.is_empty())
}

/// List the scripts in `dir` whose names end in `.{extension}`, in lexicographic order.
///
/// Only regular files (or symlinks to them) are returned.
///
/// # Errors
///
/// Returns [`RunError::ReadDir`] if the directory or one of its entries cannot be read.
pub fn discover_scripts(dir: &Path, extension: &str) -> Result<Vec<Script>, RunError> {
    let read_dir_error = |source| RunError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    // Children run with `dir` as their working directory, so hand them absolute paths
    let base = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());

    let mut matches: Vec<(OsString, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let file_name = entry.file_name();
        if !matches_extension(&file_name.to_string_lossy(), extension) {
            continue;
        }

        // fs::metadata follows symlinks; dangling links are skipped
        let path = base.join(&file_name);
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => matches.push((file_name, path)),
            Ok(_) => tracing::debug!(path = %path.display(), "skipping non-file match"),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping unreadable match");
            }
        }
    }

    matches.sort_by(|a, b| a.0.cmp(&b.0));

    let scripts: Vec<Script> = matches
        .into_iter()
        .map(|(file_name, path)| Script {
            name: file_name.to_string_lossy().into_owned(),
            path,
        })
        .collect();

    tracing::debug!(
        directory = %dir.display(),
        count = scripts.len(),
        "discovered scripts"
    );
    Ok(scripts)
}
