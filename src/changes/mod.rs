//! Changed-file resolution.
//!
//! Turns the raw output of the diff command into [`ChangedFile`] records.
//! Paths are expected to look like `<Target>/<dir>/<dir>/.../<File>.swift`;
//! the first segment names the build target and the last one the file.
//!
//! Parsing is pure and returns a [`ChangedFileError`] instead of exiting, so
//! the caller decides what a bad entry means for the process.

mod source;

pub use source::{ChangeSource, ShellChangeSource};

use std::collections::HashSet;

use crate::config::{
    ShortPathPolicy, DEFAULT_MIN_PATH_SEGMENTS, DEFAULT_SOURCE_EXTENSION, DEFAULT_TARGET_SUFFIX,
};
use crate::errors::ChangedFileError;

/// A source file touched in the current revision.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangedFile {
    /// Target name as it appears in the coverage report, suffix included
    pub target: String,
    /// Bare file name
    pub name: String,
}

impl ChangedFile {
    pub fn new(target: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeParseOptions {
    pub target_suffix: String,
    pub source_extension: String,
    pub min_path_segments: usize,
    pub short_path_policy: ShortPathPolicy,
}

impl Default for ChangeParseOptions {
    fn default() -> Self {
        Self {
            target_suffix: DEFAULT_TARGET_SUFFIX.to_string(),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            min_path_segments: DEFAULT_MIN_PATH_SEGMENTS,
            short_path_policy: ShortPathPolicy::Halt,
        }
    }
}

/// Parse whitespace-separated changed paths.
///
/// Duplicate paths are collapsed, keeping the first occurrence. A path with
/// fewer than `min_path_segments` segments either ends parsing
/// ([`ShortPathPolicy::Halt`]) or is skipped ([`ShortPathPolicy::Skip`]).
///
/// # Errors
///
/// Returns an error for a file name that does not contain the source
/// extension. A trailing `/` leaves an empty file name and fails the same way.
pub fn parse_changed_files(
    raw: &str,
    options: &ChangeParseOptions,
) -> Result<Vec<ChangedFile>, ChangedFileError> {
    let candidates = unique_paths(raw);
    let mut changed_files = Vec::with_capacity(candidates.len());

    for (index, path) in candidates.iter().enumerate() {
        let segments: Vec<&str> = path.split('/').collect();

        if segments.len() < options.min_path_segments {
            match options.short_path_policy {
                ShortPathPolicy::Halt => {
                    log::warn!(
                        "Stopped parsing changed files at {} (fewer than {} path segments); {} entries ignored",
                        path,
                        options.min_path_segments,
                        candidates.len() - index
                    );
                    break;
                }
                ShortPathPolicy::Skip => {
                    log::warn!(
                        "Skipping {} (fewer than {} path segments)",
                        path,
                        options.min_path_segments
                    );
                    continue;
                }
            }
        }

        changed_files.push(parse_changed_path(path, &segments, options)?);
    }

    Ok(changed_files)
}

fn unique_paths(raw: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    raw.split_whitespace()
        .filter(|path| seen.insert(*path))
        .collect()
}

/// Build a [`ChangedFile`] from the first and last segments of `path`.
///
/// Segments may be empty. A leading `/` gives a target made of the suffix
/// alone (`.framework`), which no report target carries, so the entry ends up
/// unmatched instead of failing the run.
fn parse_changed_path(
    path: &str,
    segments: &[&str],
    options: &ChangeParseOptions,
) -> Result<ChangedFile, ChangedFileError> {
    let (Some(target), Some(name)) = (segments.first(), segments.last()) else {
        return Err(ChangedFileError::InvalidPath {
            path: path.to_string(),
        });
    };

    if !name.contains(options.source_extension.as_str()) {
        return Err(ChangedFileError::NotSource {
            path: path.to_string(),
            extension: options.source_extension.clone(),
        });
    }

    Ok(ChangedFile::new(
        format!("{}{}", target, options.target_suffix),
        *name,
    ))
}
