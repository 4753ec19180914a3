//! Markdown file discovery
//!
//! Walks a subtree depth-first in file-name order so repeated scans of an
//! unchanged folder yield the same sequence. Hidden entries are not
//! descended into; unreadable directories and files are reported and
//! skipped rather than aborting the walk.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use walkdir::{DirEntry, WalkDir};

use super::types::SkippedPath;
use crate::journal::paths::MARKDOWN_EXT;

/// A markdown file found by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Absolute path
    pub path: PathBuf,
    pub modified: DateTime<Utc>,
    pub size: u64,
}

/// Everything a scan found
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub files: Vec<ScannedFile>,
    pub skipped: Vec<SkippedPath>,
}

/// Enumerate markdown files under `dir`. A missing directory yields an empty report.
#[tracing::instrument(skip(dir), fields(dir = %dir.display()))]
pub fn scan_markdown(dir: &Path) -> ScanReport {
    let mut report = ScanReport::default();

    if !dir.is_dir() {
        tracing::debug!("subtree does not exist, nothing to scan");
        return report;
    }

    let walker = WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(dir).to_path_buf();
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable path");
                report.skipped.push(SkippedPath::new(&path, e));
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }

        match stat(&entry) {
            Ok(file) => report.files.push(file),
            Err(e) => {
                tracing::warn!(path = %entry.path().display(), error = %e, "Failed to stat file");
                report.skipped.push(SkippedPath::new(entry.path(), e));
            }
        }
    }

    report
}

/// Check whether a path has the markdown extension
pub fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == MARKDOWN_EXT)
}

/// Read modification time and size of a single file
pub fn stat_path(path: &Path) -> std::io::Result<ScannedFile> {
    let metadata = std::fs::metadata(path)?;
    Ok(ScannedFile {
        path: path.to_path_buf(),
        modified: DateTime::<Utc>::from(metadata.modified()?),
        size: metadata.len(),
    })
}

fn stat(entry: &DirEntry) -> std::io::Result<ScannedFile> {
    let metadata = entry.metadata().map_err(std::io::Error::from)?;
    Ok(ScannedFile {
        path: entry.path().to_path_buf(),
        modified: DateTime::<Utc>::from(metadata.modified()?),
        size: metadata.len(),
    })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// `/`-separated path of `path` relative to `base`
pub fn relative_id(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
