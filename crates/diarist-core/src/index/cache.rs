//! Persisting the index document
//!
//! The whole store lives in a single JSON file next to `entries/` and
//! `ai/`. Reads never partially trust a document: anything other than a
//! well-formed file of the current version is reported as needing a rebuild.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::builder::IndexBuilder;
use super::types::{IndexLoad, IndexStore, RebuildReason, INDEX_VERSION};
use crate::error::{DiaristError, Result};
use crate::journal::paths::INDEX_FILE;

#[derive(Debug, Deserialize)]
struct IndexMeta {
    version: u32,
}

/// Location of the index document for a journal
pub fn index_path(root: &Path) -> PathBuf {
    root.join(INDEX_FILE)
}

/// Load the index document
#[tracing::instrument(skip(root), fields(root = %root.display()))]
pub fn read_index(root: &Path) -> IndexLoad {
    let path = index_path(root);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return IndexLoad::NeedsRebuild(RebuildReason::Missing)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Index unreadable, rebuild needed");
            return IndexLoad::NeedsRebuild(RebuildReason::Unreadable(e.to_string()));
        }
    };

    // Check the version before the full shape so old schemas read as stale, not corrupt
    let meta: IndexMeta = match serde_json::from_str(&content) {
        Ok(meta) => meta,
        Err(e) => {
            tracing::warn!(error = %e, "Index corrupt, rebuild needed");
            return IndexLoad::NeedsRebuild(RebuildReason::Corrupt(e.to_string()));
        }
    };

    if meta.version != INDEX_VERSION {
        tracing::warn!(
            found = meta.version,
            expected = INDEX_VERSION,
            "Index version mismatch, rebuild needed"
        );
        return IndexLoad::NeedsRebuild(RebuildReason::VersionMismatch {
            found: meta.version,
            expected: INDEX_VERSION,
        });
    }

    match serde_json::from_str::<IndexStore>(&content) {
        Ok(store) => IndexLoad::Loaded(store),
        Err(e) => {
            tracing::warn!(error = %e, "Index corrupt, rebuild needed");
            IndexLoad::NeedsRebuild(RebuildReason::Corrupt(e.to_string()))
        }
    }
}

/// Save the index document, replacing any previous one as a whole
#[tracing::instrument(skip(root, store), fields(root = %root.display(), records = store.len()))]
pub fn write_index(root: &Path, store: &IndexStore) -> Result<()> {
    let path = index_path(root);
    let temp_path = path.with_extension("json.tmp");
    let content = serde_json::to_string_pretty(store)?;

    fs::write(&temp_path, content)
        .map_err(|e| DiaristError::io_operation("write", temp_path.display(), e))?;
    fs::rename(&temp_path, &path)
        .map_err(|e| DiaristError::io_operation("replace", path.display(), e))?;

    Ok(())
}

/// Read the index, rebuilding and persisting it when it cannot be used
pub fn load_or_rebuild(root: &Path) -> Result<IndexStore> {
    match read_index(root) {
        IndexLoad::Loaded(store) => Ok(store),
        IndexLoad::NeedsRebuild(reason) => {
            tracing::info!(%reason, "Rebuilding index");
            let report = IndexBuilder::new(root).build()?;
            write_index(root, &report.store)?;
            Ok(report.store)
        }
    }
}
