//! Single-file maintenance of the persisted index
//!
//! Called on every save so the index trails the disk by at most one file.
//! A full rebuild remains the recovery path when the index is unusable.

use std::io::ErrorKind;
use std::path::Path;

use super::builder::IndexBuilder;
use super::cache::{read_index, write_index};
use super::extract::extract_file;
use super::scan::is_markdown;
use super::types::{Category, IndexLoad, IndexStore, ItemChange, Subcategory, FREEFORM_AI_DIRS};
use crate::error::{DiaristError, Result};

/// Re-extract one file and replace, add, or drop its record.
///
/// `relative_path` is relative to the category root (`entries/` or `ai/`).
/// A file that no longer exists, or that a full rebuild would never pick
/// up, is removed from the index. Any other read failure is returned,
/// since the caller asked for this file explicitly.
#[tracing::instrument(skip(root), fields(root = %root.display()))]
pub fn update_index_item(
    root: &Path,
    relative_path: &str,
    category: Category,
    subcategory: Option<Subcategory>,
) -> Result<ItemChange> {
    let id = normalize_relative_path(relative_path, category);
    let subcategory = match category {
        Category::Entry => None,
        Category::AiOutput => {
            let from_dir = Subcategory::from_relative_path(&id);
            if subcategory.is_some() && subcategory != from_dir {
                tracing::debug!(?subcategory, ?from_dir, "Using subcategory of the ai/ directory");
            }
            from_dir
        }
    };

    let mut store = load_or_build(root)?;

    let category_root = root.join(category.root_dir());
    let path = category_root.join(&id);

    let extracted = if is_indexable(&id, category) {
        extract_file(&path, &category_root, category, subcategory)
    } else {
        tracing::debug!(id = %id, "Path is outside the indexed layout");
        Err(ErrorKind::NotFound.into())
    };

    let change = match extracted {
        Ok(record) => {
            if store.upsert(record) {
                ItemChange::Replaced
            } else {
                ItemChange::Added
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            if store.remove(&id) {
                ItemChange::Removed
            } else {
                ItemChange::Absent
            }
        }
        Err(e) => return Err(DiaristError::io_operation("index", path.display(), e)),
    };

    store.touch();
    write_index(root, &store)?;
    tracing::debug!(id = %id, ?change, "Index item updated");

    Ok(change)
}

/// Drop one record. A missing or stale index makes this a no-op.
#[tracing::instrument(skip(root), fields(root = %root.display()))]
pub fn remove_index_item(root: &Path, relative_path: &str) -> Result<bool> {
    let IndexLoad::Loaded(mut store) = read_index(root) else {
        return Ok(false);
    };

    let id = relative_path.trim_start_matches("./").replace('\\', "/");
    let removed = store.remove(&id)
        || [Category::Entry, Category::AiOutput]
            .iter()
            .filter_map(|c| id.strip_prefix(&format!("{}/", c.root_dir())))
            .any(|stripped| store.remove(stripped));
    store.touch();
    write_index(root, &store)?;

    Ok(removed)
}

/// Current store, or a fresh full build when the persisted one is unusable
fn load_or_build(root: &Path) -> Result<IndexStore> {
    match read_index(root) {
        IndexLoad::Loaded(store) => Ok(store),
        IndexLoad::NeedsRebuild(reason) => {
            tracing::info!(%reason, "Rebuilding index before single-file update");
            Ok(IndexBuilder::new(root).build()?.store)
        }
    }
}

/// Whether a full rebuild would index `id`: a visible markdown file, and
/// for AI outputs one inside a known `ai/` directory.
fn is_indexable(id: &str, category: Category) -> bool {
    let components: Vec<&str> = id.split('/').collect();
    if components.iter().any(|c| c.is_empty() || c.starts_with('.')) {
        return false;
    }
    if !is_markdown(Path::new(id)) {
        return false;
    }
    match category {
        Category::Entry => true,
        Category::AiOutput => {
            components.len() > 1
                && (Subcategory::from_dir_name(components[0]).is_some()
                    || FREEFORM_AI_DIRS.contains(&components[0]))
        }
    }
}

/// `/`-separated path relative to the category root.
/// Accepts paths that still carry the category directory (`entries/…`, `ai/…`).
fn normalize_relative_path(relative_path: &str, category: Category) -> String {
    let path = relative_path.trim_start_matches("./").replace('\\', "/");
    let path = path.trim_start_matches('/');
    path.strip_prefix(&format!("{}/", category.root_dir()))
        .unwrap_or(path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_relative_path() {
        assert_eq!(
            normalize_relative_path("2024/01/a.md", Category::Entry),
            "2024/01/a.md"
        );
        assert_eq!(
            normalize_relative_path("entries/2024/01/a.md", Category::Entry),
            "2024/01/a.md"
        );
        assert_eq!(
            normalize_relative_path("ai/ask/q.ask.md", Category::AiOutput),
            "ask/q.ask.md"
        );
        assert_eq!(
            normalize_relative_path("daily\\x.review.md", Category::AiOutput),
            "daily/x.review.md"
        );
    }

    #[test]
    fn test_is_indexable() {
        assert!(is_indexable("2024/01/a.md", Category::Entry));
        assert!(!is_indexable(".draft.md", Category::Entry));
        assert!(!is_indexable("2024/.hidden/a.md", Category::Entry));
        assert!(!is_indexable("../outside.md", Category::Entry));
        assert!(!is_indexable("notes.txt", Category::Entry));
        assert!(is_indexable("daily/x.review.md", Category::AiOutput));
        assert!(is_indexable("ask/q.ask.md", Category::AiOutput));
        assert!(!is_indexable("scratch/x.md", Category::AiOutput));
        assert!(!is_indexable("stray.md", Category::AiOutput));
    }
}
