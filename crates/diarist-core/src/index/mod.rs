//! Index of a journal folder
//!
//! Scans `entries/` and the `ai/` subtrees, extracts one record per
//! markdown file, and persists the result as a single JSON document at
//! the journal root.

pub mod builder;
pub mod cache;
pub mod extract;
pub mod scan;
pub mod types;
pub mod update;

pub use builder::{IndexBuilder, ProgressFn};
pub use cache::{index_path, load_or_rebuild, read_index, write_index};
pub use types::{
    BuildReport, Category, IndexLoad, IndexRecord, IndexStore, ItemChange, RebuildReason,
    SkippedPath, Subcategory, FREEFORM_AI_DIRS, INDEX_VERSION,
};
pub use update::{remove_index_item, update_index_item};
