use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::index::scan::scan_markdown;
use crate::index::{Category, IndexStore};

/// What the journal folder holds, for the data transparency view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStats {
    pub journal_path: PathBuf,
    /// Markdown files on disk under `entries/` and `ai/`
    pub total_files: usize,
    pub total_size_bytes: u64,
    /// Indexed records
    pub entry_count: usize,
    pub ai_output_count: usize,
    pub oldest_entry: Option<NaiveDate>,
    pub newest_entry: Option<NaiveDate>,
}

pub fn data_stats(root: &Path, store: &IndexStore) -> DataStats {
    let (total_files, total_size_bytes) = [Category::Entry, Category::AiOutput]
        .into_iter()
        .map(|category| scan_markdown(&root.join(category.root_dir())))
        .fold((0, 0), |(files, bytes), report| {
            (
                files + report.files.len(),
                bytes + report.files.iter().map(|f| f.size).sum::<u64>(),
            )
        });

    DataStats {
        journal_path: root.to_path_buf(),
        total_files,
        total_size_bytes,
        entry_count: store.entries().count(),
        ai_output_count: store.ai_outputs().count(),
        oldest_entry: store.entries().map(|e| e.date).min(),
        newest_entry: store.entries().map(|e| e.date).max(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexBuilder;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_data_stats() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("entries/2024")).unwrap();
        fs::create_dir_all(dir.path().join("ai/daily")).unwrap();
        fs::write(dir.path().join("entries/2024/2024-01-05.md"), "# A\n12345").unwrap();
        fs::write(dir.path().join("entries/2024/2024-03-09.md"), "# B").unwrap();
        fs::write(dir.path().join("entries/2024/notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join("ai/daily/2024-01-05.review.md"), "# R").unwrap();

        let store = IndexBuilder::new(dir.path()).build().unwrap().store;
        let stats = data_stats(dir.path(), &store);

        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_size_bytes, 9 + 3 + 3);
        assert_eq!(stats.entry_count, 2);
        assert_eq!(stats.ai_output_count, 1);
        assert_eq!(stats.oldest_entry.unwrap().to_string(), "2024-01-05");
        assert_eq!(stats.newest_entry.unwrap().to_string(), "2024-03-09");
    }

    #[test]
    fn test_data_stats_empty_journal() {
        let dir = tempdir().unwrap();
        let stats = data_stats(dir.path(), &IndexStore::new());
        assert_eq!(stats.total_files, 0);
        assert_eq!(stats.oldest_entry, None);
    }
}
