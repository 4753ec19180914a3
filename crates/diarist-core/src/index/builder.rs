use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use chrono::Utc;

use super::extract::extract_scanned;
use super::scan::{scan_markdown, ScannedFile};
use super::types::{
    BuildReport, Category, IndexRecord, IndexStore, SkippedPath, Subcategory, FREEFORM_AI_DIRS,
    INDEX_VERSION,
};
use crate::error::{DiaristError, Result};
use crate::trace_time;

/// Progress callback: (files done, files total, record just indexed)
pub type ProgressFn<'a> = dyn FnMut(usize, usize, &IndexRecord) + 'a;

/// A file queued for extraction along with where it belongs
struct Target {
    file: ScannedFile,
    category: Category,
    subcategory: Option<Subcategory>,
    category_root: PathBuf,
}

/// Index builder - full rebuild of a journal folder
pub struct IndexBuilder<'a> {
    root: &'a Path,
    progress: Option<&'a mut ProgressFn<'a>>,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> IndexBuilder<'a> {
    /// Create a new index builder for the journal at `root`
    pub fn new(root: &'a Path) -> Self {
        IndexBuilder {
            root,
            progress: None,
            cancel: None,
        }
    }

    /// Report each indexed record
    pub fn with_progress(mut self, progress: &'a mut ProgressFn<'a>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Stop between files once `cancel` is set
    pub fn with_cancel(mut self, cancel: &'a AtomicBool) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Scan every subtree and extract all records.
    ///
    /// A missing subtree contributes zero records. Unreadable paths, and
    /// files whose id an earlier subtree already claimed, are collected in
    /// the report instead of failing the build. `entries/` is scanned first.
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    pub fn build(mut self) -> Result<BuildReport> {
        let start = Instant::now();
        let mut skipped = Vec::new();
        let targets = self.collect_targets(&mut skipped);
        trace_time!(start, "scan_journal");

        let total = targets.len();
        let mut store = IndexStore {
            version: INDEX_VERSION,
            last_built: Utc::now(),
            items: Vec::with_capacity(total),
        };
        let mut ids = HashSet::with_capacity(total);

        for (done, target) in targets.iter().enumerate() {
            if self.is_cancelled() {
                tracing::info!(done, total, "Index build cancelled");
                return Err(DiaristError::Interrupted);
            }

            match extract_scanned(
                &target.file,
                &target.category_root,
                target.category,
                target.subcategory,
            ) {
                Ok(record) => {
                    if !ids.insert(record.id.clone()) {
                        tracing::warn!(id = %record.id, path = %target.file.path.display(), "Duplicate id, keeping the first record");
                        skipped.push(SkippedPath::new(
                            &target.file.path,
                            format!("duplicate id {}", record.id),
                        ));
                        continue;
                    }
                    if let Some(progress) = self.progress.as_deref_mut() {
                        progress(done + 1, total, &record);
                    }
                    store.items.push(record);
                }
                Err(e) => {
                    tracing::warn!(path = %target.file.path.display(), error = %e, "Failed to index file");
                    skipped.push(SkippedPath::new(&target.file.path, e));
                }
            }
        }

        store.last_built = Utc::now();
        trace_time!(start, "build_index");
        tracing::debug!(records = store.len(), skipped = skipped.len(), "Index built");

        Ok(BuildReport { store, skipped })
    }

    fn collect_targets(&self, skipped: &mut Vec<SkippedPath>) -> Vec<Target> {
        let mut targets = Vec::new();

        let entries_root = self.root.join(Category::Entry.root_dir());
        self.push_subtree(
            &mut targets,
            skipped,
            &entries_root,
            &entries_root,
            Category::Entry,
            None,
        );

        let ai_root = self.root.join(Category::AiOutput.root_dir());
        for subcategory in Subcategory::ALL {
            self.push_subtree(
                &mut targets,
                skipped,
                &ai_root.join(subcategory.dir_name()),
                &ai_root,
                Category::AiOutput,
                Some(subcategory),
            );
        }
        for dir in FREEFORM_AI_DIRS {
            self.push_subtree(
                &mut targets,
                skipped,
                &ai_root.join(dir),
                &ai_root,
                Category::AiOutput,
                None,
            );
        }

        targets
    }

    fn push_subtree(
        &self,
        targets: &mut Vec<Target>,
        skipped: &mut Vec<SkippedPath>,
        dir: &Path,
        category_root: &Path,
        category: Category,
        subcategory: Option<Subcategory>,
    ) {
        let report = scan_markdown(dir);
        skipped.extend(report.skipped);
        targets.extend(report.files.into_iter().map(|file| Target {
            file,
            category,
            subcategory,
            category_root: category_root.to_path_buf(),
        }));
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}
