//! The journal context
//!
//! A [`Journal`] bundles the journal root with its configuration and is
//! passed explicitly to every index, retrieval and insight call. There is
//! no process-wide journal or settings cache.

pub mod paths;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::JournalConfig;
use crate::error::{DiaristError, Result};
use crate::index::{
    self, BuildReport, Category, IndexBuilder, IndexLoad, IndexRecord, IndexStore, ItemChange,
    Subcategory,
};
use crate::insights::{self, DataStats, MonthlyInsights, PatternReport};
use crate::search::{self, CategoryFilter, DateRange, QuickMatch, Retrieval, TextMatch};
use paths::CONFIG_FILE;

/// An opened journal folder
#[derive(Debug, Clone)]
pub struct Journal {
    root: PathBuf,
    config: JournalConfig,
}

impl Journal {
    /// Open a journal from an optional configured root.
    ///
    /// A missing root is an explicit failure; callers never proceed without one.
    pub fn from_setting(root: Option<&Path>) -> Result<Self> {
        match root {
            Some(root) => Self::open(root),
            None => Err(DiaristError::NoJournalSelected),
        }
    }

    /// Open the journal at `root`, loading `diarist.toml` when present
    #[tracing::instrument(skip(root), fields(root = %root.display()))]
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(DiaristError::JournalNotFound {
                path: root.to_path_buf(),
            });
        }

        let config = JournalConfig::load_or_default(&root.join(CONFIG_FILE))?;
        Ok(Self::with_config(root, config))
    }

    /// Build a journal context with an explicit configuration
    pub fn with_config(root: &Path, config: JournalConfig) -> Self {
        Journal {
            root: root.to_path_buf(),
            config,
        }
    }

    /// Get the journal root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the configuration
    pub fn config(&self) -> &JournalConfig {
        &self.config
    }

    /// Absolute path of a record given its category and id
    pub fn record_path(&self, category: Category, id: &str) -> PathBuf {
        self.root.join(category.root_dir()).join(id)
    }

    /// Full content of a record, for handing retrieval candidates downstream
    pub fn read_record(&self, record: &IndexRecord) -> Result<String> {
        let path = self.record_path(record.category, &record.relative_path);
        fs::read_to_string(&path).map_err(|e| DiaristError::io_operation("read", path.display(), e))
    }

    /// Full rebuild without writing
    pub fn build_index(&self) -> Result<BuildReport> {
        IndexBuilder::new(&self.root).build()
    }

    /// Read the persisted index
    pub fn read_index(&self) -> IndexLoad {
        index::read_index(&self.root)
    }

    /// Persist an index store
    pub fn write_index(&self, store: &IndexStore) -> Result<()> {
        index::write_index(&self.root, store)
    }

    /// Read the index, rebuilding and persisting it when absent
    pub fn load_or_rebuild(&self) -> Result<IndexStore> {
        index::load_or_rebuild(&self.root)
    }

    /// Re-index a single file after it was saved
    pub fn update_item(
        &self,
        relative_path: &str,
        category: Category,
        subcategory: Option<Subcategory>,
    ) -> Result<ItemChange> {
        index::update_index_item(&self.root, relative_path, category, subcategory)
    }

    /// Drop a single record from the persisted index
    pub fn remove_item(&self, relative_path: &str) -> Result<bool> {
        index::remove_index_item(&self.root, relative_path)
    }

    /// Rank entries for a free-text question
    pub fn retrieve(&self, query: &str, range: DateRange) -> Result<Retrieval> {
        let store = self.load_or_rebuild()?;
        Ok(search::retrieve(
            &store,
            query,
            range,
            &self.config.search,
            Utc::now(),
        ))
    }

    /// Fast title navigation
    pub fn quick_switch(&self, query: &str) -> Result<Vec<QuickMatch>> {
        let store = self.load_or_rebuild()?;
        Ok(search::quick_switch(
            &store,
            query,
            &self.config.search,
            Utc::now(),
        ))
    }

    /// Substring search with snippets
    pub fn search(&self, query: &str, filter: CategoryFilter) -> Result<Vec<TextMatch>> {
        let store = self.load_or_rebuild()?;
        Ok(search::text_search(
            &store,
            query,
            filter,
            self.config.search.search_limit,
        ))
    }

    /// Statistics and themes for `months` consecutive months ending with `month`,
    /// oldest first. Each month's themes carry trends against the month before it.
    pub fn monthly_insights(&self, month: &str, months: usize) -> Result<Vec<MonthlyInsights>> {
        let store = self.load_or_rebuild()?;
        let config = &self.config.insights;

        let range = insights::months_ending(month, months.max(1) + 1)?;
        let all = insights::build_multi_month_insights(&range, &store, config)?;

        Ok(all
            .windows(2)
            .map(|pair| MonthlyInsights {
                themes: insights::calculate_theme_trends(&pair[1], Some(&pair[0]), config),
                ..pair[1].clone()
            })
            .collect())
    }

    /// Recurring themes over the trailing window ending today
    pub fn recurring_themes(&self, window_days: Option<i64>) -> Result<PatternReport> {
        let store = self.load_or_rebuild()?;
        let window = window_days.unwrap_or(self.config.insights.default_window_days);
        Ok(insights::generate_pattern_report(
            &store,
            window,
            today(),
            Utc::now(),
            &self.config.insights,
        ))
    }

    /// File and record counts for the data transparency view
    pub fn data_stats(&self) -> Result<DataStats> {
        let store = self.load_or_rebuild()?;
        Ok(insights::data_stats(&self.root, &store))
    }
}

fn today() -> NaiveDate {
    let now: DateTime<Utc> = Utc::now();
    now.date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_root_is_no_journal_selected() {
        let err = Journal::from_setting(None).unwrap_err();
        assert!(matches!(err, DiaristError::NoJournalSelected));
    }

    #[test]
    fn test_open_nonexistent_folder() {
        let dir = tempdir().unwrap();
        let err = Journal::open(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, DiaristError::JournalNotFound { .. }));
    }

    #[test]
    fn test_open_reads_config() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[search]\nmax_candidates = 3\n",
        )
        .unwrap();

        let journal = Journal::from_setting(Some(dir.path())).unwrap();
        assert_eq!(journal.config().search.max_candidates, 3);
        assert_eq!(journal.root(), dir.path());
    }

    #[test]
    fn test_record_path() {
        let dir = tempdir().unwrap();
        let journal = Journal::open(dir.path()).unwrap();
        assert_eq!(
            journal.record_path(Category::Entry, "2024/01/2024-01-01.md"),
            dir.path().join("entries").join("2024/01/2024-01-01.md")
        );
        assert_eq!(
            journal.record_path(Category::AiOutput, "daily/2024-01-01.review.md"),
            dir.path().join("ai").join("daily/2024-01-01.review.md")
        );
    }

    #[test]
    fn test_retrieve_rebuilds_missing_index() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("entries")).unwrap();
        fs::write(
            dir.path().join("entries/2024-03-01.md"),
            "# Garden\nPlanted tomatoes in the garden.",
        )
        .unwrap();

        let journal = Journal::open(dir.path()).unwrap();
        let outcome = journal.retrieve("garden", DateRange::default()).unwrap();

        assert!(matches!(outcome, Retrieval::Matches(ref m) if m.len() == 1));
        assert!(dir.path().join("index.json").exists());
    }

    #[test]
    fn test_monthly_insights_carry_trends() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("entries")).unwrap();
        for (name, body) in [
            ("2024-01-10.md", "# Running
running"),
            ("2024-02-10.md", "# Running
running"),
            ("2024-02-11.md", "# Running
running"),
        ] {
            fs::write(dir.path().join("entries").join(name), body).unwrap();
        }

        let journal = Journal::open(dir.path()).unwrap();
        let months = journal.monthly_insights("2024-02", 2).unwrap();

        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, "2024-01");
        assert_eq!(months[1].month, "2024-02");
        let running = &months[1].themes[0];
        assert_eq!(running.theme, "running");
        assert_eq!(running.trend, Some(insights::ThemeTrend::Up));
    }
}
