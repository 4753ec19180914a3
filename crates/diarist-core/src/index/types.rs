use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DiaristError;
use crate::journal::paths::{AI_DIR, ENTRIES_DIR};

/// Current index format version
pub const INDEX_VERSION: u32 = 1;

/// Which subtree a record was indexed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// A journal entry under `entries/`
    Entry,
    /// A generated output under `ai/`
    AiOutput,
}

impl Category {
    /// Directory under the journal root holding this category
    pub fn root_dir(self) -> &'static str {
        match self {
            Category::Entry => ENTRIES_DIR,
            Category::AiOutput => AI_DIR,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Entry => write!(f, "entry"),
            Category::AiOutput => write!(f, "ai-output"),
        }
    }
}

impl FromStr for Category {
    type Err = DiaristError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "entry" => Ok(Category::Entry),
            "ai-output" | "ai" => Ok(Category::AiOutput),
            other => Err(DiaristError::invalid_value("category", other)),
        }
    }
}

/// Kind of structured AI output. Free-form outputs (ask, monthly) have none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subcategory {
    DailyReview,
    WeeklySummary,
    Highlights,
    OpenLoops,
    Question,
}

impl Subcategory {
    pub const ALL: [Subcategory; 5] = [
        Subcategory::DailyReview,
        Subcategory::WeeklySummary,
        Subcategory::Highlights,
        Subcategory::OpenLoops,
        Subcategory::Question,
    ];

    /// Directory under `ai/` holding this subcategory
    pub fn dir_name(self) -> &'static str {
        match self {
            Subcategory::DailyReview => "daily",
            Subcategory::WeeklySummary => "weekly",
            Subcategory::Highlights => "highlights",
            Subcategory::OpenLoops => "loops",
            Subcategory::Question => "questions",
        }
    }

    /// Subcategory owning an `ai/` directory, if any
    pub fn from_dir_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.dir_name() == name)
    }

    /// Subcategory implied by the first component of an `ai/`-relative path
    pub fn from_relative_path(relative_path: &str) -> Option<Self> {
        relative_path
            .split('/')
            .next()
            .and_then(Self::from_dir_name)
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Subcategory::DailyReview => "daily-review",
            Subcategory::WeeklySummary => "weekly-summary",
            Subcategory::Highlights => "highlights",
            Subcategory::OpenLoops => "open-loops",
            Subcategory::Question => "question",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Subcategory {
    type Err = DiaristError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|sub| sub.to_string() == lower || sub.dir_name() == lower)
            .ok_or_else(|| DiaristError::invalid_value("subcategory", s))
    }
}

/// Free-form AI output directories (indexed without a subcategory)
pub const FREEFORM_AI_DIRS: [&str; 2] = ["monthly", "ask"];

/// Metadata for a single markdown file (stored in index)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexRecord {
    /// Path relative to the category root, `/`-separated
    pub id: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<Subcategory>,
    /// Path used to re-read the file, relative to the category root
    pub relative_path: String,
    pub display_title: String,
    /// Calendar date from the file name, or the modification date
    pub date: NaiveDate,
    /// Last modification time of the file
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    /// Leading markdown-stripped text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Lowercased, bounded prefix of the raw content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub searchable_text: Option<String>,
    /// Frontmatter declared the file sensitive
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,
}

impl IndexRecord {
    pub fn word_count(&self) -> usize {
        self.word_count.unwrap_or(0)
    }

    pub fn excerpt(&self) -> &str {
        self.excerpt.as_deref().unwrap_or("")
    }

    pub fn searchable_text(&self) -> &str {
        self.searchable_text.as_deref().unwrap_or("")
    }

    pub fn is_entry(&self) -> bool {
        self.category == Category::Entry
    }

    /// Copy safe for listings: sensitive records lose their content previews
    pub fn redacted(&self) -> IndexRecord {
        let mut record = self.clone();
        if record.sensitive {
            record.excerpt = None;
            record.searchable_text = None;
        }
        record
    }

    /// Name of the `ai/` subtree this record came from
    pub fn ai_dir(&self) -> Option<&str> {
        match self.category {
            Category::AiOutput => self.relative_path.split('/').next(),
            Category::Entry => None,
        }
    }
}

/// The complete index document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStore {
    /// Index format version
    pub version: u32,
    /// Time of the last full or incremental write
    pub last_built: DateTime<Utc>,
    /// Records in no particular order; lookups are by id
    pub items: Vec<IndexRecord>,
}

impl Default for IndexStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexStore {
    /// Create a new empty store
    pub fn new() -> Self {
        IndexStore {
            version: INDEX_VERSION,
            last_built: Utc::now(),
            items: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a record by id
    pub fn get(&self, id: &str) -> Option<&IndexRecord> {
        self.items.iter().find(|r| r.id == id)
    }

    /// Check if an id exists in the index
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Replace the record with the same id, or append it. Returns true on replace.
    pub fn upsert(&mut self, record: IndexRecord) -> bool {
        match self.items.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                *existing = record;
                true
            }
            None => {
                self.items.push(record);
                false
            }
        }
    }

    /// Remove the record with this id. Returns true if one was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|r| r.id != id);
        self.items.len() != before
    }

    /// Journal entries only
    pub fn entries(&self) -> impl Iterator<Item = &IndexRecord> {
        self.items.iter().filter(|r| r.is_entry())
    }

    /// AI outputs only
    pub fn ai_outputs(&self) -> impl Iterator<Item = &IndexRecord> {
        self.items.iter().filter(|r| !r.is_entry())
    }

    /// Mark the store as written now
    pub fn touch(&mut self) {
        self.last_built = Utc::now();
    }
}

/// Why a persisted index cannot be used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildReason {
    /// No index document exists yet
    Missing,
    /// The document exists but could not be read
    Unreadable(String),
    /// The document is not valid index JSON
    Corrupt(String),
    /// The document was written by a different schema version
    VersionMismatch { found: u32, expected: u32 },
}

impl fmt::Display for RebuildReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebuildReason::Missing => write!(f, "index missing"),
            RebuildReason::Unreadable(e) => write!(f, "index unreadable: {}", e),
            RebuildReason::Corrupt(e) => write!(f, "index corrupt: {}", e),
            RebuildReason::VersionMismatch { found, expected } => {
                write!(f, "index version {} (expected {})", found, expected)
            }
        }
    }
}

/// Result of reading the persisted index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexLoad {
    Loaded(IndexStore),
    /// Treated uniformly as "needs full rebuild", never partially trusted
    NeedsRebuild(RebuildReason),
}

impl IndexLoad {
    pub fn into_store(self) -> Option<IndexStore> {
        match self {
            IndexLoad::Loaded(store) => Some(store),
            IndexLoad::NeedsRebuild(_) => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, IndexLoad::Loaded(_))
    }
}

/// Effect of a single-file index update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemChange {
    Added,
    Replaced,
    Removed,
    /// The file is gone and the index never had it
    Absent,
}

/// A path the scanner or extractor had to skip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPath {
    pub path: PathBuf,
    pub reason: String,
}

impl SkippedPath {
    pub fn new(path: &Path, reason: impl fmt::Display) -> Self {
        SkippedPath {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Output of a full rebuild
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub store: IndexStore,
    /// Unreadable directories and files that contributed no record
    pub skipped: Vec<SkippedPath>,
}
