//! Querying the index
//!
//! Three views over the same records:
//! - [`retrieve`]: keyword-ranked entries for a question, with typed empty outcomes
//! - [`quick_switch`]: title-first navigation across every record
//! - [`text_search`]: substring search with context snippets
//!
//! None of these read files; they work on the in-memory store only.

mod rank;
mod snippet;
mod switch;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::config::SearchConfig;
use crate::error::DiaristError;
use crate::index::IndexRecord;

pub use rank::{retrieve, score_record};
pub use snippet::{snippet, text_search, TextMatch, SENSITIVE_PLACEHOLDER};
pub use switch::{quick_switch, QuickMatch};

/// Inclusive date bounds; an open end is unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        DateRange { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// A record with its relevance score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedRecord {
    pub record: IndexRecord,
    pub score: u32,
}

/// Outcome of ranking entries for a question.
///
/// The two empty outcomes need different guidance for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retrieval {
    /// Best candidates, highest score first
    Matches(Vec<RankedRecord>),
    /// No entry falls inside the requested dates
    NoEntriesInRange,
    /// Entries exist but none shares a term with the query
    NoRelevantMatches,
}

impl Retrieval {
    pub fn matches(&self) -> &[RankedRecord] {
        match self {
            Retrieval::Matches(matches) => matches,
            Retrieval::NoEntriesInRange | Retrieval::NoRelevantMatches => &[],
        }
    }
}

/// Which records a text search looks at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Entries,
    AiOutputs,
}

impl CategoryFilter {
    pub fn accepts(self, record: &IndexRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Entries => record.is_entry(),
            CategoryFilter::AiOutputs => !record.is_entry(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = DiaristError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(CategoryFilter::All),
            "entry" | "entries" => Ok(CategoryFilter::Entries),
            "ai" | "ai-output" | "ai-outputs" => Ok(CategoryFilter::AiOutputs),
            other => Err(DiaristError::invalid_value("category filter", other)),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Entries => write!(f, "entries"),
            CategoryFilter::AiOutputs => write!(f, "ai"),
        }
    }
}

/// Additive bonus for recently modified records: both tiers apply inside the short window
pub fn recency_bonus(updated_at: DateTime<Utc>, now: DateTime<Utc>, config: &SearchConfig) -> u32 {
    let age = now.signed_duration_since(updated_at);
    let mut bonus = 0;
    if age <= chrono::Duration::days(config.recent_days) {
        bonus += config.recent_bonus;
    }
    if age <= chrono::Duration::days(config.month_days) {
        bonus += config.month_bonus;
    }
    bonus
}

/// Highest score first, then most recently updated, then id
fn rank_order(a: (&IndexRecord, u32), b: (&IndexRecord, u32)) -> std::cmp::Ordering {
    b.1.cmp(&a.1)
        .then_with(|| b.0.updated_at.cmp(&a.0.updated_at))
        .then_with(|| a.0.id.cmp(&b.0.id))
}
