use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{rank_order, recency_bonus};
use crate::config::SearchConfig;
use crate::index::{IndexRecord, IndexStore};

const EXACT_TITLE_SCORE: u32 = 100;
const TITLE_PREFIX_SCORE: u32 = 50;
const TITLE_SUBSTRING_SCORE: u32 = 20;
const DATE_SUBSTRING_SCORE: u32 = 10;
const BASELINE_SCORE: u32 = 1;

/// A quick-switch result. Sensitive records carry no excerpt or searchable text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickMatch {
    #[serde(flatten)]
    pub record: IndexRecord,
    pub score: u32,
}

/// Title-first navigation across entries and AI outputs.
///
/// An empty query lists the most recently updated records.
pub fn quick_switch(
    store: &IndexStore,
    query: &str,
    config: &SearchConfig,
    now: DateTime<Utc>,
) -> Vec<QuickMatch> {
    let query = query.trim().to_lowercase();

    let mut scored: Vec<(&IndexRecord, u32)> = if query.is_empty() {
        store.items.iter().map(|record| (record, 0)).collect()
    } else {
        store
            .items
            .iter()
            .filter(|record| is_candidate(record, &query))
            .map(|record| {
                let score = title_score(record, &query)
                    .saturating_add(recency_bonus(record.updated_at, now, config));
                (record, score)
            })
            .collect()
    };

    scored.sort_by(|a, b| rank_order(*a, *b));
    scored.truncate(config.quick_switch_limit);

    scored
        .into_iter()
        .map(|(record, score)| QuickMatch {
            record: record.redacted(),
            score,
        })
        .collect()
}

fn is_candidate(record: &IndexRecord, query: &str) -> bool {
    record.display_title.to_lowercase().contains(query)
        || record.date.to_string().contains(query)
        || record.searchable_text().contains(query)
}

fn title_score(record: &IndexRecord, query: &str) -> u32 {
    let title = record.display_title.to_lowercase();
    if title == query {
        EXACT_TITLE_SCORE
    } else if title.starts_with(query) {
        TITLE_PREFIX_SCORE
    } else if title.contains(query) {
        TITLE_SUBSTRING_SCORE
    } else if record.date.to_string().contains(query) {
        DATE_SUBSTRING_SCORE
    } else {
        BASELINE_SCORE
    }
}
