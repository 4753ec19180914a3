use serde::Serialize;

use super::CategoryFilter;
use crate::index::{IndexRecord, IndexStore};
use crate::text::truncate_chars;

/// Shown instead of content for records marked sensitive
pub const SENSITIVE_PLACEHOLDER: &str = "[Sensitive content - unlock to view]";

/// Characters of context kept on each side of a match
const CONTEXT_RADIUS: usize = 60;

/// Preview length when the query only matched the title or date
const FALLBACK_PREVIEW_LEN: usize = 150;

/// A text search hit. Sensitive records carry no excerpt or searchable text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextMatch {
    #[serde(flatten)]
    pub record: IndexRecord,
    pub snippet: String,
}

/// Case-insensitive substring search over titles, dates and searchable text.
///
/// Results are newest first, capped at `limit`.
pub fn text_search(
    store: &IndexStore,
    query: &str,
    filter: CategoryFilter,
    limit: usize,
) -> Vec<TextMatch> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<&IndexRecord> = store
        .items
        .iter()
        .filter(|record| filter.accepts(record))
        .filter(|record| {
            record.display_title.to_lowercase().contains(&query)
                || record.date.to_string().contains(&query)
                || record.searchable_text().contains(&query)
        })
        .collect();

    hits.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.updated_at.cmp(&a.updated_at))
            .then_with(|| a.id.cmp(&b.id))
    });
    hits.truncate(limit);

    hits.into_iter()
        .map(|record| TextMatch {
            snippet: snippet(record, &query),
            record: record.redacted(),
        })
        .collect()
}

/// Context around the first occurrence of `query`, which must be lowercase
pub fn snippet(record: &IndexRecord, query: &str) -> String {
    if record.sensitive {
        return SENSITIVE_PLACEHOLDER.to_string();
    }

    let text = match record.searchable_text() {
        "" => record.excerpt(),
        text => text,
    };
    if text.is_empty() {
        return String::new();
    }

    let lowered = text.to_lowercase();
    let Some(byte_idx) = lowered.find(query) else {
        return truncate_chars(text, FALLBACK_PREVIEW_LEN).to_string();
    };

    let total = lowered.chars().count();
    let match_start = lowered[..byte_idx].chars().count();
    let start = match_start.saturating_sub(CONTEXT_RADIUS);
    let end = (match_start + query.chars().count() + CONTEXT_RADIUS).min(total);

    let mut snippet: String = lowered.chars().skip(start).take(end - start).collect();
    if start > 0 {
        snippet.insert_str(0, "...");
    }
    if end < total {
        snippet.push_str("...");
    }
    snippet
}
