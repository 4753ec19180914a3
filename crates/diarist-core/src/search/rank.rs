use chrono::{DateTime, Utc};

use super::{rank_order, recency_bonus, DateRange, RankedRecord, Retrieval};
use crate::config::SearchConfig;
use crate::index::{IndexRecord, IndexStore};
use crate::text::{count_occurrences, query_tokens};

/// Rank entries inside `range` against a free-text query.
///
/// Only entries are candidates; AI outputs never feed back into answers.
#[tracing::instrument(skip(store, config, now), fields(records = store.len()))]
pub fn retrieve(
    store: &IndexStore,
    query: &str,
    range: DateRange,
    config: &SearchConfig,
    now: DateTime<Utc>,
) -> Retrieval {
    let candidates: Vec<&IndexRecord> = store
        .entries()
        .filter(|record| range.contains(record.date))
        .collect();

    if candidates.is_empty() {
        tracing::debug!("No entries in range");
        return Retrieval::NoEntriesInRange;
    }

    let tokens = query_tokens(query, config.min_token_len);
    let mut scored: Vec<(&IndexRecord, u32)> = candidates
        .into_iter()
        .map(|record| (record, score_record(record, &tokens, config, now)))
        .filter(|(_, score)| *score > 0)
        .collect();

    scored.sort_by(|a, b| rank_order(*a, *b));
    scored.truncate(config.max_candidates);

    if scored.is_empty() {
        tracing::debug!(tokens = tokens.len(), "No relevant matches");
        return Retrieval::NoRelevantMatches;
    }

    Retrieval::Matches(
        scored
            .into_iter()
            .map(|(record, score)| RankedRecord {
                record: record.redacted(),
                score,
            })
            .collect(),
    )
}

/// Keyword score for one record. A record with no keyword signal scores 0
/// regardless of how recently it changed.
pub fn score_record(
    record: &IndexRecord,
    tokens: &[String],
    config: &SearchConfig,
    now: DateTime<Utc>,
) -> u32 {
    let title = record.display_title.to_lowercase();
    let text = record.searchable_text();

    let keyword_score: u32 = tokens
        .iter()
        .map(|token| {
            let title_score = if title.contains(token.as_str()) {
                config.title_match_weight
            } else {
                0
            };
            let occurrences = u32::try_from(count_occurrences(text, token)).unwrap_or(u32::MAX);
            title_score.saturating_add(config.body_match_weight.saturating_mul(occurrences))
        })
        .fold(0, u32::saturating_add);

    if keyword_score == 0 {
        return 0;
    }

    keyword_score.saturating_add(recency_bonus(record.updated_at, now, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{Category, IndexStore};
    use crate::search::test_support::entry;
    use chrono::{NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn store(items: Vec<IndexRecord>) -> IndexStore {
        let mut store = IndexStore::new();
        for item in items {
            store.upsert(item);
        }
        store
    }

    fn old() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_ranking_by_occurrences() {
        let store = store(vec![
            entry("2024-01-01", "Monday", "felt anxious before the call", old()),
            entry(
                "2024-01-02",
                "Tuesday",
                "anxious all morning, anxious at lunch, still anxious",
                old(),
            ),
            entry("2024-01-03", "Wednesday", "calm and rested", old()),
        ]);

        let outcome = retrieve(
            &store,
            "anxious",
            DateRange::default(),
            &SearchConfig::default(),
            now(),
        );

        let Retrieval::Matches(matches) = outcome else {
            panic!("expected matches, got {:?}", outcome);
        };
        let ids: Vec<_> = matches.iter().map(|m| m.record.id.as_str()).collect();
        assert_eq!(ids, vec!["2024-01-02.md", "2024-01-01.md"]);
        assert_eq!(matches[0].score, 6);
        assert_eq!(matches[1].score, 2);
    }

    #[test]
    fn test_date_filter_applies_before_scoring() {
        let store = store(vec![
            entry("2024-01-01", "January", "work work work", old()),
            entry("2024-02-01", "February", "work", old()),
        ]);
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 2, 1),
            NaiveDate::from_ymd_opt(2024, 2, 28),
        );

        let outcome = retrieve(&store, "work", range, &SearchConfig::default(), now());

        let ids: Vec<_> = outcome.matches().iter().map(|m| m.record.id.as_str()).collect();
        assert_eq!(ids, vec!["2024-02-01.md"]);
    }

    #[test]
    fn test_empty_store_is_no_entries_in_range() {
        let outcome = retrieve(
            &IndexStore::new(),
            "anything",
            DateRange::default(),
            &SearchConfig::default(),
            now(),
        );
        assert_eq!(outcome, Retrieval::NoEntriesInRange);
    }

    #[test]
    fn test_unmatched_query_is_no_relevant_matches() {
        let store = store(vec![entry("2024-01-01", "Monday", "quiet day", now())]);
        let outcome = retrieve(
            &store,
            "volcano",
            DateRange::default(),
            &SearchConfig::default(),
            now(),
        );
        assert_eq!(outcome, Retrieval::NoRelevantMatches);
    }

    #[test]
    fn test_short_tokens_carry_no_signal() {
        let store = store(vec![entry("2024-01-01", "Monday", "an ok day", now())]);
        let outcome = retrieve(&store, "an ok", DateRange::default(), &SearchConfig::default(), now());
        assert_eq!(outcome, Retrieval::NoRelevantMatches);
    }

    #[test]
    fn test_ai_outputs_are_not_candidates() {
        let mut review = entry("2024-01-01", "Review", "anxious anxious", now());
        review.category = Category::AiOutput;
        review.id = "daily/2024-01-01.review.md".into();
        let store = store(vec![review]);

        let outcome = retrieve(
            &store,
            "anxious",
            DateRange::default(),
            &SearchConfig::default(),
            now(),
        );
        assert_eq!(outcome, Retrieval::NoEntriesInRange);
    }

    #[test]
    fn test_title_match_and_recency_bonus() {
        let recent = now() - chrono::Duration::days(1);
        let record = entry("2024-06-14", "Garden notes", "the garden is blooming", recent);
        let score = score_record(
            &record,
            &["garden".to_string()],
            &SearchConfig::default(),
            now(),
        );
        // title 10 + one occurrence 2 + recency 3 + 1
        assert_eq!(score, 16);
    }

    #[test]
    fn test_ties_prefer_recent_updates() {
        let store = store(vec![
            entry("2024-01-01", "A", "walk", old()),
            entry("2024-01-02", "B", "walk", old() + chrono::Duration::hours(1)),
        ]);
        let outcome = retrieve(&store, "walk", DateRange::default(), &SearchConfig::default(), now());
        let ids: Vec<_> = outcome.matches().iter().map(|m| m.record.id.as_str()).collect();
        assert_eq!(ids, vec!["2024-01-02.md", "2024-01-01.md"]);
    }

    #[test]
    fn test_keeps_top_candidates_only() {
        let records = (1..=12)
            .map(|day| entry(&format!("2024-03-{:02}", day), "Day", "walk", old()))
            .collect();
        let store = store(records);
        let outcome = retrieve(&store, "walk", DateRange::default(), &SearchConfig::default(), now());
        assert_eq!(outcome.matches().len(), 8);
    }
}
