use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::config::InsightConfig;
use crate::index::{IndexRecord, IndexStore};
use crate::search::SENSITIVE_PLACEHOLDER;
use crate::text::{ellipsize, theme_tokens, StopWords};

/// Longest window the CLI accepts
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// Evidence entries kept per recurring theme
const MAX_EVIDENCE: usize = 5;

/// Characters of excerpt quoted as evidence
const QUOTE_LENGTH: usize = 100;

/// Direction of a recurring theme across the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternTrend {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeEvidence {
    pub date: NaiveDate,
    pub relative_path: String,
    pub quote: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTheme {
    pub theme: String,
    /// Occurrences across every entry in the window
    pub occurrences: usize,
    pub entry_count: usize,
    pub first_seen: NaiveDate,
    pub last_seen: NaiveDate,
    pub trend: PatternTrend,
    pub related_entries: Vec<ThemeEvidence>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    pub date_range: DateSpan,
    pub window_days: i64,
    pub recurring_themes: Vec<RecurringTheme>,
    pub generated_at: DateTime<Utc>,
}

struct PatternTally<'a> {
    first_half: usize,
    second_half: usize,
    entries: Vec<&'a IndexRecord>,
}

/// Keywords recurring across entries dated within `window_days` of `today`.
///
/// The window is split at its time midpoint; the trend compares
/// occurrences in the later half against the earlier half.
#[tracing::instrument(skip(store, config), fields(records = store.len()))]
pub fn detect_recurring_themes(
    store: &IndexStore,
    window_days: i64,
    today: NaiveDate,
    config: &InsightConfig,
) -> Vec<RecurringTheme> {
    let start = window_start(today, window_days);
    let midpoint = start
        .checked_add_signed(Duration::days((today - start).num_days() / 2))
        .unwrap_or(today);

    let mut entries: Vec<&IndexRecord> = store.entries().filter(|e| e.date >= start).collect();
    entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

    let mut tallies: HashMap<String, PatternTally> = HashMap::new();
    for entry in &entries {
        let text = format!("{} {}", entry.display_title, entry.excerpt());
        let mut seen = HashSet::new();
        for word in theme_tokens(&text, StopWords::Pattern) {
            let tally = tallies.entry(word.clone()).or_insert_with(|| PatternTally {
                first_half: 0,
                second_half: 0,
                entries: Vec::new(),
            });
            if entry.date < midpoint {
                tally.first_half += 1;
            } else {
                tally.second_half += 1;
            }
            if seen.insert(word) {
                tally.entries.push(entry);
            }
        }
    }

    let mut themes: Vec<RecurringTheme> = tallies
        .into_iter()
        .filter(|(_, tally)| tally.entries.len() >= config.pattern_min_entries)
        .filter_map(|(theme, tally)| recurring_theme(theme, tally, config))
        .collect();

    themes.sort_by(|a, b| {
        b.occurrences
            .cmp(&a.occurrences)
            .then_with(|| a.theme.cmp(&b.theme))
    });
    themes.truncate(config.max_themes);
    themes
}

fn recurring_theme(
    theme: String,
    tally: PatternTally,
    config: &InsightConfig,
) -> Option<RecurringTheme> {
    let first_seen = tally.entries.first()?.date;
    let last_seen = tally.entries.last()?.date;

    Some(RecurringTheme {
        theme,
        occurrences: tally.first_half + tally.second_half,
        entry_count: tally.entries.len(),
        first_seen,
        last_seen,
        trend: pattern_trend(tally.first_half, tally.second_half, config),
        related_entries: tally
            .entries
            .iter()
            .take(MAX_EVIDENCE)
            .map(|e| evidence(e))
            .collect(),
    })
}

fn evidence(entry: &IndexRecord) -> ThemeEvidence {
    let source = match entry.excerpt() {
        _ if entry.sensitive => SENSITIVE_PLACEHOLDER,
        "" => entry.display_title.as_str(),
        excerpt => excerpt,
    };
    ThemeEvidence {
        date: entry.date,
        relative_path: entry.relative_path.clone(),
        quote: ellipsize(source, QUOTE_LENGTH),
    }
}

/// First day of a window ending at `today`, clamped to the earliest representable date
pub fn window_start(today: NaiveDate, window_days: i64) -> NaiveDate {
    Duration::try_days(window_days)
        .and_then(|window| today.checked_sub_signed(window))
        .unwrap_or(NaiveDate::MIN)
}

pub fn pattern_trend(
    first_half: usize,
    second_half: usize,
    config: &InsightConfig,
) -> PatternTrend {
    let (first, second) = (first_half as f64, second_half as f64);
    if second > first * config.pattern_increasing {
        PatternTrend::Increasing
    } else if second < first * config.pattern_decreasing {
        PatternTrend::Decreasing
    } else {
        PatternTrend::Stable
    }
}

/// Recurring themes plus the window they were computed over
pub fn generate_pattern_report(
    store: &IndexStore,
    window_days: i64,
    today: NaiveDate,
    now: DateTime<Utc>,
    config: &InsightConfig,
) -> PatternReport {
    PatternReport {
        date_range: DateSpan {
            start: window_start(today, window_days),
            end: today,
        },
        window_days,
        recurring_themes: detect_recurring_themes(store, window_days, today, config),
        generated_at: now,
    }
}
