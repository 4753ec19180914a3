use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::bail_invalid;
use crate::config::InsightConfig;
use crate::error::Result;
use crate::index::{IndexRecord, IndexStore, Subcategory};
use crate::text::{theme_tokens, StopWords};

/// Entries listed under "top entries"
const TOP_ENTRY_COUNT: usize = 5;

/// Entry dates kept as evidence for a theme
const THEME_SAMPLE_DATES: usize = 3;

/// Month-over-month direction of a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeTrend {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeFrequency {
    pub theme: String,
    /// Occurrences across all entries of the month
    pub count: usize,
    /// Distinct entries mentioning the theme
    pub entry_count: usize,
    /// Share of the month's entries mentioning the theme, rounded
    pub percentage: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<ThemeTrend>,
    pub sample_entries: Vec<NaiveDate>,
}

/// AI outputs dated within the month
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiCoverage {
    pub daily_reviews: usize,
    pub weekly_summaries: usize,
    pub highlights: usize,
    pub open_loops: usize,
    pub questions: usize,
    pub monthly_summaries: usize,
    pub asks: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    pub total_entries: usize,
    pub days_active: usize,
    pub days_in_month: u32,
    pub total_words: usize,
    pub avg_words_per_entry: usize,
    pub ai_coverage: AiCoverage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopEntry {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub word_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyInsights {
    /// `YYYY-MM`
    pub month: String,
    pub stats: MonthlyStats,
    pub themes: Vec<ThemeFrequency>,
    pub top_entries: Vec<TopEntry>,
}

/// First day of a `YYYY-MM` month
pub fn parse_month(month: &str) -> Result<NaiveDate> {
    let well_formed = month.len() == 7 && month.as_bytes()[4] == b'-';
    match NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d") {
        Ok(first) if well_formed => Ok(first),
        _ => bail_invalid!("month (expected YYYY-MM)", month),
    }
}

/// The `YYYY-MM` month before `month`
pub fn previous_month(month: &str) -> Result<String> {
    let first = parse_month(month)?;
    match first.checked_sub_months(Months::new(1)) {
        Some(previous) => Ok(previous.format("%Y-%m").to_string()),
        None => bail_invalid!("month", month),
    }
}

/// `count` consecutive months ending with `month`, oldest first
pub fn months_ending(month: &str, count: usize) -> Result<Vec<String>> {
    let mut months = vec![month.to_string()];
    for _ in 1..count {
        let earliest = months.last().map(String::as_str).unwrap_or(month);
        months.push(previous_month(earliest)?);
    }
    months.reverse();
    Ok(months)
}

/// Statistics, themes and longest entries for one month
#[tracing::instrument(skip(store, config), fields(records = store.len()))]
pub fn build_monthly_insights(
    month: &str,
    store: &IndexStore,
    config: &InsightConfig,
) -> Result<MonthlyInsights> {
    let first = parse_month(month)?;
    let in_month =
        |r: &&IndexRecord| r.date.year() == first.year() && r.date.month() == first.month();

    let mut entries: Vec<&IndexRecord> = store.entries().filter(in_month).collect();
    entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
    let ai_outputs: Vec<&IndexRecord> = store.ai_outputs().filter(in_month).collect();

    Ok(MonthlyInsights {
        month: month.to_string(),
        stats: monthly_stats(first, &entries, &ai_outputs),
        themes: extract_themes(&entries, config),
        top_entries: top_entries(&entries),
    })
}

/// Insights for each month, in the order given
pub fn build_multi_month_insights(
    months: &[String],
    store: &IndexStore,
    config: &InsightConfig,
) -> Result<Vec<MonthlyInsights>> {
    months
        .iter()
        .map(|month| build_monthly_insights(month, store, config))
        .collect()
}

/// Current themes annotated with their direction against the previous period.
///
/// Without a previous period the themes are returned unannotated.
pub fn calculate_theme_trends(
    current: &MonthlyInsights,
    previous: Option<&MonthlyInsights>,
    config: &InsightConfig,
) -> Vec<ThemeFrequency> {
    let Some(previous) = previous else {
        return current.themes.clone();
    };

    let previous_counts: HashMap<&str, usize> = previous
        .themes
        .iter()
        .map(|t| (t.theme.as_str(), t.count))
        .collect();

    current
        .themes
        .iter()
        .map(|theme| {
            let previous_count = previous_counts
                .get(theme.theme.as_str())
                .copied()
                .unwrap_or(0);
            ThemeFrequency {
                trend: Some(theme_trend(theme.count, previous_count, config)),
                ..theme.clone()
            }
        })
        .collect()
}

/// A theme absent last period is new, so it trends up
pub fn theme_trend(current: usize, previous: usize, config: &InsightConfig) -> ThemeTrend {
    if previous == 0 {
        return ThemeTrend::Up;
    }
    let (current, previous) = (current as f64, previous as f64);
    if current > previous * config.trend_up {
        ThemeTrend::Up
    } else if current < previous * config.trend_down {
        ThemeTrend::Down
    } else {
        ThemeTrend::Flat
    }
}

fn monthly_stats(
    first: NaiveDate,
    entries: &[&IndexRecord],
    ai_outputs: &[&IndexRecord],
) -> MonthlyStats {
    let total_entries = entries.len();
    let total_words: usize = entries.iter().map(|e| e.word_count()).sum();
    let avg_words_per_entry = if total_entries > 0 {
        (total_words as f64 / total_entries as f64).round() as usize
    } else {
        0
    };
    let days_active = entries.iter().map(|e| e.date).collect::<HashSet<_>>().len();

    MonthlyStats {
        total_entries,
        days_active,
        days_in_month: days_in_month(first),
        total_words,
        avg_words_per_entry,
        ai_coverage: ai_coverage(ai_outputs),
    }
}

fn days_in_month(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .map(|next| next.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31)
}

fn ai_coverage(ai_outputs: &[&IndexRecord]) -> AiCoverage {
    let mut coverage = AiCoverage::default();
    for output in ai_outputs {
        match (output.subcategory, output.ai_dir()) {
            (Some(Subcategory::DailyReview), _) => coverage.daily_reviews += 1,
            (Some(Subcategory::WeeklySummary), _) => coverage.weekly_summaries += 1,
            (Some(Subcategory::Highlights), _) => coverage.highlights += 1,
            (Some(Subcategory::OpenLoops), _) => coverage.open_loops += 1,
            (Some(Subcategory::Question), _) => coverage.questions += 1,
            (None, Some("monthly")) => coverage.monthly_summaries += 1,
            (None, Some("ask")) => coverage.asks += 1,
            (None, _) => {}
        }
    }
    coverage
}

#[derive(Default)]
struct ThemeTally {
    count: usize,
    entries: usize,
    dates: Vec<NaiveDate>,
}

/// `entries` must be in date order so sample dates are the earliest ones
fn extract_themes(entries: &[&IndexRecord], config: &InsightConfig) -> Vec<ThemeFrequency> {
    let mut tallies: HashMap<String, ThemeTally> = HashMap::new();

    for entry in entries {
        let text = format!("{} {}", entry.display_title, entry.excerpt());
        let mut seen = HashSet::new();
        for word in theme_tokens(&text, StopWords::Monthly) {
            let tally = tallies.entry(word.clone()).or_default();
            tally.count += 1;
            if seen.insert(word) {
                tally.entries += 1;
                if !tally.dates.contains(&entry.date) {
                    tally.dates.push(entry.date);
                }
            }
        }
    }

    let total = entries.len();
    let mut themes: Vec<ThemeFrequency> = tallies
        .into_iter()
        .filter(|(_, tally)| tally.entries >= config.monthly_min_entries)
        .map(|(theme, tally)| ThemeFrequency {
            theme,
            count: tally.count,
            entry_count: tally.entries,
            percentage: ((tally.entries as f64 / total as f64) * 100.0).round() as u32,
            trend: None,
            sample_entries: tally.dates.into_iter().take(THEME_SAMPLE_DATES).collect(),
        })
        .collect();

    themes.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.theme.cmp(&b.theme)));
    themes.truncate(config.max_themes);
    themes
}

fn top_entries(entries: &[&IndexRecord]) -> Vec<TopEntry> {
    let mut longest: Vec<&&IndexRecord> = entries.iter().filter(|e| e.word_count() > 0).collect();
    longest.sort_by(|a, b| {
        b.word_count()
            .cmp(&a.word_count())
            .then_with(|| a.date.cmp(&b.date))
    });

    longest
        .into_iter()
        .take(TOP_ENTRY_COUNT)
        .map(|e| TopEntry {
            id: e.id.clone(),
            date: e.date,
            title: e.display_title.clone(),
            word_count: e.word_count(),
        })
        .collect()
}
