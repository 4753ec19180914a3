//! Configuration type definitions
//!
//! All fields are defaulted; a journal overrides any of them in `diarist.toml`.

use serde::{Deserialize, Serialize};

/// Per-journal configuration (`<root>/diarist.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Retrieval and ranking parameters
    #[serde(default)]
    pub search: SearchConfig,

    /// Insight and pattern detection parameters
    #[serde(default)]
    pub insights: InsightConfig,
}

/// Configuration for retrieval scoring and result limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Records updated within this many days get `recent_bonus`
    #[serde(default = "default_recent_days")]
    pub recent_days: i64,

    /// Bonus for records updated within `recent_days`
    #[serde(default = "default_recent_bonus")]
    pub recent_bonus: u32,

    /// Records updated within this many days get `month_bonus`
    #[serde(default = "default_month_days")]
    pub month_days: i64,

    /// Bonus for records updated within `month_days` (additive with `recent_bonus`)
    #[serde(default = "default_month_bonus")]
    pub month_bonus: u32,

    /// Points for a query token found in the title
    #[serde(default = "default_title_match_weight")]
    pub title_match_weight: u32,

    /// Points per occurrence of a query token in the searchable text
    #[serde(default = "default_body_match_weight")]
    pub body_match_weight: u32,

    /// Query tokens shorter than this are discarded
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,

    /// Maximum candidates returned by retrieval
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,

    /// Maximum results returned by quick switch
    #[serde(default = "default_quick_switch_limit")]
    pub quick_switch_limit: usize,

    /// Maximum results returned by text search
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

/// Configuration for theme extraction and trend bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Month-over-month ratio above which a theme trends up
    #[serde(default = "default_trend_up")]
    pub trend_up: f64,

    /// Month-over-month ratio below which a theme trends down
    #[serde(default = "default_trend_down")]
    pub trend_down: f64,

    /// Second-half/first-half ratio above which a recurring theme is increasing
    #[serde(default = "default_pattern_increasing")]
    pub pattern_increasing: f64,

    /// Second-half/first-half ratio below which a recurring theme is decreasing
    #[serde(default = "default_pattern_decreasing")]
    pub pattern_decreasing: f64,

    /// Distinct entries a monthly theme must appear in
    #[serde(default = "default_monthly_min_entries")]
    pub monthly_min_entries: usize,

    /// Distinct entries a recurring theme must appear in
    #[serde(default = "default_pattern_min_entries")]
    pub pattern_min_entries: usize,

    /// Maximum themes reported
    #[serde(default = "default_max_themes")]
    pub max_themes: usize,

    /// Window used by pattern detection when none is given
    #[serde(default = "default_window_days")]
    pub default_window_days: i64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            recent_days: default_recent_days(),
            recent_bonus: default_recent_bonus(),
            month_days: default_month_days(),
            month_bonus: default_month_bonus(),
            title_match_weight: default_title_match_weight(),
            body_match_weight: default_body_match_weight(),
            min_token_len: default_min_token_len(),
            max_candidates: default_max_candidates(),
            quick_switch_limit: default_quick_switch_limit(),
            search_limit: default_search_limit(),
        }
    }
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            trend_up: default_trend_up(),
            trend_down: default_trend_down(),
            pattern_increasing: default_pattern_increasing(),
            pattern_decreasing: default_pattern_decreasing(),
            monthly_min_entries: default_monthly_min_entries(),
            pattern_min_entries: default_pattern_min_entries(),
            max_themes: default_max_themes(),
            default_window_days: default_window_days(),
        }
    }
}

fn default_recent_days() -> i64 {
    7
}

fn default_recent_bonus() -> u32 {
    3
}

fn default_month_days() -> i64 {
    30
}

fn default_month_bonus() -> u32 {
    1
}

fn default_title_match_weight() -> u32 {
    10
}

fn default_body_match_weight() -> u32 {
    2
}

fn default_min_token_len() -> usize {
    3
}

fn default_max_candidates() -> usize {
    8
}

fn default_quick_switch_limit() -> usize {
    20
}

fn default_search_limit() -> usize {
    50
}

fn default_trend_up() -> f64 {
    1.2
}

fn default_trend_down() -> f64 {
    0.8
}

fn default_pattern_increasing() -> f64 {
    1.3
}

fn default_pattern_decreasing() -> f64 {
    0.7
}

fn default_monthly_min_entries() -> usize {
    2
}

fn default_pattern_min_entries() -> usize {
    3
}

fn default_max_themes() -> usize {
    10
}

fn default_window_days() -> i64 {
    90
}
