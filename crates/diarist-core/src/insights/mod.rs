//! Aggregates computed from the index alone
//!
//! Nothing here reads journal files. Themes are keywords pulled from
//! titles and excerpts; they are a heuristic proxy for topics.

mod monthly;
mod patterns;
mod stats;

pub use monthly::{
    build_monthly_insights, build_multi_month_insights, calculate_theme_trends, months_ending,
    parse_month, previous_month, theme_trend, AiCoverage, MonthlyInsights, MonthlyStats,
    ThemeFrequency, ThemeTrend, TopEntry,
};
pub use patterns::{
    detect_recurring_themes, generate_pattern_report, pattern_trend, window_start, DateSpan,
    PatternReport, PatternTrend, RecurringTheme, ThemeEvidence, MAX_WINDOW_DAYS,
};
pub use stats::{data_stats, DataStats};
