//! Value parsers for CLI arguments

use chrono::NaiveDate;

use diarist_core::format::OutputFormat;
use diarist_core::index::{Category, Subcategory};
use diarist_core::search::CategoryFilter;

/// Parse output format from string
pub fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Parse record category from string
pub fn parse_category(s: &str) -> std::result::Result<Category, String> {
    s.parse::<Category>().map_err(|e| e.to_string())
}

/// Parse AI output subcategory from string
pub fn parse_subcategory(s: &str) -> std::result::Result<Subcategory, String> {
    s.parse::<Subcategory>().map_err(|e| e.to_string())
}

/// Parse search category filter from string
pub fn parse_category_filter(s: &str) -> std::result::Result<CategoryFilter, String> {
    s.parse::<CategoryFilter>().map_err(|e| e.to_string())
}

/// Parse a calendar date (YYYY-MM-DD)
pub fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date: {} (expected YYYY-MM-DD)", s))
}
