//! Subcommands and their arguments

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::cli::parse::{
    parse_category, parse_category_filter, parse_date, parse_subcategory,
};
use diarist_core::index::{Category, Subcategory};
use diarist_core::search::CategoryFilter;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild the index from the journal folder
    Index(IndexArgs),

    /// Re-index one file after it changed or was deleted
    Update(UpdateArgs),

    /// Drop one file's record from the index
    Remove(RemoveArgs),

    /// Rank entries relevant to a question
    Ask(AskArgs),

    /// Jump to a record by title or date
    Switch(SwitchArgs),

    /// Substring search with snippets
    Search(SearchArgs),

    /// Monthly statistics and themes
    Insights(InsightsArgs),

    /// Recurring themes over a rolling window
    Patterns(PatternsArgs),

    /// What the journal folder holds
    Stats,

    /// Remember a journal folder for later commands
    Select(SelectArgs),
}

#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Only report whether the persisted index is usable
    #[arg(long)]
    pub check: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Path relative to entries/ or ai/
    pub path: String,

    /// Record category (entry or ai-output)
    #[arg(long, short, default_value = "entry", value_parser = parse_category)]
    pub category: Category,

    /// AI output kind; inferred from the path when omitted
    #[arg(long, short, value_parser = parse_subcategory)]
    pub subcategory: Option<Subcategory>,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Path relative to entries/ or ai/
    pub path: String,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Free-text question
    pub query: String,

    /// Earliest entry date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Latest entry date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,

    /// Include the full content of each candidate
    #[arg(long)]
    pub full: bool,
}

#[derive(Args, Debug)]
pub struct SwitchArgs {
    /// Title or date fragment; omit to list recent records
    #[arg(default_value = "")]
    pub query: String,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to look for
    pub query: String,

    /// Restrict to entries or AI outputs (all, entries, ai)
    #[arg(long, short, default_value = "all", value_parser = parse_category_filter)]
    pub category: CategoryFilter,
}

#[derive(Args, Debug)]
pub struct InsightsArgs {
    /// Month to review (YYYY-MM)
    pub month: String,

    /// Number of months ending with MONTH to include
    #[arg(long, default_value_t = 1)]
    pub months: usize,
}

#[derive(Args, Debug)]
pub struct PatternsArgs {
    /// Window size in days (defaults to the journal's configured window)
    #[arg(long)]
    pub days: Option<i64>,
}

#[derive(Args, Debug)]
pub struct SelectArgs {
    /// Journal folder to select
    pub path: PathBuf,
}
