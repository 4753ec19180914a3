//! `diarist patterns` command - recurring themes over a rolling window

use crate::cli::{Cli, OutputFormat};
use crate::commands::output::print_json;
use diarist_core::bail_usage;
use diarist_core::error::Result;
use diarist_core::insights::{PatternTrend, MAX_WINDOW_DAYS};
use diarist_core::journal::Journal;

/// Execute the patterns command
pub fn execute(cli: &Cli, journal: &Journal, days: Option<i64>) -> Result<()> {
    if days.is_some_and(|d| d <= 0 || d > MAX_WINDOW_DAYS) {
        bail_usage!(format!(
            "--days must be between 1 and {} days",
            MAX_WINDOW_DAYS
        ));
    }

    let report = journal.recurring_themes(days)?;

    match cli.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Human => {
            println!(
                "Recurring themes {} to {}",
                report.date_range.start, report.date_range.end
            );
            if report.recurring_themes.is_empty() {
                println!("  None yet. Themes need at least 3 entries in the window.");
                return Ok(());
            }
            for theme in &report.recurring_themes {
                let trend = match theme.trend {
                    PatternTrend::Increasing => "increasing",
                    PatternTrend::Decreasing => "decreasing",
                    PatternTrend::Stable => "stable",
                };
                println!(
                    "  {} - {} mentions in {} entries, {} ({} to {})",
                    theme.theme,
                    theme.occurrences,
                    theme.entry_count,
                    trend,
                    theme.first_seen,
                    theme.last_seen
                );
                if !cli.quiet {
                    for evidence in &theme.related_entries {
                        println!("      {}: \"{}\"", evidence.date, evidence.quote);
                    }
                }
            }
        }
    }

    Ok(())
}
