//! `diarist insights` command - monthly statistics and themes

use crate::cli::{Cli, OutputFormat};
use crate::commands::output::print_json;
use diarist_core::error::Result;
use diarist_core::insights::{MonthlyInsights, ThemeTrend};
use diarist_core::journal::Journal;

/// Execute the insights command
pub fn execute(cli: &Cli, journal: &Journal, month: &str, months: usize) -> Result<()> {
    let insights = journal.monthly_insights(month, months)?;

    match cli.format {
        OutputFormat::Json => {
            if let [single] = insights.as_slice() {
                print_json(single)?;
            } else {
                print_json(&insights)?;
            }
        }
        OutputFormat::Human => {
            for (i, month) in insights.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                output_month(cli, month);
            }
        }
    }

    Ok(())
}

fn output_month(cli: &Cli, insights: &MonthlyInsights) {
    let stats = &insights.stats;
    println!("{}", insights.month);
    println!(
        "  {} entries on {}/{} days, {} words ({} avg)",
        stats.total_entries,
        stats.days_active,
        stats.days_in_month,
        stats.total_words,
        stats.avg_words_per_entry
    );

    let ai = &stats.ai_coverage;
    if !cli.quiet {
        println!(
            "  AI: {} daily, {} weekly, {} monthly, {} highlights, {} loops, {} questions, {} asks",
            ai.daily_reviews,
            ai.weekly_summaries,
            ai.monthly_summaries,
            ai.highlights,
            ai.open_loops,
            ai.questions,
            ai.asks
        );
    }

    if !insights.themes.is_empty() {
        println!("  Themes:");
        for theme in &insights.themes {
            let arrow = match theme.trend {
                Some(ThemeTrend::Up) => "↑",
                Some(ThemeTrend::Down) => "↓",
                Some(ThemeTrend::Flat) | None => "→",
            };
            println!(
                "    {} {} ({}x, {}% of entries)",
                arrow, theme.theme, theme.count, theme.percentage
            );
        }
    }

    if !cli.quiet && !insights.top_entries.is_empty() {
        println!("  Longest entries:");
        for entry in &insights.top_entries {
            println!("    {}  {} ({} words)", entry.date, entry.title, entry.word_count);
        }
    }
}
