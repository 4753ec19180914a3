//! `diarist search` command - substring search with snippets

use crate::cli::{Cli, OutputFormat};
use crate::commands::output::print_json;
use diarist_core::error::Result;
use diarist_core::journal::Journal;
use diarist_core::search::CategoryFilter;

/// Execute the search command
pub fn execute(cli: &Cli, journal: &Journal, query: &str, filter: CategoryFilter) -> Result<()> {
    let hits = journal.search(query, filter)?;
    tracing::debug!(query, %filter, hits = hits.len(), "search");

    match cli.format {
        OutputFormat::Json => print_json(&hits)?,
        OutputFormat::Human => {
            if hits.is_empty() {
                if !cli.quiet {
                    println!("No results found");
                }
                return Ok(());
            }
            for hit in &hits {
                println!("{}  {}  ({})", hit.record.date, hit.record.display_title, hit.record.id);
                if !cli.quiet && !hit.snippet.is_empty() {
                    println!("    {}", hit.snippet.replace('\n', " "));
                }
            }
        }
    }

    Ok(())
}
