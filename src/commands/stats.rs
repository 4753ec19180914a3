//! `diarist stats` command - what the journal folder holds

use crate::cli::{Cli, OutputFormat};
use crate::commands::output::print_json;
use diarist_core::error::Result;
use diarist_core::journal::Journal;

/// Execute the stats command
pub fn execute(cli: &Cli, journal: &Journal) -> Result<()> {
    let stats = journal.data_stats()?;

    match cli.format {
        OutputFormat::Json => print_json(&stats)?,
        OutputFormat::Human => {
            println!("Journal: {}", stats.journal_path.display());
            println!(
                "Files: {} ({} bytes)",
                stats.total_files, stats.total_size_bytes
            );
            println!("Entries: {}", stats.entry_count);
            println!("AI outputs: {}", stats.ai_output_count);
            if let (Some(oldest), Some(newest)) = (stats.oldest_entry, stats.newest_entry) {
                println!("Range: {} to {}", oldest, newest);
            }
        }
    }

    Ok(())
}
