//! `diarist switch` command - quick title/date navigation

use crate::cli::{Cli, OutputFormat};
use crate::commands::output::print_json;
use diarist_core::error::Result;
use diarist_core::journal::Journal;

/// Execute the switch command
pub fn execute(cli: &Cli, journal: &Journal, query: &str) -> Result<()> {
    let matches = journal.quick_switch(query)?;

    match cli.format {
        OutputFormat::Json => print_json(&matches)?,
        OutputFormat::Human => {
            if matches.is_empty() {
                if query.trim().is_empty() {
                    println!("No entries yet");
                } else {
                    println!("No results found");
                }
                return Ok(());
            }
            for m in &matches {
                println!(
                    "{}  {}  [{}]  {}",
                    m.record.date,
                    m.record.display_title,
                    type_label(&m.record),
                    m.record.id
                );
            }
        }
    }

    Ok(())
}

fn type_label(record: &diarist_core::index::IndexRecord) -> String {
    match record.subcategory {
        Some(subcategory) => subcategory.to_string(),
        None if record.is_entry() => "entry".to_string(),
        None => "ai-output".to_string(),
    }
}
