//! `diarist remove` command - drop a record from the index

use crate::cli::{Cli, OutputFormat};
use crate::commands::output::print_json;
use diarist_core::error::Result;
use diarist_core::journal::Journal;

/// Execute the remove command
pub fn execute(cli: &Cli, journal: &Journal, path: &str) -> Result<()> {
    let removed = journal.remove_item(path)?;

    match cli.format {
        OutputFormat::Json => {
            print_json(&serde_json::json!({ "path": path, "removed": removed }))?;
        }
        OutputFormat::Human => {
            if !cli.quiet {
                if removed {
                    println!("Removed: {}", path);
                } else {
                    println!("Not in index: {}", path);
                }
            }
        }
    }

    Ok(())
}
