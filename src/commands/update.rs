//! `diarist update` command - re-index a single file

use crate::cli::{Cli, OutputFormat};
use crate::commands::output::print_json;
use diarist_core::error::Result;
use diarist_core::index::{Category, ItemChange, Subcategory};
use diarist_core::journal::Journal;

/// Execute the update command
pub fn execute(
    cli: &Cli,
    journal: &Journal,
    path: &str,
    category: Category,
    subcategory: Option<Subcategory>,
) -> Result<()> {
    let change = journal.update_item(path, category, subcategory)?;

    match cli.format {
        OutputFormat::Json => {
            print_json(&serde_json::json!({
                "path": path,
                "category": category,
                "change": change,
            }))?;
        }
        OutputFormat::Human => {
            if !cli.quiet {
                let verb = match change {
                    ItemChange::Added => "Added",
                    ItemChange::Replaced => "Updated",
                    ItemChange::Removed => "Removed",
                    ItemChange::Absent => "Not indexed (file missing)",
                };
                println!("{}: {}", verb, path);
            }
        }
    }

    Ok(())
}
