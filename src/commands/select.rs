//! `diarist select` command - remember the journal folder

use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use crate::commands::output::print_json;
use diarist_core::config::GlobalSettings;
use diarist_core::error::{DiaristError, Result};

/// Execute the select command
pub fn execute(cli: &Cli, path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(DiaristError::JournalNotFound {
            path: path.to_path_buf(),
        });
    }
    let journal_path = path
        .canonicalize()
        .map_err(|e| DiaristError::io_operation("resolve", path.display(), e))?;

    let mut settings = GlobalSettings::load()?;
    settings.journal_path = Some(journal_path.clone());
    settings.save()?;
    tracing::info!(path = %journal_path.display(), "Journal selected");

    match cli.format {
        OutputFormat::Json => print_json(&serde_json::json!({ "journalPath": journal_path }))?,
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Selected journal: {}", journal_path.display());
            }
        }
    }

    Ok(())
}
