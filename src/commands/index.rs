//! `diarist index` command - rebuild the journal index
//!
//! - `diarist index` - full rebuild, persisted on success
//! - `diarist index --check` - report whether the persisted index is usable

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::cli::{Cli, OutputFormat};
use crate::commands::output::print_json;
use diarist_core::error::Result;
use diarist_core::index::{IndexBuilder, IndexLoad, IndexRecord};
use diarist_core::journal::Journal;

/// Report progress every this many files
const PROGRESS_INTERVAL: usize = 100;

/// Execute the index command
pub fn execute(cli: &Cli, journal: &Journal) -> Result<()> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = Arc::clone(&interrupted);

    let _ = ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::SeqCst);
    });

    let show_progress = cli.format == OutputFormat::Human && !cli.quiet;
    let mut on_progress = |done: usize, total: usize, _record: &IndexRecord| {
        if show_progress && (done % PROGRESS_INTERVAL == 0 || done == total) {
            eprintln!("  indexed {}/{} files", done, total);
        }
    };

    let report = IndexBuilder::new(journal.root())
        .with_progress(&mut on_progress)
        .with_cancel(&interrupted)
        .build()?;
    journal.write_index(&report.store)?;

    let entries = report.store.entries().count();
    let ai_outputs = report.store.ai_outputs().count();

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "status": "ok",
                "records": report.store.len(),
                "entries": entries,
                "aiOutputs": ai_outputs,
                "skipped": report.skipped,
            });
            print_json(&output)?;
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!(
                    "Indexed {} records ({} entries, {} AI outputs)",
                    report.store.len(),
                    entries,
                    ai_outputs
                );
            }
            for skipped in &report.skipped {
                eprintln!("warning: skipped {}: {}", skipped.path.display(), skipped.reason);
            }
        }
    }

    Ok(())
}

/// Execute `index --check`
pub fn execute_check(cli: &Cli, journal: &Journal) -> Result<()> {
    let load = journal.read_index();

    match cli.format {
        OutputFormat::Json => {
            let output = match &load {
                IndexLoad::Loaded(store) => serde_json::json!({
                    "status": "ok",
                    "records": store.len(),
                    "lastBuilt": store.last_built,
                }),
                IndexLoad::NeedsRebuild(reason) => serde_json::json!({
                    "status": "needs_rebuild",
                    "reason": reason.to_string(),
                }),
            };
            print_json(&output)?;
        }
        OutputFormat::Human => match &load {
            IndexLoad::Loaded(store) => println!(
                "Index ok: {} records, last built {}",
                store.len(),
                store.last_built.to_rfc3339()
            ),
            IndexLoad::NeedsRebuild(reason) => {
                println!("Index needs rebuild ({}). Run `diarist index`.", reason)
            }
        },
    }

    Ok(())
}
