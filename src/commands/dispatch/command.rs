//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use crate::cli::Cli;
use diarist_core::config::GlobalSettings;
use diarist_core::error::Result;
use diarist_core::journal::Journal;

/// Journal root from `--root` / `DIARIST_ROOT`, else the selected journal
pub fn resolve_root(cli: &Cli) -> Result<Option<PathBuf>> {
    match &cli.root {
        Some(root) => Ok(Some(root.clone())),
        None => Ok(GlobalSettings::load()?.journal_path),
    }
}

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, start: Instant) -> Self {
        Self { cli, start }
    }

    /// Open the selected journal, failing when none is selected
    pub fn open_journal(&self) -> Result<Journal> {
        let root = resolve_root(self.cli)?;
        tracing::debug!(elapsed = ?self.start.elapsed(), root = ?root, "resolve_root");
        Journal::from_setting(root.as_deref())
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("diarist {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Index, search and review a markdown journal.");
        println!();
        println!("Run `diarist --help` for usage information.");
        Ok(())
    }
}
