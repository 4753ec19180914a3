//! CLI argument parsing for diarist
//!
//! Global flags: --root, --format, --quiet, --verbose, --log-level, --log-json

pub mod commands;
pub mod parse;

use clap::Parser;
use std::path::PathBuf;

pub use commands::Commands;
pub use diarist_core::format::OutputFormat;
use parse::parse_format;

/// Diarist - index, search and review a markdown journal
#[derive(Parser, Debug)]
#[command(name = "diarist")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Journal folder (overrides the selected journal)
    #[arg(long, global = true, env = "DIARIST_ROOT")]
    pub root: Option<PathBuf>,

    /// Output format (human or json)
    #[arg(long, global = true, default_value = "human", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Debug-level logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. "info", "diarist_core=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "diarist", "--root", "/tmp/j", "ask", "anxious", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/j")));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Some(Commands::Ask(_))));
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["diarist", "--format", "records", "stats"]).is_err());
    }
}
