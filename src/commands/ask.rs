//! `diarist ask` command - rank entries relevant to a question
//!
//! Only the ranked candidates are produced here; summarizing them is left
//! to whatever consumes the output (`--full` includes their content).

use chrono::NaiveDate;
use serde::Serialize;

use crate::cli::{Cli, OutputFormat};
use crate::commands::output::print_json;
use diarist_core::bail_usage;
use diarist_core::error::Result;
use diarist_core::journal::Journal;
use diarist_core::search::{DateRange, RankedRecord, Retrieval};

const NO_ENTRIES_IN_RANGE: &str =
    "No entries found in the selected date range. Try widening the dates.";
const NO_RELEVANT_MATCHES: &str =
    "No entries matched your question. Try different words or a wider date range.";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Candidate<'a> {
    id: &'a str,
    date: NaiveDate,
    title: &'a str,
    score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

/// Execute the ask command
pub fn execute(
    cli: &Cli,
    journal: &Journal,
    query: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    full: bool,
) -> Result<()> {
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            bail_usage!(format!("--from {} is after --to {}", from, to));
        }
    }

    let outcome = journal.retrieve(query, DateRange::new(from, to))?;
    tracing::debug!(candidates = outcome.matches().len(), "retrieve");

    let candidates = outcome
        .matches()
        .iter()
        .map(|ranked| candidate(journal, ranked, full))
        .collect::<Result<Vec<_>>>()?;

    match cli.format {
        OutputFormat::Json => {
            let status = match &outcome {
                Retrieval::Matches(_) => "matches",
                Retrieval::NoEntriesInRange => "no_entries_in_range",
                Retrieval::NoRelevantMatches => "no_relevant_matches",
            };
            print_json(&serde_json::json!({
                "status": status,
                "query": query,
                "candidates": candidates,
            }))?;
        }
        OutputFormat::Human => match &outcome {
            Retrieval::NoEntriesInRange => println!("{}", NO_ENTRIES_IN_RANGE),
            Retrieval::NoRelevantMatches => println!("{}", NO_RELEVANT_MATCHES),
            Retrieval::Matches(_) => output_human(cli, &candidates),
        },
    }

    Ok(())
}

fn candidate<'a>(
    journal: &Journal,
    ranked: &'a RankedRecord,
    full: bool,
) -> Result<Candidate<'a>> {
    let record = &ranked.record;
    let content = if full {
        Some(journal.read_record(record)?)
    } else {
        None
    };

    Ok(Candidate {
        id: &record.id,
        date: record.date,
        title: &record.display_title,
        score: ranked.score,
        content,
    })
}

fn output_human(cli: &Cli, candidates: &[Candidate]) {
    for (rank, candidate) in candidates.iter().enumerate() {
        println!(
            "{}. {} {} (score {})",
            rank + 1,
            candidate.date,
            candidate.title,
            candidate.score
        );
        if !cli.quiet {
            println!("   {}", candidate.id);
        }
        if let Some(content) = &candidate.content {
            println!();
            println!("{}", content.trim_end());
            println!();
        }
    }
}
