//! Integration tests for the diarist CLI
//!
//! These tests run the diarist binary against temporary journal folders.

mod support;

use predicates::prelude::*;
use support::TestJournal;

fn anxious_journal() -> TestJournal {
    let journal = TestJournal::new();
    journal
        .write(
            "entries/2024/01/2024-01-01.md",
            "# Monday\n\nFelt anxious before the review.",
        )
        .write(
            "entries/2024/01/2024-01-02.md",
            "# Tuesday\n\nAnxious in the morning, anxious at lunch, anxious at night.",
        )
        .write(
            "entries/2024/01/2024-01-03.md",
            "# Wednesday\n\nCalm and rested.",
        );
    journal
}

// ============================================================================
// Help and journal selection
// ============================================================================

#[test]
fn test_help_lists_commands() {
    let journal = TestJournal::new();
    journal
        .bare_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: diarist"))
        .stdout(predicate::str::contains("index"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("insights"));
}

#[test]
fn test_no_journal_selected() {
    let journal = TestJournal::new();
    journal
        .bare_cmd()
        .args(["ask", "anything"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no journal selected"));
}

#[test]
fn test_no_journal_selected_json_envelope() {
    let journal = TestJournal::new();
    journal
        .bare_cmd()
        .args(["--format", "json", "stats"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"type\":\"no_journal_selected\""));
}

#[test]
fn test_missing_journal_folder() {
    let journal = TestJournal::new();
    journal
        .bare_cmd()
        .arg("--root")
        .arg(journal.root().join("nope"))
        .arg("stats")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("journal folder not found"));
}

#[test]
fn test_select_then_use_selected_journal() {
    let journal = anxious_journal();
    journal
        .bare_cmd()
        .arg("select")
        .arg(journal.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected journal"));

    assert!(journal.config_dir().join("settings.toml").exists());

    journal
        .bare_cmd()
        .args(["ask", "anxious"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tuesday"));
}

#[test]
fn test_unknown_argument_json_is_usage_error() {
    let journal = TestJournal::new();
    journal
        .cmd()
        .args(["--format", "json", "ask", "x", "--bogus"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("usage_error"));
}

// ============================================================================
// Index maintenance
// ============================================================================

#[test]
fn test_index_builds_and_checks() {
    let journal = anxious_journal();
    journal.write("ai/daily/2024-01-01.review.md", "# Review\n\nA calm day.");

    journal
        .cmd()
        .args(["index", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("needs rebuild"));

    journal
        .cmd()
        .arg("index")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Indexed 4 records (3 entries, 1 AI outputs)",
        ));

    assert!(journal.root().join("index.json").exists());

    journal
        .cmd()
        .args(["index", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Index ok: 4 records"));
}

#[test]
fn test_index_json_output() {
    let journal = anxious_journal();
    let output = journal.json(&["index"]);
    assert_eq!(output["status"], "ok");
    assert_eq!(output["records"], 3);
    assert_eq!(output["entries"], 3);
    assert_eq!(output["aiOutputs"], 0);
}

#[test]
fn test_stale_index_version_needs_rebuild() {
    let journal = anxious_journal();
    journal.write(
        "index.json",
        r#"{"version": 0, "lastBuilt": "2024-01-01T00:00:00Z", "items": []}"#,
    );

    let output = journal.json(&["index", "--check"]);
    assert_eq!(output["status"], "needs_rebuild");
}

#[test]
fn test_update_and_remove() {
    let journal = anxious_journal();
    journal.cmd().arg("index").assert().success();

    journal.write("entries/2024/01/2024-01-04.md", "# Thursday\n\nVolcano documentary.");
    journal
        .cmd()
        .args(["update", "2024/01/2024-01-04.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added: 2024/01/2024-01-04.md"));

    let found = journal.json(&["search", "volcano"]);
    assert_eq!(found.as_array().unwrap().len(), 1);

    journal
        .cmd()
        .args(["remove", "2024/01/2024-01-04.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));

    let found = journal.json(&["search", "volcano"]);
    assert!(found.as_array().unwrap().is_empty());
}

#[test]
fn test_update_ai_output_infers_subcategory() {
    let journal = anxious_journal();
    journal.cmd().arg("index").assert().success();
    journal.write("ai/weekly/2024-W01.summary.md", "# Week one\n\nBusy.");

    let output = journal.json(&["update", "weekly/2024-W01.summary.md", "--category", "ai-output"]);
    assert_eq!(output["change"], "added");

    let matches = journal.json(&["switch", "week one"]);
    assert_eq!(matches[0]["subcategory"], "weekly-summary");
    assert_eq!(matches[0]["id"], "weekly/2024-W01.summary.md");
}

// ============================================================================
// Retrieval
// ============================================================================

#[test]
fn test_ask_ranks_by_occurrences() {
    let journal = anxious_journal();
    let output = journal.json(&["ask", "anxious"]);

    assert_eq!(output["status"], "matches");
    let ids: Vec<_> = output["candidates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["2024/01/2024-01-02.md", "2024/01/2024-01-01.md"]);
}

#[test]
fn test_ask_human_output() {
    let journal = anxious_journal();
    journal
        .cmd()
        .args(["ask", "anxious"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. 2024-01-02 Tuesday"))
        .stdout(predicate::str::contains("Wednesday").not());
}

#[test]
fn test_ask_date_range() {
    let journal = TestJournal::new();
    journal
        .write("entries/2024-01-01.md", "# January\n\nWork again.")
        .write("entries/2024-02-01.md", "# February\n\nWork again.");

    let output = journal.json(&["ask", "work", "--from", "2024-02-01", "--to", "2024-02-28"]);
    let candidates = output["candidates"].as_array().unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0]["date"], "2024-02-01");
}

#[test]
fn test_ask_full_includes_content() {
    let journal = anxious_journal();
    let output = journal.json(&["ask", "anxious", "--full"]);
    let content = output["candidates"][0]["content"].as_str().unwrap();
    assert!(content.contains("anxious at lunch"));
}

#[test]
fn test_ask_empty_outcomes_are_distinct() {
    let empty = TestJournal::new();
    empty
        .cmd()
        .args(["ask", "anything"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found in the selected date range"));
    assert_eq!(empty.json(&["ask", "anything"])["status"], "no_entries_in_range");

    let journal = anxious_journal();
    journal
        .cmd()
        .args(["ask", "volcano"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries matched your question"));
    assert_eq!(journal.json(&["ask", "volcano"])["status"], "no_relevant_matches");
}

#[test]
fn test_ask_rejects_inverted_range() {
    let journal = anxious_journal();
    journal
        .cmd()
        .args(["ask", "anxious", "--from", "2024-02-01", "--to", "2024-01-01"])
        .assert()
        .code(2);
}

#[test]
fn test_ask_rejects_bad_date() {
    let journal = anxious_journal();
    journal
        .cmd()
        .args(["ask", "anxious", "--from", "last week"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date"));
}

// ============================================================================
// Navigation and search
// ============================================================================

#[test]
fn test_switch_title_match() {
    let journal = anxious_journal();
    let matches = journal.json(&["switch", "tuesday"]);
    assert_eq!(matches[0]["displayTitle"], "Tuesday");
    assert!(matches[0]["score"].as_u64().unwrap() >= 100);
}

#[test]
fn test_switch_empty_query_lists_records() {
    let journal = anxious_journal();
    let matches = journal.json(&["switch"]);
    assert_eq!(matches.as_array().unwrap().len(), 3);
}

#[test]
fn test_search_snippets_and_filter() {
    let journal = anxious_journal();
    journal
        .write("ai/daily/2024-01-02.review.md", "# Review\n\nYou sounded anxious.")
        .write(
            "entries/private.md",
            "---\nsensitive: true\n---\n# Private\n\nAnxious about the secret.",
        );

    let all = journal.json(&["search", "anxious"]);
    assert_eq!(all.as_array().unwrap().len(), 4);

    let private = all
        .as_array()
        .unwrap()
        .iter()
        .find(|hit| hit["id"] == "private.md")
        .unwrap();
    assert_eq!(private["snippet"], "[Sensitive content - unlock to view]");
    assert!(private.get("excerpt").is_none());
    assert!(private.get("searchableText").is_none());
    assert!(!private.to_string().contains("secret"));

    let ai_only = journal.json(&["search", "anxious", "--category", "ai"]);
    assert_eq!(ai_only.as_array().unwrap().len(), 1);
    assert_eq!(ai_only[0]["id"], "daily/2024-01-02.review.md");
}

#[test]
fn test_search_no_results() {
    let journal = anxious_journal();
    journal
        .cmd()
        .args(["search", "volcano"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found"));
}

// ============================================================================
// Insights and stats
// ============================================================================

#[test]
fn test_insights_month() {
    let journal = TestJournal::new();
    journal
        .write("entries/2024-03-01.md", "# Garden\n\nPlanted tomatoes.")
        .write("entries/2024-03-05.md", "# Garden\n\nWatered tomatoes.")
        .write("ai/monthly/2024-03.md", "# March\n\nSummary.");

    let output = journal.json(&["insights", "2024-03"]);
    assert_eq!(output["month"], "2024-03");
    assert_eq!(output["stats"]["totalEntries"], 2);
    assert_eq!(output["stats"]["daysInMonth"], 31);
    assert_eq!(output["stats"]["aiCoverage"]["monthlySummaries"], 1);

    let themes: Vec<_> = output["themes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["theme"].as_str().unwrap().to_string())
        .collect();
    assert!(themes.contains(&"garden".to_string()));
    assert!(themes.contains(&"tomatoes".to_string()));
    assert_eq!(output["themes"][0]["trend"], "up");
}

#[test]
fn test_insights_invalid_month() {
    let journal = anxious_journal();
    journal
        .cmd()
        .args(["insights", "2024-13"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid month"));
}

#[test]
fn test_insights_multiple_months() {
    let journal = anxious_journal();
    let output = journal.json(&["insights", "2024-02", "--months", "2"]);
    let months = output.as_array().unwrap();
    assert_eq!(months.len(), 2);
    assert_eq!(months[0]["month"], "2024-01");
    assert_eq!(months[0]["stats"]["totalEntries"], 3);
}

#[test]
fn test_patterns_report() {
    let journal = TestJournal::new();
    let today = chrono::Utc::now().date_naive();
    for offset in 1..=3 {
        let date = today - chrono::Duration::days(offset);
        journal.write(
            &format!("entries/{}.md", date),
            "# Evening\n\nPracticed piano scales.",
        );
    }

    let report = journal.json(&["patterns", "--days", "30"]);
    assert_eq!(report["windowDays"], 30);
    let themes = report["recurringThemes"].as_array().unwrap();
    let piano = themes.iter().find(|t| t["theme"] == "piano").unwrap();
    assert_eq!(piano["entryCount"], 3);
    assert_eq!(piano["relatedEntries"].as_array().unwrap().len(), 3);
}

#[test]
fn test_patterns_rejects_out_of_range_window() {
    let journal = anxious_journal();
    for days in ["0", "200000000"] {
        journal
            .cmd()
            .args(["patterns", "--days", days])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("--days must be between"));
    }
}

#[test]
fn test_stats() {
    let journal = anxious_journal();
    journal.write("ai/ask/2024-01-05-why.ask.md", "# Why\n\nBecause.");

    let stats = journal.json(&["stats"]);
    assert_eq!(stats["totalFiles"], 4);
    assert_eq!(stats["entryCount"], 3);
    assert_eq!(stats["aiOutputCount"], 1);
    assert_eq!(stats["oldestEntry"], "2024-01-01");
    assert_eq!(stats["newestEntry"], "2024-01-03");
}
