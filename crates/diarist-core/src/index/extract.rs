//! Turn one markdown file into an [`IndexRecord`]

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use super::scan::{relative_id, stat_path, ScannedFile};
use super::types::{Category, IndexRecord, Subcategory};
use crate::text::truncate_chars;

/// Characters of cleaned content kept as the excerpt
pub const EXCERPT_LENGTH: usize = 200;

/// Characters of raw content kept for keyword matching.
/// Matches past this bound are invisible to ranking.
pub const SEARCHABLE_TEXT_LENGTH: usize = 1000;

/// Suffixes dropped when a file name stands in for the title
const TITLE_SUFFIXES: [&str; 5] = [".review", ".summary", ".highlights", ".question", ".md"];

static TITLE_RE: OnceLock<Option<Regex>> = OnceLock::new();
static DATE_RE: OnceLock<Option<Regex>> = OnceLock::new();
static HEADING_RE: OnceLock<Option<Regex>> = OnceLock::new();
static BOLD_RE: OnceLock<Option<Regex>> = OnceLock::new();
static ITALIC_RE: OnceLock<Option<Regex>> = OnceLock::new();
static LINK_RE: OnceLock<Option<Regex>> = OnceLock::new();
static SENSITIVE_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn regex(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(error = %e, pattern, "Failed to compile extraction regex");
            None
        }
    })
    .as_ref()
}

fn strip<'t>(
    cell: &'static OnceLock<Option<Regex>>,
    pattern: &str,
    text: &'t str,
    replacement: &str,
) -> Cow<'t, str> {
    match regex(cell, pattern) {
        Some(re) => re.replace_all(text, replacement),
        None => Cow::Borrowed(text),
    }
}

/// Stat, read and extract a single file
pub fn extract_file(
    path: &Path,
    category_root: &Path,
    category: Category,
    subcategory: Option<Subcategory>,
) -> std::io::Result<IndexRecord> {
    let file = stat_path(path)?;
    extract_scanned(&file, category_root, category, subcategory)
}

/// Read and extract a file the scanner already found
pub fn extract_scanned(
    file: &ScannedFile,
    category_root: &Path,
    category: Category,
    subcategory: Option<Subcategory>,
) -> std::io::Result<IndexRecord> {
    let bytes = fs::read(&file.path)?;
    let content = String::from_utf8_lossy(&bytes);
    let id = relative_id(category_root, &file.path);
    let file_name = file
        .path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| id.clone());

    let (frontmatter, body) = split_frontmatter(&content);

    Ok(IndexRecord {
        relative_path: id.clone(),
        id,
        category,
        subcategory,
        display_title: display_title(&file_name, body),
        date: date_from_file_name(&file_name).unwrap_or_else(|| file.modified.date_naive()),
        updated_at: file.modified,
        word_count: Some(count_words(&content)),
        excerpt: Some(excerpt(body)),
        searchable_text: Some(searchable_text(&content)),
        sensitive: frontmatter.is_some_and(is_sensitive),
    })
}

/// First `# ` heading, or the file name with known suffixes stripped
pub fn display_title(file_name: &str, body: &str) -> String {
    if let Some(caps) = regex(&TITLE_RE, r"(?m)^#[ \t]+(.+)$").and_then(|re| re.captures(body)) {
        let title = caps[1].trim();
        if !title.is_empty() {
            return title.to_string();
        }
    }

    let stem = file_name.strip_suffix(".md").unwrap_or(file_name);
    TITLE_SUFFIXES
        .iter()
        .find_map(|suffix| stem.strip_suffix(suffix))
        .unwrap_or(stem)
        .to_string()
}

/// First valid `YYYY-MM-DD` in a file name
pub fn date_from_file_name(file_name: &str) -> Option<NaiveDate> {
    regex(&DATE_RE, r"[0-9]{4}-[0-9]{2}-[0-9]{2}")?
        .find_iter(file_name)
        .find_map(|m| NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok())
}

/// Count of maximal whitespace-delimited substrings
pub fn count_words(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Markdown-stripped leading text
pub fn excerpt(body: &str) -> String {
    let cleaned = strip(&HEADING_RE, r"(?m)^#+[ \t]+", body, "");
    let cleaned = strip(&BOLD_RE, r"\*\*(.+?)\*\*", &cleaned, "$1");
    let cleaned = strip(&ITALIC_RE, r"\*(.+?)\*", &cleaned, "$1");
    let cleaned = strip(&LINK_RE, r"\[(.+?)\]\(.+?\)", &cleaned, "$1");

    truncate_chars(cleaned.trim(), EXCERPT_LENGTH).to_string()
}

/// Lowercased bounded prefix of the raw content
pub fn searchable_text(content: &str) -> String {
    truncate_chars(content, SEARCHABLE_TEXT_LENGTH).to_lowercase()
}

/// Split a leading `---` YAML block from the body
pub fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    if let Some(end) = rest.find("\n---") {
        let frontmatter = &rest[..end];
        let after = &rest[end + 4..];
        let body = after.split_once('\n').map(|(_, body)| body).unwrap_or("");
        return (Some(frontmatter), body);
    }

    (None, content)
}

/// Whether a frontmatter block declares `sensitive: true`
pub fn is_sensitive(frontmatter: &str) -> bool {
    match serde_yaml::from_str::<serde_yaml::Value>(frontmatter) {
        Ok(value) => match value.get("sensitive") {
            Some(serde_yaml::Value::Bool(flag)) => *flag,
            Some(serde_yaml::Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        },
        Err(e) => {
            tracing::debug!(error = %e, "Unparseable frontmatter, falling back to pattern match");
            regex(&SENSITIVE_RE, r"(?i)sensitive:\s*true").is_some_and(|re| re.is_match(frontmatter))
        }
    }
}
