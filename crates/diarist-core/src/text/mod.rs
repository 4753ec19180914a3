//! Text processing utilities for query and theme tokenization

use std::collections::HashSet;
use std::sync::OnceLock;

/// Words ignored when extracting monthly themes
static MONTHLY_STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

/// Words ignored when detecting recurring patterns
static PATTERN_STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

/// Shortest word that can become a theme
pub const MIN_THEME_WORD_LEN: usize = 4;

/// Which stop-word list theme extraction filters against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopWords {
    /// Month-at-a-glance themes
    Monthly,
    /// Recurring themes over a rolling window
    Pattern,
}

impl StopWords {
    fn set(self) -> &'static HashSet<&'static str> {
        match self {
            StopWords::Monthly => MONTHLY_STOP_WORDS.get_or_init(|| {
                [
                    "the", "and", "for", "with", "that", "this", "from", "have", "been", "were",
                    "they", "what", "about", "which", "when", "where", "there", "their", "would",
                    "could", "should", "just", "like", "more", "some", "into", "than", "time",
                    "very", "after", "before", "today", "entry", "journal", "wrote", "writing",
                    "think", "thought", "feeling", "felt",
                ]
                .iter()
                .copied()
                .collect()
            }),
            StopWords::Pattern => PATTERN_STOP_WORDS.get_or_init(|| {
                [
                    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for",
                    "not", "on", "with", "he", "as", "you", "do", "at", "this", "but", "his", "by",
                    "from", "they", "we", "say", "her", "she", "or", "an", "will", "my", "one",
                    "all", "would", "there", "their", "was", "were", "been", "has", "had", "are",
                    "is", "am", "can", "could", "today", "yesterday", "tomorrow", "day", "week",
                    "month", "year",
                ]
                .iter()
                .copied()
                .collect()
            }),
        }
    }

    pub fn contains(self, word: &str) -> bool {
        self.set().contains(word)
    }
}

/// Split a free-text query into lowercase search terms.
///
/// Terms shorter than `min_len` characters carry no signal and are dropped.
pub fn query_tokens(query: &str, min_len: usize) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| t.chars().count() >= min_len)
        .map(str::to_string)
        .collect()
}

/// Candidate theme words from a title and excerpt, in order of appearance
pub fn theme_tokens(text: &str, stop_words: StopWords) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|w| w.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|w| w.chars().count() >= MIN_THEME_WORD_LEN)
        .filter(|w| !stop_words.contains(w))
        .collect()
}

/// Count non-overlapping occurrences of `needle` in `haystack`
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Longest prefix of `s` with at most `max` characters
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate to `max` characters, appending `...` when anything was cut
pub fn ellipsize(s: &str, max: usize) -> String {
    let truncated = truncate_chars(s, max);
    if truncated.len() < s.len() {
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}
