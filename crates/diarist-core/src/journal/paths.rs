//! Well-known locations inside a journal folder

/// Journal entries subtree
pub const ENTRIES_DIR: &str = "entries";

/// AI output subtree
pub const AI_DIR: &str = "ai";

/// Persisted index document
pub const INDEX_FILE: &str = "index.json";

/// Per-journal configuration
pub const CONFIG_FILE: &str = "diarist.toml";

/// Markdown file extension
pub const MARKDOWN_EXT: &str = "md";
