//! Journal configuration for diarist
//!
//! Per-journal tuning lives in `<root>/diarist.toml`; the user-level settings
//! file that remembers the selected journal lives in `global`.

pub mod global;
pub mod types;

use std::fs;
use std::path::Path;

use crate::error::Result;

pub use global::GlobalSettings;
pub use types::{InsightConfig, JournalConfig, SearchConfig};

impl JournalConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: JournalConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults when it is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiaristError;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = JournalConfig::default();
        assert_eq!(config.search.recent_days, 7);
        assert_eq!(config.search.recent_bonus, 3);
        assert_eq!(config.search.month_days, 30);
        assert_eq!(config.search.month_bonus, 1);
        assert_eq!(config.search.max_candidates, 8);
        assert_eq!(config.insights.trend_up, 1.2);
        assert_eq!(config.insights.trend_down, 0.8);
        assert_eq!(config.insights.pattern_min_entries, 3);
    }

    #[test]
    fn test_load_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("diarist.toml");
        fs::write(
            &path,
            "[search]\nmax_candidates = 12\n\n[insights]\ntrend_up = 1.5\ndefault_window_days = 30\n",
        )
        .unwrap();

        let mut expected = JournalConfig::default();
        expected.search.max_candidates = 12;
        expected.insights.trend_up = 1.5;
        expected.insights.default_window_days = 30;

        assert_eq!(JournalConfig::load(&path).unwrap(), expected);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("diarist.toml");
        fs::write(&path, "[search]\nrecent_days = 3\n").unwrap();

        let loaded = JournalConfig::load(&path).unwrap();
        assert_eq!(loaded.search.recent_days, 3);
        assert_eq!(loaded.search.recent_bonus, 3);
        assert_eq!(loaded.insights, InsightConfig::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let loaded = JournalConfig::load_or_default(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(loaded, JournalConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("diarist.toml");
        fs::write(&path, "[search\n").unwrap();

        assert!(matches!(
            JournalConfig::load(&path),
            Err(DiaristError::Toml(_))
        ));
    }
}
