//! User-level settings for diarist (stored in ~/.config/diarist/settings.toml)
//!
//! These settings select the active journal folder. Index operations never
//! read them directly; the CLI resolves a root from them and threads it
//! through a [`crate::journal::Journal`].

use std::fs;
use std::path::PathBuf;

use crate::error::{DiaristError, Result};

const CONFIG_DIR: &str = "diarist";
const CONFIG_FILE: &str = "settings.toml";
pub const CONFIG_DIR_ENV_VAR: &str = "DIARIST_CONFIG_DIR";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, Default)]
pub struct GlobalSettings {
    /// Selected journal folder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_path: Option<PathBuf>,
}

impl GlobalSettings {
    fn settings_path() -> Result<PathBuf> {
        let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            PathBuf::from(env_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| {
                    DiaristError::Other("unable to determine config directory".to_string())
                })?
                .join(CONFIG_DIR)
        };

        Ok(config_dir.join(CONFIG_FILE))
    }

    pub fn load() -> Result<Self> {
        let path = Self::settings_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| DiaristError::io_operation("read settings from", path.display(), e))?;

        toml::from_str(&content)
            .map_err(|e| DiaristError::io_operation("parse settings from", path.display(), e))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path()?;
        let config_dir = path
            .parent()
            .ok_or_else(|| DiaristError::Other("invalid settings path".to_string()))?;

        fs::create_dir_all(config_dir).map_err(|e| {
            DiaristError::io_operation("create config directory", config_dir.display(), e)
        })?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| DiaristError::Other(format!("failed to serialize settings: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| DiaristError::io_operation("write settings to", path.display(), e))?;

        Ok(())
    }
}
