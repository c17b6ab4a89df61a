use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::emoji;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown emoji category: {0}")]
    UnknownEmojiCategory(String),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

/// Startup options. Chat state is never written anywhere; these only shape
/// logging and the initial look of the UI.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    pub log_file: PathBuf,
    pub emoji_category: String,
    /// Redraw interval, keeps "last seen" labels fresh
    pub tick_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            log_level: "info".to_string(),
            log_file: PathBuf::from("chatflow.log"),
            emoji_category: emoji::DEFAULT_CATEGORY.to_string(),
            tick_ms: 1000,
        }
    }
}

impl Settings {
    /// Load from `path` if given (it must exist), else from the default
    /// location if a file is there, else fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_settings_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Settings::default(),
            },
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.level_filter()?;
        if emoji::category(&self.emoji_category).is_none() {
            return Err(ConfigError::UnknownEmojiCategory(self.emoji_category.clone()));
        }
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chatflow").join("settings.json"))
}
