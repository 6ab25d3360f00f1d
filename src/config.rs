// src/config.rs

//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data file locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Campus selection behavior
    #[serde(default)]
    pub campus: CampusConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.paths.guide_file.trim().is_empty() {
            return Err(AppError::validation("paths.guide_file is empty"));
        }
        if self.paths.campus_file.trim().is_empty() {
            return Err(AppError::validation("paths.campus_file is empty"));
        }
        if self.paths.prefs_file.trim().is_empty() {
            return Err(AppError::validation("paths.prefs_file is empty"));
        }
        if self.campus.default_id.trim().is_empty() {
            return Err(AppError::validation("campus.default_id is empty"));
        }
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => {}
            other => {
                return Err(AppError::validation(format!(
                    "logging.level '{other}' is not a known level"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            campus: CampusConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Locations of the content and preference files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory containing the content files
    #[serde(default = "defaults::data_dir")]
    pub data_dir: String,

    /// Guide content file (categories and pages), relative to `data_dir`
    #[serde(default = "defaults::guide_file")]
    pub guide_file: String,

    /// Campus content file (campuses and facilities), relative to `data_dir`
    #[serde(default = "defaults::campus_file")]
    pub campus_file: String,

    /// Persisted client preferences, relative to `data_dir`
    #[serde(default = "defaults::prefs_file")]
    pub prefs_file: String,
}

impl PathsConfig {
    /// Full path to the guide content file.
    pub fn guide_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.guide_file)
    }

    /// Full path to the campus content file.
    pub fn campus_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.campus_file)
    }

    /// Full path to the preferences file.
    pub fn prefs_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.prefs_file)
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::data_dir(),
            guide_file: defaults::guide_file(),
            campus_file: defaults::campus_file(),
            prefs_file: defaults::prefs_file(),
        }
    }
}

/// Campus selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampusConfig {
    /// Fallback campus id used when no preference has been persisted
    #[serde(default = "defaults::default_campus")]
    pub default_id: String,
}

impl Default for CampusConfig {
    fn default() -> Self {
        Self {
            default_id: defaults::default_campus(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace/debug/info/warn/error/off)
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    pub fn data_dir() -> String {
        "data".into()
    }
    pub fn guide_file() -> String {
        "guide.json".into()
    }
    pub fn campus_file() -> String {
        "campus.json".into()
    }
    pub fn prefs_file() -> String {
        "prefs.json".into()
    }
    pub fn default_campus() -> String {
        "cangwu".into()
    }
    pub fn log_level() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_default_campus() {
        let mut config = Config::default();
        config.campus.default_id = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn paths_join_against_data_dir() {
        let config = Config::default();
        assert_eq!(config.paths.guide_path(), PathBuf::from("data/guide.json"));
        assert_eq!(
            config.paths.campus_path(),
            PathBuf::from("data/campus.json")
        );
    }
}
