use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use super::LogLevel;
use goalkeeper_domain::check_in::RewardPolicy;
use goalkeeper_domain::shared::DayBoundary;

pub const ENV_DB_PATH: &str = "GOALKEEPER_DB_PATH";
pub const ENV_LOG_DIR: &str = "GOALKEEPER_LOG_DIR";
pub const ENV_UPLOAD_DIR: &str = "GOALKEEPER_UPLOAD_DIR";
pub const ENV_LOG_LEVEL: &str = "GOALKEEPER_LOG_LEVEL";
pub const ENV_UTC_OFFSET_MINUTES: &str = "GOALKEEPER_UTC_OFFSET_MINUTES";

const APP_DIR: &str = "goalkeeper";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Runtime settings, from `config.json` then environment overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log_dir: PathBuf,
    pub upload_dir: PathBuf,
    /// URL prefix under which `upload_dir` is served
    pub static_url_prefix: String,
    pub log_level: LogLevel,
    /// Offset from UTC, in minutes, where calendar days begin
    pub utc_offset_minutes: i32,
    pub rewards: RewardPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("data"));

        Self {
            database_path: data_dir.join("goalkeeper.db"),
            log_dir: data_dir.join("logs"),
            upload_dir: data_dir.join("uploads"),
            static_url_prefix: "/static".to_string(),
            log_level: LogLevel::default(),
            utc_offset_minutes: host_offset_minutes(),
            rewards: RewardPolicy::default(),
        }
    }
}

/// Local offset of the host right now, clamped to the supported range
pub fn host_offset_minutes() -> i32 {
    let minutes = Local::now().offset().local_minus_utc() / 60;
    minutes.clamp(-DayBoundary::MAX_OFFSET_MINUTES, DayBoundary::MAX_OFFSET_MINUTES)
}

impl AppConfig {
    /// `<config dir>/goalkeeper/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `explicit` (which must exist) or the default path (optional),
    /// then apply environment overrides
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env(|var| std::env::var(var).ok())?;
        config.validate()?;

        info!(
            db_path = %config.database_path.display(),
            log_level = config.log_level.as_str(),
            utc_offset_minutes = config.utc_offset_minutes,
            "Configuration loaded"
        );

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Override fields from environment variables looked up through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_DB_PATH) {
            self.database_path = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_LOG_DIR) {
            self.log_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_UPLOAD_DIR) {
            self.upload_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.log_level = value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_LOG_LEVEL,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(ENV_UTC_OFFSET_MINUTES) {
            self.utc_offset_minutes =
                value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    var: ENV_UTC_OFFSET_MINUTES,
                    value: value.clone(),
                })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.day_boundary()?;
        self.rewards
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if !self.static_url_prefix.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "static_url_prefix must start with '/': {}",
                self.static_url_prefix
            )));
        }
        Ok(())
    }

    pub fn day_boundary(&self) -> Result<DayBoundary, ConfigError> {
        DayBoundary::from_offset_minutes(self.utc_offset_minutes)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Write the config as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, content).map_err(io_err)?;

        info!(path = %path.display(), "Configuration saved");
        Ok(())
    }
}
