mod app_config;
mod log_level;

pub use app_config::{
    host_offset_minutes, AppConfig, ConfigError, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL,
    ENV_UPLOAD_DIR, ENV_UTC_OFFSET_MINUTES,
};
pub use log_level::LogLevel;
