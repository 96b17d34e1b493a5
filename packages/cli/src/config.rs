use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;
use taskboard_storage::StorageConfig;
use taskboard_tui::AppConfig;
use thiserror::Error;

pub const DEFAULT_TICK_RATE_MS: u64 = 100;
pub const DEFAULT_LOG_FILTER: &str = "info";
const LOG_FILE_NAME: &str = "taskboard.log";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid tick rate: {0}")]
    InvalidTickRate(#[from] ParseIntError),
    #[error("Tick rate {0}ms is out of valid range (10-5000)")]
    TickRateOutOfRange(u64),
    #[error("Cannot determine the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    pub tick_rate: Duration,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = non_empty_var("TASKBOARD_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(taskboard_core::default_data_dir);

        let export_dir = match non_empty_var("TASKBOARD_EXPORT_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => env::current_dir().map_err(ConfigError::CurrentDir)?,
        };

        let tick_rate = match non_empty_var("TASKBOARD_TICK_RATE_MS") {
            Some(raw) => parse_tick_rate(&raw)?,
            None => Duration::from_millis(DEFAULT_TICK_RATE_MS),
        };

        let log_filter =
            non_empty_var("TASKBOARD_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Config {
            data_dir,
            export_dir,
            tick_rate,
            log_filter,
        })
    }

    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig::in_dir(&self.data_dir)
    }

    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            storage: self.storage_config(),
            export_dir: self.export_dir.clone(),
        }
    }

    /// Where TUI sessions write their logs
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}

/// Parse a tick rate in milliseconds, rejecting values the event loop can't use
pub fn parse_tick_rate(raw: &str) -> Result<Duration, ConfigError> {
    let ms = raw.trim().parse::<u64>()?;
    if !(10..=5000).contains(&ms) {
        return Err(ConfigError::TickRateOutOfRange(ms));
    }
    Ok(Duration::from_millis(ms))
}

// Empty values count as unset
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
