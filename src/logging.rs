//! Tracing setup.
//!
//! The terminal UI owns stdout, so log lines go to a file.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to open log file '{path}': {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid log level '{level}': {message}")]
    InvalidLevel { level: String, message: String },

    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Build the filter: `RUST_LOG` when set, otherwise the configured level.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| LoggingError::InvalidLevel {
        level: config.level.clone(),
        message: e.to_string(),
    })
}

/// Install the global subscriber, appending to the configured log file.
///
/// Returns the path being written to.
pub fn init_tracing(config: &LoggingConfig) -> Result<PathBuf, LoggingError> {
    let filter = build_filter(config)?;
    let path = config.file_path();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| LoggingError::OpenFile {
            path: path.clone(),
            source: e,
        })?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| LoggingError::OpenFile {
            path: path.clone(),
            source: e,
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_is_reported() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "mvi_users=loud".to_string(),
            file: None,
        };
        let err = build_filter(&config).unwrap_err();
        assert!(matches!(err, LoggingError::InvalidLevel { .. }));
    }

    #[test]
    fn valid_level_builds_filter() {
        let config = LoggingConfig {
            level: "mvi_users=debug".to_string(),
            file: None,
        };
        assert!(build_filter(&config).is_ok());
    }
}
