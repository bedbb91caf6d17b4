//! Error types for ringtimer.
//!
//! None of these ever reach the timing state machine: duration input is
//! rejected before a transition happens, and notifier failures are logged
//! and dropped.

use std::path::PathBuf;
use thiserror::Error;

/// Rejected duration input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("'{0}' is not a whole number of minutes")]
    NotANumber(String),

    #[error("{0} minutes is outside the allowed range 1-120")]
    OutOfRange(i64),
}

/// Failure to play the completion notification.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to load or validate settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid duration: {0}")]
    Duration(#[from] DurationError),

    #[error("tick interval must be greater than zero")]
    ZeroInterval,
}
