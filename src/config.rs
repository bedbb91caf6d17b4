//! Configuration and CLI argument handling.
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! an optional TOML file passed with `--config`, and command-line flags.
//!
//! ```toml
//! # ringtimer.toml
//! minutes = 25
//! theme = "light"
//! bell = true
//! interval_ms = 1000
//! ```

use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::notify::{Silent, TerminalBell};
use crate::state::{validate_minutes, TimerState, DEFAULT_MINUTES};
use crate::theme::Theme;
use crate::timer::{self, DEFAULT_INTERVAL};

/// Command-line arguments.
#[derive(Parser, Debug, Default)]
#[command(name = "ringtimer")]
#[command(about = "A countdown timer with a progress ring for the terminal")]
#[command(version)]
pub struct Cli {
    /// Countdown length in minutes (1-120)
    #[arg(short, long)]
    pub minutes: Option<u32>,

    /// Color theme: dark or light
    #[arg(short, long)]
    pub theme: Option<Theme>,

    /// Do not ring the terminal bell when the countdown ends
    #[arg(long)]
    pub no_bell: bool,

    /// Milliseconds between ticks. Each tick still counts one second.
    #[arg(long, hide = true)]
    pub interval_ms: Option<u64>,

    /// Path to a TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write logs to this file (the terminal is busy drawing the timer)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Log level used when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// Contents of a settings file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub minutes: Option<u32>,
    pub theme: Option<Theme>,
    pub bell: Option<bool>,
    pub interval_ms: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub minutes: u32,
    pub theme: Theme,
    pub bell: bool,
    pub interval: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            minutes: DEFAULT_MINUTES,
            theme: Theme::default(),
            bell: true,
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl Settings {
    /// Loads the file named by `--config`, if any, and layers the flags on top.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(cli, &file)
    }

    pub fn resolve(cli: &Cli, file: &FileConfig) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let interval = cli
            .interval_ms
            .or(file.interval_ms)
            .map(Duration::from_millis)
            .unwrap_or(defaults.interval);
        let settings = Settings {
            minutes: cli.minutes.or(file.minutes).unwrap_or(defaults.minutes),
            theme: cli.theme.or(file.theme).unwrap_or(defaults.theme),
            bell: !cli.no_bell && file.bell.unwrap_or(defaults.bell),
            interval,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_minutes(i64::from(self.minutes))?;
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }

    /// The state a fresh countdown starts from.
    pub fn initial_state(&self) -> TimerState {
        TimerState::default()
            .with_duration_minutes(self.minutes)
            .with_theme(self.theme)
    }

    /// Builds the timer component these settings describe.
    pub fn timer(&self) -> timer::Model {
        let model = timer::from_state(self.initial_state(), self.interval);
        if self.bell {
            model.with_notifier(TerminalBell)
        } else {
            model.with_notifier(Silent)
        }
    }
}
