//! Optional TOML configuration.
//!
//! Everything has a default, so the tool runs without any file; a config
//! only overrides what it names:
//!
//! ```toml
//! basedir = "/var/lib/release-stats"
//!
//! [windows]
//! daily_hours = 24
//! weekly_hours = 168
//! monthly_hours = 720
//! buffer_hours = 1
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use time::Duration;

use crate::core::summary::SummaryWindows;
use crate::{StatsError, StatsResult};

/// Base directory used when neither flag nor config names one.
pub const DEFAULT_BASEDIR: &str = "data";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub basedir: Option<PathBuf>,
    #[serde(default)]
    pub windows: WindowsConfig,
}

/// Window durations in whole hours, as written in the config file. Converted
/// into a validated [`SummaryWindows`] before use.
#[derive(Debug, Clone, Deserialize)]
pub struct WindowsConfig {
    #[serde(default = "default_daily_hours")]
    pub daily_hours: i64,
    #[serde(default = "default_weekly_hours")]
    pub weekly_hours: i64,
    #[serde(default = "default_monthly_hours")]
    pub monthly_hours: i64,
    #[serde(default = "default_buffer_hours")]
    pub buffer_hours: i64,
}

fn default_daily_hours() -> i64 {
    24
}

fn default_weekly_hours() -> i64 {
    24 * 7
}

fn default_monthly_hours() -> i64 {
    24 * 30
}

fn default_buffer_hours() -> i64 {
    1
}

impl Default for WindowsConfig {
    fn default() -> Self {
        WindowsConfig {
            daily_hours: default_daily_hours(),
            weekly_hours: default_weekly_hours(),
            monthly_hours: default_monthly_hours(),
            buffer_hours: default_buffer_hours(),
        }
    }
}

impl WindowsConfig {
    pub fn to_windows(&self) -> StatsResult<SummaryWindows> {
        SummaryWindows::new(
            Duration::hours(self.daily_hours),
            Duration::hours(self.weekly_hours),
            Duration::hours(self.monthly_hours),
            Duration::hours(self.buffer_hours),
        )
    }
}

impl Config {
    /// Load the named config file, or defaults when no path is given.
    pub fn load_or_default(path: Option<&Path>) -> StatsResult<Config> {
        match path {
            Some(path) => load_config(path),
            None => Ok(Config::default()),
        }
    }

    /// Base directory resolution: explicit flag beats config file beats the
    /// built-in default.
    pub fn resolve_basedir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.basedir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BASEDIR))
    }
}

/// Parse a config file from disk.
pub fn load_config(path: &Path) -> StatsResult<Config> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| StatsError::Message(format!("failed to read {}: {e}", path.display())))?;
    toml::from_str(&data)
        .map_err(|e| StatsError::Message(format!("failed to parse {}: {e}", path.display())))
}
