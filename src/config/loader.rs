//! Configuration file loading with precedence handling.

use chrono::FixedOffset;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::view_state::{ColumnMetrics, RowMetrics};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "HISTROW_CONFIG";

/// Environment variable overriding the day-boundary offset, in minutes east of UTC.
pub const UTC_OFFSET_ENV_VAR: &str = "HISTROW_UTC_OFFSET_MINUTES";

/// Largest accepted offset magnitude (just under a day).
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A row height of zero pixels.
    #[error("{field} must be at least 1 pixel")]
    InvalidHeight {
        /// Config key holding the zero height.
        field: &'static str,
    },

    /// A UTC offset outside (-24h, +24h).
    #[error("UTC offset of {minutes} minutes is out of range")]
    InvalidUtcOffset {
        /// The rejected offset.
        minutes: i32,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/histrow/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Height of a commit row in pixels.
    #[serde(default)]
    pub commit_height: Option<u32>,

    /// Height of a collapsed folded row in pixels.
    #[serde(default)]
    pub folded_commits_height: Option<u32>,

    /// Height of a date separator row in pixels.
    #[serde(default)]
    pub date_separator_height: Option<u32>,

    /// Width of the row label column in pixels.
    #[serde(default)]
    pub row_label_width: Option<u32>,

    /// Width of each variant column in pixels.
    #[serde(default)]
    pub column_width: Option<u32>,

    /// Offset in which calendar days are compared, minutes east of UTC.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Commit row height.
    pub commit_height: u32,
    /// Collapsed folded row height.
    pub folded_commits_height: u32,
    /// Date separator height.
    pub date_separator_height: u32,
    /// Row label column width.
    pub row_label_width: u32,
    /// Variant column width.
    pub column_width: u32,
    /// Day-boundary offset, minutes east of UTC.
    pub utc_offset_minutes: i32,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            commit_height: RowMetrics::COMMIT_HEIGHT.get(),
            folded_commits_height: RowMetrics::FOLDED_COMMITS_HEIGHT.get(),
            date_separator_height: RowMetrics::DATE_SEPARATOR_HEIGHT.get(),
            row_label_width: ColumnMetrics::ROW_LABEL_WIDTH,
            column_width: ColumnMetrics::COLUMN_WIDTH,
            utc_offset_minutes: 0,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Row metrics for the row builder and toggler.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidHeight` if a row height is zero, and
    /// `ConfigError::InvalidUtcOffset` if the offset is a day or more.
    pub fn row_metrics(&self) -> Result<RowMetrics, ConfigError> {
        Ok(RowMetrics::new(
            row_height("commit_height", self.commit_height)?,
            row_height("folded_commits_height", self.folded_commits_height)?,
            row_height("date_separator_height", self.date_separator_height)?,
        )
        .with_utc_offset(utc_offset(self.utc_offset_minutes)?))
    }

    /// Column metrics for the column-limit calculation.
    pub fn column_metrics(&self) -> ColumnMetrics {
        ColumnMetrics::new(self.row_label_width, self.column_width)
    }
}

// A zero commit height makes expanded and collapsed folded rows the same height.
fn row_height(field: &'static str, height: u32) -> Result<u32, ConfigError> {
    if height == 0 {
        return Err(ConfigError::InvalidHeight { field });
    }
    Ok(height)
}

fn utc_offset(minutes: i32) -> Result<FixedOffset, ConfigError> {
    if minutes.abs() > MAX_OFFSET_MINUTES {
        return Err(ConfigError::InvalidUtcOffset { minutes });
    }
    FixedOffset::east_opt(minutes * 60).ok_or(ConfigError::InvalidUtcOffset { minutes })
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/histrow/histrow.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("histrow").join("histrow.log")
    } else {
        PathBuf::from("histrow.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/histrow/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("histrow").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `HISTROW_CONFIG` environment variable
/// 3. Default path `~/.config/histrow/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        commit_height: config.commit_height.unwrap_or(defaults.commit_height),
        folded_commits_height: config
            .folded_commits_height
            .unwrap_or(defaults.folded_commits_height),
        date_separator_height: config
            .date_separator_height
            .unwrap_or(defaults.date_separator_height),
        row_label_width: config.row_label_width.unwrap_or(defaults.row_label_width),
        column_width: config.column_width.unwrap_or(defaults.column_width),
        utc_offset_minutes: config
            .utc_offset_minutes
            .unwrap_or(defaults.utc_offset_minutes),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `HISTROW_UTC_OFFSET_MINUTES`: Override the day-boundary offset
///
/// Unparseable values are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(minutes) = std::env::var(UTC_OFFSET_ENV_VAR)
        .ok()
        .and_then(|raw| raw.trim().parse::<i32>().ok())
    {
        config.utc_offset_minutes = minutes;
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    utc_offset_override: Option<i32>,
) -> ResolvedConfig {
    if let Some(minutes) = utc_offset_override {
        config.utc_offset_minutes = minutes;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
