//! Configuration file loading with precedence handling.

use crate::state::DEFAULT_HISTORY_CAPACITY;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "LOGPANE_CONFIG";
/// Environment variable overriding the history capacity.
pub const HISTORY_ENV_VAR: &str = "LOGPANE_HISTORY";
/// Environment variable overriding line wrapping (`0`/`1`/`true`/`false`).
pub const WRAP_ENV_VAR: &str = "LOGPANE_WRAP";

const DEFAULT_REDRAW_INTERVAL_MS: u64 = 300;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/logpane/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Maximum number of retained log lines.
    #[serde(default)]
    pub history_capacity: Option<usize>,

    /// Minimum time between two redraws triggered by incoming logs.
    #[serde(default)]
    pub redraw_interval_ms: Option<u64>,

    /// Line wrapping enabled.
    #[serde(default)]
    pub line_wrap: Option<bool>,

    /// Start in follow mode.
    #[serde(default)]
    pub follow: Option<bool>,

    /// Show the status bar under the pane.
    #[serde(default)]
    pub show_toolbar: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Log buffer capacity.
    pub history_capacity: usize,
    /// Redraw throttle interval in milliseconds.
    pub redraw_interval_ms: u64,
    /// Line wrapping.
    pub line_wrap: bool,
    /// Follow mode.
    pub follow: bool,
    /// Toolbar visibility.
    pub show_toolbar: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            redraw_interval_ms: DEFAULT_REDRAW_INTERVAL_MS,
            line_wrap: true,
            follow: true,
            show_toolbar: true,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Redraw throttle interval as a [`Duration`].
    pub fn redraw_interval(&self) -> Duration {
        Duration::from_millis(self.redraw_interval_ms)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/logpane/logpane.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("logpane").join("logpane.log")
    } else {
        PathBuf::from("logpane.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
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
/// Returns `~/.config/logpane/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("logpane").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `LOGPANE_CONFIG` environment variable
/// 3. Default path `~/.config/logpane/config.toml`
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

    if let Some(env_path) = std::env::var_os(CONFIG_ENV_VAR) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV_VAR} is empty")));
        }
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
        history_capacity: config.history_capacity.unwrap_or(defaults.history_capacity),
        redraw_interval_ms: config
            .redraw_interval_ms
            .unwrap_or(defaults.redraw_interval_ms),
        line_wrap: config.line_wrap.unwrap_or(defaults.line_wrap),
        follow: config.follow.unwrap_or(defaults.follow),
        show_toolbar: config.show_toolbar.unwrap_or(defaults.show_toolbar),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `LOGPANE_HISTORY`: Override history capacity
/// - `LOGPANE_WRAP`: Override line wrapping
///
/// Unparseable values are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(capacity) = std::env::var(HISTORY_ENV_VAR)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
    {
        config.history_capacity = capacity;
    }

    if let Some(wrap) = std::env::var(WRAP_ENV_VAR)
        .ok()
        .and_then(|v| parse_bool_flag(&v))
    {
        config.line_wrap = wrap;
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
///
/// # Arguments
///
/// * `config` - Base resolved config (already merged with defaults, file, and env vars)
/// * `history_override` - Capacity from `--history`
/// * `wrap_override` - `Some(false)` from `--no-wrap`
/// * `follow_override` - `Some(false)` from `--no-follow`
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    history_override: Option<usize>,
    wrap_override: Option<bool>,
    follow_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(capacity) = history_override {
        config.history_capacity = capacity;
    }

    if let Some(wrap) = wrap_override {
        config.line_wrap = wrap;
    }

    if let Some(follow) = follow_override {
        config.follow = follow;
    }

    config
}

fn parse_bool_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
