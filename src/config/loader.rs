//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
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

    /// An environment variable override could not be parsed.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/rowgrid/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Rows to load from the backend.
    #[serde(default)]
    pub row_count: Option<usize>,

    /// Uniform row height in pixels.
    #[serde(default)]
    pub row_height: Option<u32>,

    /// Visible viewport height in pixels.
    #[serde(default)]
    pub viewport_height: Option<u32>,

    /// Extra rows rendered past each visible edge.
    #[serde(default)]
    pub overscan: Option<usize>,

    /// Simulated initial load latency.
    #[serde(default)]
    pub load_latency_ms: Option<u64>,

    /// Simulated per-mutation latency.
    #[serde(default)]
    pub mutation_latency_ms: Option<u64>,

    /// Per-id failure probability for simulated bulk deletes.
    #[serde(default)]
    pub failure_rate: Option<f64>,

    /// Seed for the generated dataset.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Notifications retained before the oldest is dropped.
    #[serde(default)]
    pub notification_capacity: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Rows to load.
    pub row_count: usize,
    /// Row height in pixels.
    pub row_height: u32,
    /// Viewport height in pixels.
    pub viewport_height: u32,
    /// Overscan rows.
    pub overscan: usize,
    /// Simulated load latency in milliseconds.
    pub load_latency_ms: u64,
    /// Simulated mutation latency in milliseconds.
    pub mutation_latency_ms: u64,
    /// Simulated bulk delete failure rate.
    pub failure_rate: f64,
    /// Dataset seed.
    pub seed: u64,
    /// Notification queue capacity.
    pub notification_capacity: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            row_count: 100_000,
            row_height: 72,
            viewport_height: 700,
            overscan: 5,
            load_latency_ms: 500,
            mutation_latency_ms: 300,
            failure_rate: 0.05,
            seed: 42,
            notification_capacity: 50,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Simulated load latency.
    pub fn load_latency(&self) -> Duration {
        Duration::from_millis(self.load_latency_ms)
    }

    /// Simulated mutation latency.
    pub fn mutation_latency(&self) -> Duration {
        Duration::from_millis(self.mutation_latency_ms)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/rowgrid/rowgrid.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("rowgrid").join("rowgrid.log")
    } else {
        PathBuf::from("rowgrid.log")
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
/// Returns `~/.config/rowgrid/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rowgrid").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `ROWGRID_CONFIG` environment variable
/// 3. Default path `~/.config/rowgrid/config.toml`
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

    if let Ok(env_path) = std::env::var("ROWGRID_CONFIG") {
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
        row_count: config.row_count.unwrap_or(defaults.row_count),
        row_height: config.row_height.unwrap_or(defaults.row_height),
        viewport_height: config.viewport_height.unwrap_or(defaults.viewport_height),
        overscan: config.overscan.unwrap_or(defaults.overscan),
        load_latency_ms: config.load_latency_ms.unwrap_or(defaults.load_latency_ms),
        mutation_latency_ms: config
            .mutation_latency_ms
            .unwrap_or(defaults.mutation_latency_ms),
        failure_rate: config.failure_rate.unwrap_or(defaults.failure_rate),
        seed: config.seed.unwrap_or(defaults.seed),
        notification_capacity: config
            .notification_capacity
            .unwrap_or(defaults.notification_capacity),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `ROWGRID_ROW_COUNT`: Override row count
/// - `ROWGRID_OVERSCAN`: Override overscan
///
/// # Errors
///
/// Returns `InvalidEnv` if a variable is set but is not a valid number.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Some(rows) = env_number("ROWGRID_ROW_COUNT")? {
        config.row_count = rows;
    }

    if let Some(overscan) = env_number("ROWGRID_OVERSCAN")? {
        config.overscan = overscan;
    }

    Ok(config)
}

fn env_number(var: &'static str) -> Result<Option<usize>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
        Err(_) => Ok(None),
    }
}

/// CLI flags that override configuration. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    /// `--rows`
    pub row_count: Option<usize>,
    /// `--overscan`
    pub overscan: Option<usize>,
    /// `--seed`
    pub seed: Option<u64>,
    /// `--no-latency`
    pub no_latency: bool,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(rows) = cli.row_count {
        config.row_count = rows;
    }

    if let Some(overscan) = cli.overscan {
        config.overscan = overscan;
    }

    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    if cli.no_latency {
        config.load_latency_ms = 0;
        config.mutation_latency_ms = 0;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
