//! Configuration file loading with precedence handling.

use crate::fetch::pixabay::DEFAULT_BASE_URL;
use crate::model::DEFAULT_QUERY;
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use thiserror::Error;

/// Page sizes the search endpoint accepts.
pub const PER_PAGE_RANGE: RangeInclusive<u32> = 3..=200;

/// Accepted HTTP timeout, in seconds.
pub const REQUEST_TIMEOUT_RANGE: RangeInclusive<u64> = 1..=300;

/// Accepted notice lifetime, in seconds.
pub const NOTICE_DURATION_RANGE: RangeInclusive<u64> = 1..=3600;

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

    /// A setting parsed but is outside its allowed range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Name of the offending setting.
        field: &'static str,
        /// What is wrong with the value.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/picseek/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Term searched for at startup.
    #[serde(default)]
    pub default_query: Option<String>,

    /// Search API key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Search endpoint URL.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Results per page.
    #[serde(default)]
    pub per_page: Option<u32>,

    /// HTTP timeout for one page request.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// How long notifications stay in the status bar.
    #[serde(default)]
    pub notice_duration_secs: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Term searched for at startup.
    pub default_query: String,
    /// `None` means no key was configured anywhere; fetches will fail with a
    /// notice rather than at startup.
    pub api_key: Option<String>,
    /// Search endpoint URL.
    pub base_url: String,
    /// Results requested per page.
    pub per_page: u32,
    /// HTTP timeout for one page request, in seconds.
    pub request_timeout_secs: u64,
    /// How long a notice stays in the status bar, in seconds.
    pub notice_duration_secs: u64,
    /// Where tracing output is written.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            default_query: DEFAULT_QUERY.to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: 12,
            request_timeout_secs: 10,
            notice_duration_secs: 4,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Check values that parse fine but make no sense.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !PER_PAGE_RANGE.contains(&self.per_page) {
            return Err(ConfigError::InvalidValue {
                field: "per_page",
                reason: format!(
                    "{} is outside {}..={}",
                    self.per_page,
                    PER_PAGE_RANGE.start(),
                    PER_PAGE_RANGE.end()
                ),
            });
        }
        if self.default_query.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "default_query",
                reason: "must not be blank".to_string(),
            });
        }
        check_range(
            "request_timeout_secs",
            self.request_timeout_secs,
            &REQUEST_TIMEOUT_RANGE,
        )?;
        check_range(
            "notice_duration_secs",
            self.notice_duration_secs,
            &NOTICE_DURATION_RANGE,
        )?;
        Ok(())
    }
}

fn check_range(
    field: &'static str,
    value: u64,
    range: &RangeInclusive<u64>,
) -> Result<(), ConfigError> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(ConfigError::InvalidValue {
        field,
        reason: format!("{} is outside {}..={}", value, range.start(), range.end()),
    })
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/picseek/picseek.log` on Linux,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("picseek").join("picseek.log")
    } else {
        PathBuf::from("picseek.log")
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
/// Returns `~/.config/picseek/config.toml` on Linux, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("picseek").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PICSEEK_CONFIG` environment variable
/// 3. Default path `~/.config/picseek/config.toml`
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

    if let Ok(env_path) = std::env::var("PICSEEK_CONFIG") {
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
        default_query: config.default_query.unwrap_or(defaults.default_query),
        api_key: non_blank(config.api_key).or(defaults.api_key),
        base_url: config.base_url.unwrap_or(defaults.base_url),
        per_page: config.per_page.unwrap_or(defaults.per_page),
        request_timeout_secs: config
            .request_timeout_secs
            .unwrap_or(defaults.request_timeout_secs),
        notice_duration_secs: config
            .notice_duration_secs
            .unwrap_or(defaults.notice_duration_secs),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `PICSEEK_API_KEY`, falling back to `PIXABAY_API_KEY`
/// - `PICSEEK_DEFAULT_QUERY`
///
/// Blank values are ignored.
pub fn apply_env_overrides(config: ResolvedConfig) -> ResolvedConfig {
    apply_env_overrides_from(config, |name| std::env::var(name).ok())
}

/// [`apply_env_overrides`] with an injectable variable lookup.
pub fn apply_env_overrides_from(
    mut config: ResolvedConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let api_key =
        non_blank(lookup("PICSEEK_API_KEY")).or_else(|| non_blank(lookup("PIXABAY_API_KEY")));
    if let Some(key) = api_key {
        config.api_key = Some(key);
    }

    if let Some(query) = non_blank(lookup("PICSEEK_DEFAULT_QUERY")) {
        config.default_query = query;
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    query_override: Option<String>,
    api_key_override: Option<String>,
    per_page_override: Option<u32>,
) -> ResolvedConfig {
    if let Some(query) = non_blank(query_override) {
        config.default_query = query;
    }

    if let Some(key) = non_blank(api_key_override) {
        config.api_key = Some(key);
    }

    if let Some(per_page) = per_page_override {
        config.per_page = per_page;
    }

    config
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
