//! Configuration loading and management.
//!
//! Configuration is loaded with the following precedence:
//! 1. Environment variables (`SCOUT_*`)
//! 2. Config file (`~/.scout/config.toml`)
//! 3. Defaults

use crate::api::UserId;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Backend API configuration.
    pub api: ApiConfig,

    /// User identity configuration.
    pub user: UserConfig,

    /// Local storage configuration.
    pub storage: StorageConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the research service.
    pub base_url: String,

    /// Request timeout in seconds. Queries can take minutes to fulfil.
    pub timeout_seconds: u64,
}

impl ApiConfig {
    /// Base URL without trailing slashes.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Request timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_seconds: 180,
        }
    }
}

/// User identity configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// History partition queried when no `--user` is given.
    pub default_id: u64,
}

impl UserConfig {
    /// The default user as a validated identifier.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the configured id is zero.
    pub fn default_user(&self) -> Result<UserId> {
        UserId::new(self.default_id)
            .map_err(|_| Error::Config(format!("invalid default user id: {}", self.default_id)))
    }
}

impl Default for UserConfig {
    fn default() -> Self {
        Self { default_id: 1 }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the scout home directory.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_scout_home(),
        }
    }
}

/// Get the default scout home directory.
fn default_scout_home() -> PathBuf {
    dirs::home_dir().map_or_else(|| PathBuf::from(".scout"), |h| h.join(".scout"))
}

/// Load configuration with precedence: env vars → file → defaults.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
pub fn load_config() -> Result<Config> {
    let mut config = Config::default();

    let config_path = get_config_path();
    if config_path.exists() {
        let contents = fs::read_to_string(&config_path).map_err(Error::Storage)?;
        config = parse_config(&contents)?;
    }

    apply_env_overrides(&mut config);

    Ok(config)
}

/// Parse a TOML config document.
///
/// # Errors
///
/// Returns a configuration error if the document is not valid TOML for `Config`.
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))
}

/// Get the path to the config file.
fn get_config_path() -> PathBuf {
    if let Ok(path) = env::var("SCOUT_CONFIG") {
        return PathBuf::from(path);
    }

    if let Ok(home) = env::var("SCOUT_HOME") {
        return PathBuf::from(home).join("config.toml");
    }

    default_scout_home().join("config.toml")
}

/// Apply environment variable overrides to config.
fn apply_env_overrides(config: &mut Config) {
    if let Ok(path) = env::var("SCOUT_STORAGE_PATH") {
        config.storage.path = PathBuf::from(path);
    } else if let Ok(home) = env::var("SCOUT_HOME") {
        config.storage.path = PathBuf::from(home);
    }

    if let Ok(base) = env::var("SCOUT_API_BASE") {
        if !base.trim().is_empty() {
            config.api.base_url = base.trim().to_string();
        }
    }

    if let Ok(val) = env::var("SCOUT_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.api.timeout_seconds = secs;
        }
    }

    if let Ok(val) = env::var("SCOUT_USER_ID") {
        if let Ok(id) = val.parse() {
            config.user.default_id = id;
        }
    }
}
