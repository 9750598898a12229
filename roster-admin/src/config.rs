//! Configuration loading.
//!
//! Values come from, highest priority first: command line flags, the
//! environment, `config.json` in the platform config directory, defaults.

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;

use crate::error::AppError;
use crate::paths;

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "ROSTER_TOKEN";
/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "ROSTER_BASE_URL";

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Base URL of the school API.
    pub base_url: String,
    /// School whose roster is administered.
    pub school_id: Option<String>,
    /// Raw value of the `Authorization` header.
    pub token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Log level name (`error`, `warn`, `info`, `debug`, `trace`, `off`).
    pub log_level: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            school_id: None,
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: "info".to_string(),
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub school_id: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
    pub verbose: bool,
}

impl RosterConfig {
    /// Read a config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            log::debug!("no config file at {}", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| AppError::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the effective configuration from every source.
    pub fn load(overrides: Overrides) -> Result<Self, AppError> {
        let file = match paths::config_file() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        Ok(file
            .with_env(|key| std::env::var(key).ok())
            .with_overrides(overrides))
    }

    /// Apply environment values through `lookup`. Empty values are ignored.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let present = |key: &str| lookup(key).filter(|value: &String| !value.trim().is_empty());
        if let Some(token) = present(TOKEN_ENV) {
            self.token = Some(token);
        }
        if let Some(base_url) = present(BASE_URL_ENV) {
            self.base_url = base_url;
        }
        self
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url;
        }
        if overrides.school_id.is_some() {
            self.school_id = overrides.school_id;
        }
        if overrides.token.is_some() {
            self.token = overrides.token;
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        if overrides.verbose {
            self.log_level = "debug".to_string();
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn level(&self) -> Result<LevelFilter, AppError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| AppError::InvalidLogLevel(self.log_level.clone()))
    }

    pub fn school_id(&self) -> Result<&str, AppError> {
        self.school_id
            .as_deref()
            .ok_or(AppError::MissingConfig("school_id"))
    }

    pub fn token(&self) -> Result<&str, AppError> {
        self.token.as_deref().ok_or(AppError::MissingConfig("token"))
    }
}
