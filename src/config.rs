//! Client configuration.
//!
//! Configuration is stored as YAML in `config.yaml` under the platform config
//! directory (or at `$SHOPLIST_CONFIG`) and includes:
//! - The base URL of the list service
//! - Polling and bulk-clear tuning
//! - An optional per-request timeout

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShoplistError};

pub const CONFIG_PATH_ENV: &str = "SHOPLIST_CONFIG";
pub const API_URL_ENV: &str = "SHOPLIST_API_URL";

const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the list service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Seconds between polls of the list collection (default: 3)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Maximum deletes in flight while clearing bought items (default: 4)
    #[serde(default = "default_clear_concurrency")]
    pub clear_concurrency: usize,

    /// How local state is reconciled after a partially failed clear
    #[serde(default)]
    pub clear_policy: ClearPolicy,

    /// Per-request timeout in seconds. Requests never time out when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_poll_interval() -> u64 {
    crate::collection::DEFAULT_POLL_INTERVAL.as_secs()
}

fn default_clear_concurrency() -> usize {
    4
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            poll_interval_secs: default_poll_interval(),
            clear_concurrency: default_clear_concurrency(),
            clear_policy: ClearPolicy::default(),
            request_timeout_secs: None,
        }
    }
}

/// Reconciliation policy for bulk clears that only partly succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearPolicy {
    /// Drop every targeted item locally once the batch settles.
    #[default]
    RemoveAll,
    /// Drop only the items whose delete the server confirmed.
    RemoveConfirmed,
}

impl fmt::Display for ClearPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClearPolicy::RemoveAll => write!(f, "remove_all"),
            ClearPolicy::RemoveConfirmed => write!(f, "remove_confirmed"),
        }
    }
}

impl FromStr for ClearPolicy {
    type Err = ShoplistError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "remove_all" => Ok(ClearPolicy::RemoveAll),
            "remove_confirmed" => Ok(ClearPolicy::RemoveConfirmed),
            _ => Err(ShoplistError::Config(format!(
                "unknown clear policy '{s}', expected 'remove_all' or 'remove_confirmed'"
            ))),
        }
    }
}

/// Keys accepted by `config get` / `config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "api_url",
    "poll_interval_secs",
    "clear_concurrency",
    "clear_policy",
    "request_timeout_secs",
];

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV)
            && !path.is_empty()
        {
            return Ok(PathBuf::from(path));
        }

        directories::ProjectDirs::from("com", "shoplist", "shoplist")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
            .ok_or_else(|| {
                ShoplistError::Config(format!(
                    "cannot determine a config directory; set {CONFIG_PATH_ENV}"
                ))
            })
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.poll_interval_secs == 0 {
            return Err(ShoplistError::Config(
                "poll_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.clear_concurrency == 0 {
            return Err(ShoplistError::Config(
                "clear_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the API base URL from environment variable, config file, or the default
    pub fn api_url(&self) -> String {
        if let Ok(url) = env::var(API_URL_ENV)
            && !url.is_empty()
        {
            return url;
        }

        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Read a value by key, rendered as text.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "api_url" => Ok(self.api_url()),
            "poll_interval_secs" => Ok(self.poll_interval_secs.to_string()),
            "clear_concurrency" => Ok(self.clear_concurrency.to_string()),
            "clear_policy" => Ok(self.clear_policy.to_string()),
            "request_timeout_secs" => Ok(self
                .request_timeout_secs
                .map(|s| s.to_string())
                .unwrap_or_else(|| "none".to_string())),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a value by key from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.clone();
        match key {
            "api_url" => {
                url::Url::parse(value).map_err(|e| {
                    ShoplistError::Config(format!("invalid api_url '{value}': {e}"))
                })?;
                next.api_url = Some(value.to_string());
            }
            "poll_interval_secs" => next.poll_interval_secs = parse_number(key, value)?,
            "clear_concurrency" => next.clear_concurrency = parse_number(key, value)?,
            "clear_policy" => next.clear_policy = value.parse()?,
            "request_timeout_secs" => {
                next.request_timeout_secs = if value.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(parse_number(key, value)?)
                };
            }
            _ => return Err(unknown_key(key)),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| ShoplistError::Config(format!("invalid value '{value}' for {key}")))
}

fn unknown_key(key: &str) -> ShoplistError {
    ShoplistError::Config(format!(
        "unknown config key '{key}'. Valid keys: {}",
        CONFIG_KEYS.join(", ")
    ))
}
