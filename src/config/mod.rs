//! Configuration system (layered: defaults < config file < env).

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::BridgeError;

pub const DEFAULT_BRIDGE_URL: &str = "http://localhost:9333";
pub const DEFAULT_TOOL_CACHE_TTL_SECONDS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

pub const ENV_BRIDGE_URL: &str = "BROWSERCLAW_BRIDGE_URL";
pub const ENV_BRIDGE_TOKEN: &str = "BROWSERCLAW_BRIDGE_TOKEN";
pub const ENV_LOG_LEVEL: &str = "BROWSERCLAW_LOG_LEVEL";
pub const ENV_TOOL_CACHE_TTL_SECONDS: &str = "BROWSERCLAW_TOOL_CACHE_TTL_SECONDS";
pub const ENV_REQUEST_TIMEOUT_SECONDS: &str = "BROWSERCLAW_REQUEST_TIMEOUT_SECONDS";

/// Adapter configuration, built once at startup.
///
/// Resolution order (later wins):
/// 1. Built-in defaults
/// 2. Config file (TOML, or JSON when the extension is `.json`)
/// 3. Environment variables (`.env` is loaded first if present)
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    pub bridge_url: String,
    pub bridge_token: String,
    pub tool_cache_ttl_seconds: u64,
    pub request_timeout_seconds: u64,
    pub log_level: String,
}

impl fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("bridge_url", &self.bridge_url)
            .field(
                "bridge_token",
                &if self.bridge_token.is_empty() { "" } else { ".." },
            )
            .field("tool_cache_ttl_seconds", &self.tool_cache_ttl_seconds)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            bridge_url: DEFAULT_BRIDGE_URL.to_string(),
            bridge_token: String::new(),
            tool_cache_ttl_seconds: DEFAULT_TOOL_CACHE_TTL_SECONDS,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AdapterConfig {
    /// Load the full layered configuration.
    ///
    /// An explicit `path` must exist. Without one, the platform config
    /// directory is searched and a missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, BridgeError> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse a config file over the built-in defaults.
    pub fn from_file(path: &Path) -> Result<Self, BridgeError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            serde_json::from_str(&raw).map_err(|e| {
                BridgeError::Configuration(format!("invalid JSON in {}: {e}", path.display()))
            })
        } else {
            toml::from_str(&raw).map_err(|e| {
                BridgeError::Configuration(format!("invalid TOML in {}: {e}", path.display()))
            })
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), BridgeError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), BridgeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(url) = get(ENV_BRIDGE_URL) {
            self.bridge_url = url;
        }
        if let Some(token) = get(ENV_BRIDGE_TOKEN) {
            self.bridge_token = token;
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(raw) = get(ENV_TOOL_CACHE_TTL_SECONDS) {
            self.tool_cache_ttl_seconds = parse_seconds(ENV_TOOL_CACHE_TTL_SECONDS, &raw)?;
        }
        if let Some(raw) = get(ENV_REQUEST_TIMEOUT_SECONDS) {
            self.request_timeout_seconds = parse_seconds(ENV_REQUEST_TIMEOUT_SECONDS, &raw)?;
        }
        Ok(())
    }

    /// Bridge base URL without trailing slashes.
    pub fn base_url(&self) -> &str {
        self.bridge_url.trim_end_matches('/')
    }

    pub fn tool_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.tool_cache_ttl_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

fn parse_seconds(key: &str, raw: &str) -> Result<u64, BridgeError> {
    raw.trim().parse().map_err(|_| {
        BridgeError::Configuration(format!("{key} must be a whole number of seconds, got {raw:?}"))
    })
}

/// First existing `config.toml` / `config.json` in the platform config dir.
pub fn default_config_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "browserclaw")?;
    ["config.toml", "config.json"]
        .iter()
        .map(|name| dirs.config_dir().join(name))
        .find(|path| path.is_file())
}
