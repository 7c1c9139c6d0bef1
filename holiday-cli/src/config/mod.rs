//! Configuration file management
//!
//! TOML config at `~/.config/holiday-cli/config.toml`, resolved as:
//! CLI flag > env var > config file > default.

pub mod repository;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::ResilienceConfig;
use crate::import::ImportStrategy;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

pub const ENV_API_URL: &str = "HOLIDAY_API_URL";
pub const ENV_API_TIMEOUT: &str = "HOLIDAY_API_TIMEOUT_SECS";
pub const ENV_STATE_DB: &str = "HOLIDAY_STATE_DB";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiSection,
    pub concurrency: ConcurrencySection,
    pub import: ImportSection,
    pub state: StateSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcurrencySection {
    pub max_concurrent_requests: usize,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSection {
    pub strategy: ImportStrategy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSection {
    /// sqlite file holding assignments and cached plan lists
    pub database: Option<PathBuf>,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for ConcurrencySection {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 8,
            enabled: true,
        }
    }
}

/// `$XDG_CONFIG_HOME/holiday-cli`, falling back to `~/.config/holiday-cli`
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("holiday-cli");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("holiday-cli")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Default location of the local state database
pub fn default_state_db() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("holiday-cli")
        .join("state.db")
}

impl Config {
    /// Load from `path` (or the default location). A missing file yields
    /// the defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            bail!("api.base_url must not be empty");
        }
        if self.api.timeout_secs == 0 {
            bail!("api.timeout_secs must be greater than zero");
        }
        Ok(())
    }

    /// Apply `HOLIDAY_*` environment overrides
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(raw) = lookup(ENV_API_TIMEOUT) {
            self.api.timeout_secs = raw
                .trim()
                .parse()
                .with_context(|| {
                    format!(
                        "{} must be a number of seconds, got '{}'",
                        ENV_API_TIMEOUT, raw
                    )
                })?;
        }
        if let Some(db) = lookup(ENV_STATE_DB).filter(|v| !v.trim().is_empty()) {
            self.state.database = Some(PathBuf::from(db));
        }
        self.validate()
    }

    pub fn resilience(&self) -> ResilienceConfig {
        ResilienceConfig::builder()
            .request_timeout(Duration::from_secs(self.api.timeout_secs))
            .max_concurrent_requests(self.concurrency.max_concurrent_requests)
            .concurrency_enabled(self.concurrency.enabled)
            .build()
    }

    pub fn state_db_path(&self) -> PathBuf {
        self.state.database.clone().unwrap_or_else(default_state_db)
    }

    /// Write this config as TOML, refusing to clobber an existing file
    /// unless `force` is set
    pub fn write_to(&self, path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            bail!(
                "Config file already exists: {} (use --force to overwrite)",
                path.display()
            );
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}
