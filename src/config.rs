use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::paths::JrpPaths;

/// Compressed word database snapshot fetched by `jrp download`.
pub const DEFAULT_WORD_DB_URL: &str =
    "https://github.com/yanosea/jrp/releases/latest/download/word.db.gz";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct JrpConfig {
    pub log: LogConfig,
    pub storage: StorageConfig,
    pub download: DownloadConfig,
    pub generate: GenerateConfig,
    pub history: HistoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides `<user-data-dir>` when non-empty.
    pub data_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DownloadConfig {
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GenerateConfig {
    pub default_number: i64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HistoryConfig {
    pub default_number: i64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_WORD_DB_URL.into(),
            timeout_secs: 60,
        }
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self { default_number: 1 }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { default_number: 10 }
    }
}

/// Returns the default config file path: `<config-dir>/jrp/config.toml`,
/// or `$JRP_CONFIG` when set.
pub fn default_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os("JRP_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jrp")
        .join("config.toml")
}

impl JrpConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            JrpConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (JRP_DATA_DIR, JRP_LOG_LEVEL, JRP_WORD_DB_URL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("JRP_DATA_DIR") {
            self.storage.data_dir = val;
        }
        if let Ok(val) = std::env::var("JRP_LOG_LEVEL") {
            self.log.level = val;
        }
        if let Ok(val) = std::env::var("JRP_WORD_DB_URL") {
            self.download.url = val;
        }
    }

    /// Resolve the word database and store locations for this configuration.
    pub fn paths(&self) -> JrpPaths {
        if self.storage.data_dir.trim().is_empty() {
            JrpPaths::from_env()
        } else {
            JrpPaths::new(expand_tilde(&self.storage.data_dir))
        }
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
