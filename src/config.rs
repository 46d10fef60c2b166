//! TOML configuration.
//!
//! ```toml
//! [poller]
//! refresh_interval_ms = 3000
//!
//! [paging]
//! page_size = 10
//!
//! [logging]
//! level = "info"       # trace, debug, info, warn, error
//! format = "text"      # or "json"
//!
//! [source]
//! docs_dir = "./docs"
//! ```

use crate::error::{ClusterError, Result};
use crate::observability::LogConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Poller section of the configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct PollerConfig {
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
}

fn default_refresh_interval_ms() -> u64 {
    3000
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: default_refresh_interval_ms(),
        }
    }
}

impl PollerConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

/// Paging section of the configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct PagingConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

/// Pages are padded to their size, so the size is bounded.
pub const MAX_PAGE_SIZE: usize = 1000;

fn default_page_size() -> usize {
    10
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Logging section of the configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format: text or json
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn to_log_config(&self) -> Result<LogConfig> {
        LogConfig::from_names(&self.level, &self.format)
    }
}

/// Source section of the configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Directory holding the raw JSON documents
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("./docs")
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub poller: PollerConfig,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| ClusterError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.poller.refresh_interval_ms == 0 {
            return Err(ClusterError::Config(
                "poller.refresh_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.paging.page_size == 0 || self.paging.page_size > MAX_PAGE_SIZE {
            return Err(ClusterError::Config(format!(
                "paging.page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        self.logging.to_log_config()?;
        Ok(())
    }
}
