//! Logging setup and the in-memory change feed
//!
//! Features:
//! - Structured logging with text or JSON output
//! - Level configured from file, overridable through `RUST_LOG`
//! - Bounded, most-recent-first log of detected cluster changes

use crate::error::{ClusterError, Result};
use crate::format::{now_millis, time_string};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Change messages kept in memory unless configured otherwise
const DEFAULT_CHANGELOG_MAX_LEN: usize = 128;

/// Output format of the global subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ClusterError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("text") {
            Ok(Self::Text)
        } else if s.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(ClusterError::Config(format!(
                "invalid log format '{}', expected text or json",
                s
            )))
        }
    }
}

/// Log configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Level,
    /// Log format (text or json)
    pub format: LogFormat,
}

impl LogConfig {
    /// Build from the textual level and format of the configuration file.
    pub fn from_names(level: &str, format: &str) -> Result<Self> {
        let level = Level::from_str(level.trim())
            .map_err(|_| ClusterError::Config(format!("invalid log level '{}'", level)))?;
        Ok(Self {
            level,
            format: format.trim().parse()?,
        })
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` directives take precedence over the configured level.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.level).into())
        .from_env_lossy();
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(filter);
    let installed = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| ClusterError::Config(format!("failed to install logger: {}", e)))
}

/// One detected change, tagged with the poll that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEntry {
    /// Poll generation of the snapshot the change was detected in
    pub generation: u64,
    pub cluster: String,
    /// Milliseconds since the Unix epoch
    pub recorded_at: u64,
    pub message: String,
}

impl fmt::Display for ChangeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            time_string(self.recorded_at),
            self.cluster,
            self.message
        )
    }
}

/// Bounded, most-recent-first feed of change messages
#[derive(Debug)]
pub struct ChangeLog {
    entries: RwLock<VecDeque<ChangeEntry>>,
    max_len: usize,
}

impl Default for ChangeLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_CHANGELOG_MAX_LEN)
    }

    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(max_len)),
            max_len,
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn record(&self, generation: u64, cluster: &str, message: impl Into<String>) {
        let entry = ChangeEntry {
            generation,
            cluster: cluster.to_string(),
            recorded_at: now_millis(),
            message: message.into(),
        };
        if let Ok(mut entries) = self.entries.write() {
            entries.push_front(entry);
            entries.truncate(self.max_len);
        }
    }

    /// Up to `count` entries, most recent first.
    pub fn get(&self, count: usize) -> Vec<ChangeEntry> {
        self.entries
            .read()
            .map(|entries| entries.iter().take(count).cloned().collect())
            .unwrap_or_default()
    }

    /// Entries from polls newer than `generation`, most recent first.
    pub fn since(&self, generation: u64) -> Vec<ChangeEntry> {
        self.entries
            .read()
            .map(|entries| {
                entries
                    .iter()
                    .take_while(|entry| entry.generation > generation)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn reset(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_from_names() {
        let config = LogConfig::from_names("DEBUG", "Json").unwrap();
        assert_eq!(config.level, Level::DEBUG);
        assert_eq!(config.format, LogFormat::Json);
        assert!(LogConfig::from_names("loud", "text").is_err());
        assert!(matches!(
            LogConfig::from_names("info", "yaml"),
            Err(ClusterError::Config(_))
        ));
    }

    #[test]
    fn test_change_log_keeps_most_recent() {
        let log = ChangeLog::with_max_len(3);
        for generation in 1..=5 {
            log.record(generation, "prod", format!("change {}", generation));
        }

        assert_eq!(log.len(), 3);
        let entries = log.get(10);
        assert_eq!(entries[0].message, "change 5");
        assert_eq!(entries[2].generation, 3);
        assert_eq!(log.get(1).len(), 1);
    }

    #[test]
    fn test_change_log_since_generation() {
        let log = ChangeLog::new();
        log.record(1, "prod", "1 indices created: [logs]");
        log.record(2, "prod", "1 node(s) left the cluster: [a[a:9300]]");
        log.record(2, "prod", "1 indices deleted: [logs]");

        let newer = log.since(1);
        assert_eq!(newer.len(), 2);
        assert!(newer.iter().all(|entry| entry.generation == 2));
        assert!(log.since(2).is_empty());

        log.reset();
        assert!(log.is_empty());
    }

    #[test]
    fn test_entry_display() {
        let entry = ChangeEntry {
            generation: 7,
            cluster: "prod".to_string(),
            recorded_at: 47_109_000,
            message: "1 indices created: [logs]".to_string(),
        };
        assert_eq!(entry.to_string(), "13:05:09 [prod] 1 indices created: [logs]");
    }
}
