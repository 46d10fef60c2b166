//! User preferences behind a key-value store.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

const REFRESH_INTERVAL_KEY: &str = "refresh_interval";
const HOST_HISTORY_KEY: &str = "host_history";

/// Hosts remembered in the connection history
const MAX_HOST_HISTORY: usize = 10;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }
}

/// Typed view over a [`KeyValueStore`].
pub struct Preferences<S> {
    store: S,
    default_refresh_interval: Duration,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S, default_refresh_interval: Duration) -> Self {
        Self {
            store,
            default_refresh_interval,
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        self.store
            .get(REFRESH_INTERVAL_KEY)
            .and_then(|ms| ms.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(self.default_refresh_interval)
    }

    pub fn set_refresh_interval(&self, interval: Duration) {
        self.store
            .set(REFRESH_INTERVAL_KEY, interval.as_millis().to_string());
    }

    /// Most recent first.
    pub fn host_history(&self) -> Vec<String> {
        self.store
            .get(HOST_HISTORY_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Move `host` (lower-cased) to the front, keeping at most ten entries.
    pub fn add_to_history(&self, host: &str) {
        let host = host.to_lowercase();
        let mut history = self.host_history();
        history.retain(|known| known != &host);
        history.insert(0, host);
        history.truncate(MAX_HOST_HISTORY);
        if let Ok(raw) = serde_json::to_string(&history) {
            self.store.set(HOST_HISTORY_KEY, raw);
        }
    }

    pub fn clear_history(&self) {
        self.store.remove(HOST_HISTORY_KEY);
    }
}
