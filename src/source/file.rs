use super::ClusterSource;
use crate::error::{ClusterError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads documents from `<dir>/{state,status,stats,settings,aliases,health}.json`.
#[derive(Debug, Clone)]
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read(&self, name: &str) -> Result<Value> {
        let path = self.dir.join(format!("{}.json", name));
        debug!(path = %path.display(), "Reading document");
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ClusterError::Fetch(format!("{}: {}", path.display(), e)))?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl ClusterSource for FileSource {
    async fn fetch_state(&self) -> Result<Value> {
        self.read("state").await
    }

    async fn fetch_status(&self) -> Result<Value> {
        self.read("status").await
    }

    async fn fetch_node_stats(&self) -> Result<Value> {
        self.read("stats").await
    }

    async fn fetch_settings(&self) -> Result<Value> {
        self.read("settings").await
    }

    async fn fetch_aliases(&self) -> Result<Value> {
        self.read("aliases").await
    }

    async fn fetch_health(&self) -> Result<Value> {
        self.read("health").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fetch_documents;

    #[tokio::test]
    async fn test_reads_documents() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["state", "status", "stats", "settings", "aliases"] {
            std::fs::write(dir.path().join(format!("{}.json", name)), format!("{{\"doc\": \"{}\"}}", name))
                .unwrap();
        }
        let source = FileSource::new(dir.path());
        let docs = fetch_documents(&source).await.unwrap();
        assert_eq!(docs.node_stats["doc"], "stats");
        assert_eq!(docs.aliases["doc"], "aliases");
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path());
        assert!(matches!(source.fetch_health().await, Err(ClusterError::Fetch(_))));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("state.json"), "{not json").unwrap();
        let source = FileSource::new(dir.path());
        assert!(matches!(source.fetch_state().await, Err(ClusterError::Json(_))));
    }
}
