//! Where raw documents come from.
//!
//! The network client that talks to a live cluster is not part of this crate;
//! it plugs in by implementing [`ClusterSource`].

mod file;

pub use file::FileSource;

use crate::error::Result;
use crate::model::RawDocuments;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait ClusterSource: Send + Sync {
    /// Cluster state: master node, nodes, routing table, blocks.
    async fn fetch_state(&self) -> Result<Value>;

    /// Per-index status and shard totals.
    async fn fetch_status(&self) -> Result<Value>;

    /// Per-node statistics.
    async fn fetch_node_stats(&self) -> Result<Value>;

    /// Persistent and transient cluster settings.
    async fn fetch_settings(&self) -> Result<Value>;

    /// Alias assignments per index.
    async fn fetch_aliases(&self) -> Result<Value>;

    async fn fetch_health(&self) -> Result<Value>;
}

/// Fetch the five snapshot documents concurrently.
///
/// Fails as a whole if any single fetch fails.
pub async fn fetch_documents<S: ClusterSource + ?Sized>(source: &S) -> Result<RawDocuments> {
    let (state, status, node_stats, settings, aliases) = tokio::try_join!(
        source.fetch_state(),
        source.fetch_status(),
        source.fetch_node_stats(),
        source.fetch_settings(),
        source.fetch_aliases(),
    )?;
    Ok(RawDocuments {
        state,
        status,
        node_stats,
        settings,
        aliases,
    })
}
