//! Periodic refresh of the retained cluster snapshot.
//!
//! Every poll takes a generation number before fetching. Results are only
//! published when their generation is newer than the retained one, so a slow
//! poll that completes after a faster, later one is discarded.

use crate::error::{ClusterError, Result};
use crate::model::{Cluster, ClusterHealth};
use crate::observability::ChangeLog;
use crate::source::{fetch_documents, ClusterSource};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct Retained {
    generation: u64,
    cluster: Option<Arc<Cluster>>,
}

pub struct Poller<S> {
    source: S,
    retained: RwLock<Retained>,
    next_generation: AtomicU64,
    health: RwLock<Option<ClusterHealth>>,
    changelog: Arc<ChangeLog>,
}

impl<S: ClusterSource> Poller<S> {
    pub fn new(source: S) -> Self {
        Self::with_changelog(source, Arc::new(ChangeLog::new()))
    }

    pub fn with_changelog(source: S, changelog: Arc<ChangeLog>) -> Self {
        Self {
            source,
            retained: RwLock::new(Retained::default()),
            next_generation: AtomicU64::new(0),
            health: RwLock::new(None),
            changelog,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn changelog(&self) -> &Arc<ChangeLog> {
        &self.changelog
    }

    /// Reserve the generation number for a poll that is about to start.
    pub fn begin(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The retained snapshot, if any poll has succeeded.
    pub async fn current(&self) -> Option<Arc<Cluster>> {
        self.retained.read().await.cluster.clone()
    }

    pub async fn generation(&self) -> u64 {
        self.retained.read().await.generation
    }

    pub async fn health(&self) -> Option<ClusterHealth> {
        self.health.read().await.clone()
    }

    /// Fetch, build and publish one snapshot.
    ///
    /// A failed fetch or build leaves the retained snapshot untouched.
    pub async fn poll_once(&self) -> Result<Arc<Cluster>> {
        let generation = self.begin();
        let documents = fetch_documents(&self.source).await?;
        let cluster = Cluster::build(&documents)?;
        self.publish(generation, cluster).await
    }

    /// Diff `cluster` against the retained snapshot and make it current.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::Stale`] if a newer generation has already been
    /// published.
    pub async fn publish(&self, generation: u64, mut cluster: Cluster) -> Result<Arc<Cluster>> {
        let mut retained = self.retained.write().await;
        if generation <= retained.generation {
            return Err(ClusterError::Stale {
                generation,
                latest: retained.generation,
            });
        }

        let messages = cluster
            .compute_changes(retained.cluster.as_deref())
            .messages();
        for message in messages {
            info!(cluster = %cluster.name, "{}", message);
            self.changelog.record(generation, &cluster.name, message);
        }

        let cluster = Arc::new(cluster);
        retained.generation = generation;
        retained.cluster = Some(cluster.clone());
        debug!(generation, "Published cluster snapshot");
        Ok(cluster)
    }

    /// Refresh the health summary. On failure the summary is cleared.
    pub async fn refresh_health(&self) -> Option<ClusterHealth> {
        let health = match self.source.fetch_health().await {
            Ok(document) => match ClusterHealth::from_document(&document) {
                Ok(health) => Some(health),
                Err(e) => {
                    warn!("Invalid health document: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to fetch cluster health: {}", e);
                None
            }
        };
        *self.health.write().await = health.clone();
        health
    }

    /// Poll every `interval` until `shutdown` flips to `true`.
    pub async fn run(&self, interval: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        info!("Polling cluster every {:?}", interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.poll_once().await {
                        Ok(_) => {}
                        Err(ClusterError::Stale { generation, latest }) => {
                            debug!(generation, latest, "Discarded stale poll result");
                        }
                        Err(e) => warn!("Poll failed: {}", e),
                    }
                    self.refresh_health().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Poller shutting down");
                        break;
                    }
                }
            }
        }
    }
}
