//! Cluster-wide settings of interest.

use crate::json::{get_property, get_str};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Dotted setting keys read from the settings document. Anything else is ignored.
pub const CLUSTER_SETTINGS: &[&str] = &[
    // cluster
    "cluster.blocks.read_only",
    "indices.ttl.interval",
    "indices.cache.filter.size",
    "discovery.zen.minimum_master_nodes",
    // recovery
    "indices.recovery.concurrent_streams",
    "indices.recovery.compress",
    "indices.recovery.file_chunk_size",
    "indices.recovery.translog_ops",
    "indices.recovery.translog_size",
    "indices.recovery.max_bytes_per_sec",
    // routing
    "cluster.routing.allocation.node_initial_primaries_recoveries",
    "cluster.routing.allocation.cluster_concurrent_rebalance",
    "cluster.routing.allocation.awareness.attributes",
    "cluster.routing.allocation.node_concurrent_recoveries",
    "cluster.routing.allocation.disable_allocation",
    "cluster.routing.allocation.disable_replica_allocation",
];

const ALLOCATION_ENABLE: &str = "cluster.routing.allocation.enable";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterSettings {
    pub persistent: BTreeMap<String, Value>,
    pub transient: BTreeMap<String, Value>,
}

impl ClusterSettings {
    pub fn from_document(document: &Value) -> Self {
        Self {
            persistent: read_scope(document, "persistent"),
            transient: read_scope(document, "transient"),
        }
    }

    /// Effective value: transient wins over persistent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.transient.get(key).or_else(|| self.persistent.get(key))
    }
}

fn read_scope(document: &Value, scope: &str) -> BTreeMap<String, Value> {
    let Some(settings) = document.get(scope) else {
        return BTreeMap::new();
    };
    CLUSTER_SETTINGS
        .iter()
        .filter_map(|key| get_property(settings, key).map(|v| (key.to_string(), v.clone())))
        .collect()
}

/// Whether shard allocation is enabled.
///
/// A non-empty transient `cluster.routing.allocation.enable` decides on its
/// own; otherwise the persistent value applies, defaulting to `"all"`.
pub fn allocation_enabled(document: &Value) -> bool {
    let transient = get_str(document, &format!("transient.{}", ALLOCATION_ENABLE))
        .filter(|value| !value.is_empty());
    match transient {
        Some(value) => value == "all",
        None => {
            get_str(document, &format!("persistent.{}", ALLOCATION_ENABLE)).unwrap_or("all")
                == "all"
        }
    }
}
