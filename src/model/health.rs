//! Cluster health summary.

use crate::error::{ClusterError, Result};
use crate::format::{now_millis, time_string};
use crate::json::{get_bool, get_string, get_u64};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterHealth {
    pub status: String,
    pub cluster_name: String,
    pub initializing_shards: u64,
    pub active_primary_shards: u64,
    pub active_shards: u64,
    pub relocating_shards: u64,
    pub unassigned_shards: u64,
    pub number_of_nodes: u64,
    pub number_of_data_nodes: u64,
    pub timed_out: bool,
    /// active + relocating + unassigned + initializing
    pub shards: u64,
    /// `hh:mm:ss` of when this health was built
    pub fetched_at: String,
}

impl ClusterHealth {
    pub fn from_document(document: &Value) -> Result<Self> {
        if !document.is_object() {
            return Err(ClusterError::MissingDocument("cluster-health"));
        }
        let active_shards = get_u64(document, "active_shards", 0);
        let relocating_shards = get_u64(document, "relocating_shards", 0);
        let unassigned_shards = get_u64(document, "unassigned_shards", 0);
        let initializing_shards = get_u64(document, "initializing_shards", 0);
        Ok(Self {
            status: get_string(document, "status", ""),
            cluster_name: get_string(document, "cluster_name", ""),
            initializing_shards,
            active_primary_shards: get_u64(document, "active_primary_shards", 0),
            active_shards,
            relocating_shards,
            unassigned_shards,
            number_of_nodes: get_u64(document, "number_of_nodes", 0),
            number_of_data_nodes: get_u64(document, "number_of_data_nodes", 0),
            timed_out: get_bool(document, "timed_out", false),
            shards: active_shards
                .saturating_add(relocating_shards)
                .saturating_add(unassigned_shards)
                .saturating_add(initializing_shards),
            fetched_at: time_string(now_millis()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_health_totals() {
        let health = ClusterHealth::from_document(&json!({
            "status": "yellow",
            "cluster_name": "prod",
            "active_shards": 10,
            "relocating_shards": 1,
            "unassigned_shards": 2,
            "initializing_shards": 3,
            "number_of_nodes": 3,
            "timed_out": false
        }))
        .unwrap();
        assert_eq!(health.status, "yellow");
        assert_eq!(health.shards, 16);
        assert_eq!(health.number_of_data_nodes, 0);
        assert_eq!(health.fetched_at.len(), 8);
    }

    #[test]
    fn test_shard_total_saturates() {
        let health = ClusterHealth::from_document(&json!({
            "active_shards": u64::MAX,
            "unassigned_shards": 5
        }))
        .unwrap();
        assert_eq!(health.shards, u64::MAX);
    }

    #[test]
    fn test_health_requires_object() {
        assert!(ClusterHealth::from_document(&json!([])).is_err());
    }
}
