//! Index value object assembled from routing, status and alias documents.

use crate::error::{ClusterError, Result};
use crate::format::readable_bytes_u64;
use crate::json::{get_property, get_str, get_u64};
use crate::model::shard::{Shard, UnassignedShard, STARTED};
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Number of aliases shown per index.
pub const VISIBLE_ALIASES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IndexState {
    Open,
    Closed,
}

impl std::fmt::Display for IndexState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "close"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Index {
    pub name: String,
    pub state: IndexState,
    pub num_of_shards: usize,
    pub num_of_replicas: usize,
    pub aliases: Vec<String>,

    pub num_docs: u64,
    pub max_doc: u64,
    pub deleted_docs: u64,

    /// Primary store size in bytes
    pub primary_size_in_bytes: u64,
    /// Total store size (primaries and replicas) in bytes
    pub size_in_bytes: u64,
    pub primary_size: String,
    pub size: String,

    /// Name starts with `.` or `_`
    pub special: bool,
    /// At least one shard copy is not `STARTED`
    pub unhealthy: bool,

    shards: BTreeMap<String, Vec<Shard>>,
    unassigned: Vec<UnassignedShard>,
}

impl Index {
    /// Build an open index from its routing-table entry.
    ///
    /// `status` is the entry of the status document and `aliases` the entry
    /// of the aliases document; both may be absent.
    pub fn new(
        name: &str,
        routing: &Value,
        status: Option<&Value>,
        aliases: Option<&Value>,
    ) -> Result<Self> {
        let shard_map = routing
            .get("shards")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                ClusterError::invalid(
                    "cluster-state",
                    format!("routing_table.indices.{}.shards", name),
                )
            })?;

        let copies_of_first = shard_map
            .get("0")
            .or_else(|| shard_map.values().next())
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);

        let mut shards: BTreeMap<String, Vec<Shard>> = BTreeMap::new();
        let mut unassigned = Vec::new();
        let mut unhealthy = false;
        for copies in shard_map.values().filter_map(Value::as_array) {
            for routing in copies {
                if get_str(routing, "state") != Some(STARTED) {
                    unhealthy = true;
                }
                match get_str(routing, "node") {
                    Some(node) => {
                        let shard_status = status.and_then(|s| find_shard_status(s, node, routing));
                        shards
                            .entry(node.to_string())
                            .or_default()
                            .push(Shard::new(node, routing, shard_status));
                    }
                    None => unassigned.push(UnassignedShard::new(routing)),
                }
            }
        }

        let mut index = Self::empty(name, IndexState::Open);
        index.num_of_shards = shard_map.len();
        index.num_of_replicas = copies_of_first.saturating_sub(1);
        index.aliases = alias_names(aliases);
        index.unhealthy = unhealthy;
        index.shards = shards;
        index.unassigned = unassigned;
        if let Some(status) = status {
            index.apply_status(status);
        }
        Ok(index)
    }

    /// Placeholder for an index known only from the cluster blocks.
    pub fn closed(name: &str) -> Self {
        Self::empty(name, IndexState::Closed)
    }

    fn empty(name: &str, state: IndexState) -> Self {
        Self {
            name: name.to_string(),
            state,
            num_of_shards: 0,
            num_of_replicas: 0,
            aliases: Vec::new(),
            num_docs: 0,
            max_doc: 0,
            deleted_docs: 0,
            primary_size_in_bytes: 0,
            size_in_bytes: 0,
            primary_size: readable_bytes_u64(0),
            size: readable_bytes_u64(0),
            special: is_special(name),
            unhealthy: false,
            shards: BTreeMap::new(),
            unassigned: Vec::new(),
        }
    }

    fn apply_status(&mut self, status: &Value) {
        self.num_docs = get_u64(status, "docs.num_docs", 0);
        self.max_doc = get_u64(status, "docs.max_doc", 0);
        self.deleted_docs = get_u64(status, "docs.deleted_docs", 0);
        self.primary_size_in_bytes = get_u64(status, "index.primary_size_in_bytes", 0);
        self.size_in_bytes = get_u64(status, "index.size_in_bytes", 0);
        self.primary_size = readable_bytes_u64(self.primary_size_in_bytes);
        self.size = readable_bytes_u64(self.size_in_bytes);
    }

    /// First five alias names.
    pub fn visible_aliases(&self) -> &[String] {
        &self.aliases[..self.aliases.len().min(VISIBLE_ALIASES)]
    }

    /// Assigned shard copies held by `node_id`.
    pub fn shards_on(&self, node_id: &str) -> &[Shard] {
        self.shards.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn unassigned(&self) -> &[UnassignedShard] {
        &self.unassigned
    }

    pub fn is_open(&self) -> bool {
        self.state == IndexState::Open
    }

    pub fn is_closed(&self) -> bool {
        self.state == IndexState::Closed
    }

    pub fn compare(&self, other: &Index) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl PartialEq for Index {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Index {}

/// Reserved/internal index names start with `.` or `_`.
pub fn is_special(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_')
}

fn alias_names(aliases: Option<&Value>) -> Vec<String> {
    aliases
        .and_then(|a| a.get("aliases"))
        .and_then(Value::as_object)
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default()
}

fn find_shard_status<'a>(status: &'a Value, node: &str, routing: &Value) -> Option<&'a Value> {
    let shard = get_u64(routing, "shard", 0);
    get_property(status, &format!("shards.{}", shard))?
        .as_array()?
        .iter()
        .find(|entry| {
            get_str(entry, "routing.node") == Some(node)
                && get_u64(entry, "routing.shard", u64::MAX) == shard
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn routing() -> Value {
        json!({"shards": {
            "0": [
                {"primary": true, "shard": 0, "state": "STARTED", "node": "n1", "index": "logs"},
                {"primary": false, "shard": 0, "state": "STARTED", "node": "n2", "index": "logs"}
            ],
            "1": [
                {"primary": true, "shard": 1, "state": "STARTED", "node": "n2", "index": "logs"},
                {"primary": false, "shard": 1, "state": "UNASSIGNED", "node": null, "index": "logs"}
            ]
        }})
    }

    #[test]
    fn test_index_from_routing() {
        let status = json!({
            "docs": {"num_docs": 10, "deleted_docs": 1, "max_doc": 11},
            "index": {"primary_size_in_bytes": 1024, "size_in_bytes": 2048},
            "shards": {"0": [{"routing": {"node": "n1", "shard": 0}, "state": "STARTED"}]}
        });
        let aliases = json!({"aliases": {"a1": {}, "a2": {}}});
        let index = Index::new("logs", &routing(), Some(&status), Some(&aliases)).unwrap();

        assert_eq!(index.state, IndexState::Open);
        assert_eq!(index.num_of_shards, 2);
        assert_eq!(index.num_of_replicas, 1);
        assert_eq!(index.num_docs, 10);
        assert_eq!(index.primary_size, "1.00KB");
        assert_eq!(index.size, "2.00KB");
        assert_eq!(index.aliases, vec!["a1", "a2"]);
        assert!(index.unhealthy);
        assert_eq!(index.shards_on("n2").len(), 2);
        assert!(index.shards_on("n1")[0].status.is_some());
        assert!(index.shards_on("n2")[0].status.is_none());
        assert!(index.shards_on("nope").is_empty());
        assert_eq!(index.unassigned().len(), 1);
    }

    #[test]
    fn test_missing_status_defaults() {
        let index = Index::new("logs", &routing(), None, None).unwrap();
        assert_eq!(index.num_docs, 0);
        assert_eq!(index.size_in_bytes, 0);
        assert!(index.aliases.is_empty());
    }

    #[test]
    fn test_missing_shards_is_invalid() {
        assert!(Index::new("logs", &json!({}), None, None).is_err());
    }

    #[test]
    fn test_special_names() {
        assert!(is_special(".kibana"));
        assert!(is_special("_all"));
        assert!(!is_special("logs-2024"));
        assert!(Index::closed(".kibana").special);
    }

    #[test]
    fn test_closed_placeholder() {
        let index = Index::closed("archived");
        assert!(index.is_closed());
        assert_eq!(index.state.to_string(), "close");
        assert!(!index.unhealthy);
    }

    #[test]
    fn test_visible_aliases_capped() {
        let aliases = json!({"aliases": {"a": {}, "b": {}, "c": {}, "d": {}, "e": {}, "f": {}, "g": {}}});
        let index = Index::new("logs", &routing(), None, Some(&aliases)).unwrap();
        assert_eq!(index.aliases.len(), 7);
        assert_eq!(index.visible_aliases(), &["a", "b", "c", "d", "e"]);
    }
}
