//! Snapshot builder: one `Cluster` per poll cycle.

use crate::error::{ClusterError, Result};
use crate::format::{now_millis, readable_bytes_u64};
use crate::json::{get_property, get_str, get_string, get_u64, object_or_empty, require_object};
use crate::model::changes::ClusterChanges;
use crate::model::index::Index;
use crate::model::node::Node;
use crate::model::settings::{allocation_enabled, ClusterSettings};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

const STATE: &str = "cluster-state";
const STATUS: &str = "cluster-status";
const NODE_STATS: &str = "node-stats";
const SETTINGS: &str = "settings";
const ALIASES: &str = "aliases";

/// The five raw documents fetched in one poll cycle.
#[derive(Debug, Clone, Default)]
pub struct RawDocuments {
    pub state: Value,
    pub status: Value,
    pub node_stats: Value,
    pub settings: Value,
    pub aliases: Value,
}

/// Aggregate root for one poll.
#[derive(Debug, Clone, Serialize)]
pub struct Cluster {
    pub name: String,
    pub master_node: Option<String>,
    pub allocation_enabled: bool,
    pub settings: ClusterSettings,

    /// Sorted with [`Node::compare`]
    pub nodes: Vec<Node>,
    /// Sorted by name
    pub indices: Vec<Index>,

    pub number_of_nodes: usize,
    pub total_indices: usize,
    pub special_indices: usize,

    /// Sum of node document counts
    pub num_docs: u64,
    /// Sum of node store sizes
    pub total_size_in_bytes: u64,
    pub total_size: String,

    pub shards: u64,
    pub failed_shards: u64,
    pub successful_shards: u64,
    pub unassigned_shards: usize,

    /// `None` until [`Cluster::compute_changes`] runs
    pub changes: Option<ClusterChanges>,
    /// Milliseconds since the Unix epoch
    pub created_at: u64,
}

impl Cluster {
    /// Build a snapshot from the raw documents of one poll.
    ///
    /// # Errors
    ///
    /// Returns an error if a document is not a JSON object or a mandatory
    /// path (`nodes`, `routing_table.indices`) is missing. No partial
    /// snapshot is produced.
    pub fn build(documents: &RawDocuments) -> Result<Self> {
        let state = require_document(&documents.state, STATE)?;
        let status = require_document(&documents.status, STATUS)?;
        let node_stats = require_document(&documents.node_stats, NODE_STATS)?;
        let settings = require_document(&documents.settings, SETTINGS)?;
        let aliases = require_document(&documents.aliases, ALIASES)?;

        let master_node = get_str(state, "master_node").map(str::to_string);

        let mut nodes = Vec::new();
        let mut total_size_in_bytes: u64 = 0;
        let mut num_docs: u64 = 0;
        for (id, info) in require_object(state, STATE, "nodes")? {
            let stats = node_stats
                .get("nodes")
                .and_then(|all| all.get(id))
                .unwrap_or(&Value::Null);
            let mut node = Node::new(id, info, stats)?;
            if master_node.as_deref() == Some(id.as_str()) {
                node.set_current_master();
            }
            total_size_in_bytes = total_size_in_bytes.saturating_add(node.size_in_bytes);
            num_docs = num_docs.saturating_add(node.docs);
            nodes.push(node);
        }
        nodes.sort_by(|a, b| a.compare(b));

        let statuses = object_or_empty(status, "indices");
        let mut indices = Vec::new();
        for (name, routing) in require_object(state, STATE, "routing_table.indices")? {
            let index_status = statuses.and_then(|s| s.get(name));
            indices.push(Index::new(name, routing, index_status, aliases.get(name))?);
        }
        // blocked-only placeholders are not counted as special
        let special_indices = indices.iter().filter(|index| index.special).count();
        if let Some(blocked) = object_or_empty(state, "blocks.indices") {
            for name in blocked.keys() {
                if !indices.iter().any(|index| &index.name == name) {
                    indices.push(Index::closed(name));
                }
            }
        }
        indices.sort_by(|a, b| a.compare(b));

        let unassigned_shards = get_property(state, "routing_nodes.unassigned")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);

        let cluster = Self {
            name: get_string(state, "cluster_name", ""),
            allocation_enabled: allocation_enabled(settings),
            settings: ClusterSettings::from_document(settings),
            number_of_nodes: nodes.len(),
            total_indices: indices.len(),
            special_indices,
            nodes,
            indices,
            master_node,
            num_docs,
            total_size_in_bytes,
            total_size: readable_bytes_u64(total_size_in_bytes),
            shards: get_u64(status, "_shards.total", 0),
            failed_shards: get_u64(status, "_shards.failed", 0),
            successful_shards: get_u64(status, "_shards.successful", 0),
            unassigned_shards,
            changes: None,
            created_at: now_millis(),
        };

        debug!(
            cluster = %cluster.name,
            nodes = cluster.number_of_nodes,
            indices = cluster.total_indices,
            docs = cluster.num_docs,
            "Built cluster snapshot"
        );
        Ok(cluster)
    }

    /// Diff against the previously retained snapshot and attach the result.
    pub fn compute_changes(&mut self, previous: Option<&Cluster>) -> &ClusterChanges {
        let changes = ClusterChanges::between(previous, self);
        self.changes.insert(changes)
    }

    pub fn open_indices(&self) -> Vec<&Index> {
        self.indices.iter().filter(|index| index.is_open()).collect()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn index(&self, name: &str) -> Option<&Index> {
        self.indices.iter().find(|index| index.name == name)
    }
}

fn require_document<'a>(document: &'a Value, name: &'static str) -> Result<&'a Value> {
    if document.is_object() {
        Ok(document)
    } else {
        Err(ClusterError::MissingDocument(name))
    }
}
