//! Shard routing entries.

use crate::json::{get_bool, get_str, get_u64};
use serde::Serialize;
use serde_json::Value;

/// Routing state of a fully recovered shard copy.
pub const STARTED: &str = "STARTED";

/// A shard copy assigned to a node.
#[derive(Debug, Clone, Serialize)]
pub struct Shard {
    pub primary: bool,
    pub shard: u64,
    pub state: String,
    pub node: String,
    pub index: String,
    /// Matching entry of the status document, when the routing lines up
    pub status: Option<Value>,
}

impl Shard {
    pub fn new(node: &str, routing: &Value, status: Option<&Value>) -> Self {
        Self {
            primary: get_bool(routing, "primary", false),
            shard: get_u64(routing, "shard", 0),
            state: get_str(routing, "state").unwrap_or_default().to_string(),
            node: node.to_string(),
            index: get_str(routing, "index").unwrap_or_default().to_string(),
            status: status.cloned(),
        }
    }

    /// Composite identity `node_shard_index`.
    pub fn id(&self) -> String {
        format!("{}_{}_{}", self.node, self.shard, self.index)
    }

    pub fn is_started(&self) -> bool {
        self.state == STARTED
    }
}

impl PartialEq for Shard {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node && self.shard == other.shard && self.index == other.index
    }
}

/// A shard copy with no node assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnassignedShard {
    pub primary: bool,
    pub shard: u64,
    pub state: String,
    pub index: String,
}

impl UnassignedShard {
    pub fn new(routing: &Value) -> Self {
        Self {
            primary: get_bool(routing, "primary", false),
            shard: get_u64(routing, "shard", 0),
            state: get_str(routing, "state").unwrap_or_default().to_string(),
            index: get_str(routing, "index").unwrap_or_default().to_string(),
        }
    }

    pub fn id(&self) -> String {
        format!("unassigned_{}_{}", self.shard, self.index)
    }
}
