//! Cluster node value object.
//!
//! A `Node` merges the node entry of the cluster-state document with the
//! matching entry of the per-node stats document. Identity is the opaque
//! node id; everything else is informational.

use crate::error::{ClusterError, Result};
use crate::format::readable_bytes_u64;
use crate::json::{get_f64, get_property, get_string, get_u64};
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;

/// Role flags derived from a node's attribute map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeRoles {
    pub master: bool,
    pub data: bool,
    pub client: bool,
}

impl NodeRoles {
    /// Derive roles from the raw `attributes` object.
    ///
    /// `master` and `data` default to true unless explicitly `"false"`;
    /// `client` defaults to false unless explicitly `"true"`. A node that is
    /// neither master-eligible nor data-capable is a client.
    pub fn from_attributes(attributes: Option<&Value>) -> Self {
        let flag = |name: &str| attributes.and_then(|attrs| get_property(attrs, name));
        let master = !is_literal(flag("master"), false);
        let data = !is_literal(flag("data"), false);
        let client = is_literal(flag("client"), true);

        let master_eligible = master && !client;
        let data_node = data && !client;
        Self {
            master: master_eligible,
            data: data_node,
            client: client || (!master_eligible && !data_node),
        }
    }
}

fn is_literal(value: Option<&Value>, expected: bool) -> bool {
    let literal = if expected { "true" } else { "false" };
    match value {
        Some(Value::String(s)) => s == literal,
        Some(Value::Bool(b)) => *b == expected,
        _ => false,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub transport_address: String,
    pub host: String,
    pub master: bool,
    pub data: bool,
    pub client: bool,
    pub current_master: bool,

    pub heap_used: String,
    pub heap_committed: String,
    pub heap_max: String,
    pub heap_used_percent: u64,

    pub disk_total: String,
    pub disk_free: String,
    pub disk_used_percent: u64,

    pub cpu_user: f64,
    pub cpu_sys: f64,

    /// Documents held by this node
    pub docs: u64,
    /// Store size held by this node
    pub size_in_bytes: u64,
    pub size: String,
}

impl Node {
    /// Build a node from its cluster-state entry and (possibly absent) stats.
    pub fn new(id: &str, info: &Value, stats: &Value) -> Result<Self> {
        if !info.is_object() {
            return Err(ClusterError::invalid(
                "cluster-state",
                format!("nodes.{}", id),
            ));
        }
        let roles = NodeRoles::from_attributes(info.get("attributes"));

        let disk_total = get_u64(stats, "fs.total.total_in_bytes", 0);
        let disk_free = get_u64(stats, "fs.total.free_in_bytes", 0);
        let disk_used_percent = if disk_total > 0 {
            let used = disk_total.saturating_sub(disk_free) as f64;
            (100.0 * used / disk_total as f64).round() as u64
        } else {
            0
        };
        let size_in_bytes = get_u64(stats, "indices.store.size_in_bytes", 0);

        Ok(Self {
            id: id.to_string(),
            name: get_string(info, "name", ""),
            transport_address: get_string(info, "transport_address", ""),
            host: get_string(stats, "host", ""),
            master: roles.master,
            data: roles.data,
            client: roles.client,
            current_master: false,
            heap_used: readable_bytes_u64(get_u64(stats, "jvm.mem.heap_used_in_bytes", 0)),
            heap_committed: readable_bytes_u64(get_u64(
                stats,
                "jvm.mem.heap_committed_in_bytes",
                0,
            )),
            heap_max: readable_bytes_u64(get_u64(stats, "jvm.mem.heap_max_in_bytes", 0)),
            heap_used_percent: get_u64(stats, "jvm.mem.heap_used_percent", 0),
            disk_total: readable_bytes_u64(disk_total),
            disk_free: readable_bytes_u64(disk_free),
            disk_used_percent,
            cpu_user: get_f64(stats, "os.cpu.user", 0.0),
            cpu_sys: get_f64(stats, "os.cpu.sys", 0.0),
            docs: get_u64(stats, "indices.docs.count", 0),
            size_in_bytes,
            size: readable_bytes_u64(size_in_bytes),
        })
    }

    pub fn roles(&self) -> NodeRoles {
        NodeRoles {
            master: self.master,
            data: self.data,
            client: self.client,
        }
    }

    pub(crate) fn set_current_master(&mut self) {
        self.current_master = true;
    }

    /// Display order: current master, then master-eligible, then data nodes,
    /// then name. The id breaks remaining ties so the order is total.
    pub fn compare(&self, other: &Node) -> Ordering {
        other
            .current_master
            .cmp(&self.current_master)
            .then_with(|| other.master.cmp(&self.master))
            .then_with(|| other.data.cmp(&self.data))
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.id.cmp(&other.id))
    }

    /// `name[transport_address]`, as used in change messages.
    pub fn label(&self) -> String {
        format!("{}[{}]", self.name, self.transport_address)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}
