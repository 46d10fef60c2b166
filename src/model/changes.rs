//! Change detection between consecutive snapshots.

use crate::format::readable_bytes;
use crate::model::cluster::Cluster;
use crate::model::index::Index;
use crate::model::node::Node;
use serde::Serialize;
use std::collections::HashSet;

/// Structural delta between two snapshots of the same cluster.
///
/// Each list stays `None` until at least one entry is recorded, so a value
/// with all four lists empty is the "no changes" state. The numeric deltas
/// are signed and do not count as changes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClusterChanges {
    node_joins: Option<Vec<Node>>,
    node_leaves: Option<Vec<Node>>,
    indices_created: Option<Vec<Index>>,
    indices_deleted: Option<Vec<Index>>,
    doc_delta: i64,
    data_delta: i64,
}

impl ClusterChanges {
    /// Compare `current` with `previous`.
    ///
    /// Nothing is compared when there is no previous snapshot or it belongs to
    /// a differently named cluster.
    pub fn between(previous: Option<&Cluster>, current: &Cluster) -> Self {
        let mut changes = Self::default();
        let Some(previous) = previous.filter(|p| p.name == current.name) else {
            return changes;
        };

        for node in missing_from(&previous.nodes, &current.nodes, |n| &n.id) {
            changes.add_leaving_node(node.clone());
        }
        for node in missing_from(&current.nodes, &previous.nodes, |n| &n.id) {
            changes.add_joining_node(node.clone());
        }
        for index in missing_from(&previous.indices, &current.indices, |i| &i.name) {
            changes.add_deleted_index(index.clone());
        }
        for index in missing_from(&current.indices, &previous.indices, |i| &i.name) {
            changes.add_created_index(index.clone());
        }

        changes.doc_delta = signed_delta(current.num_docs, previous.num_docs);
        changes.data_delta = signed_delta(current.total_size_in_bytes, previous.total_size_in_bytes);
        changes
    }

    pub fn has_changes(&self) -> bool {
        self.has_joins() || self.has_leaves() || self.has_created_indices() || self.has_deleted_indices()
    }

    pub fn has_joins(&self) -> bool {
        self.node_joins.is_some()
    }

    pub fn has_leaves(&self) -> bool {
        self.node_leaves.is_some()
    }

    pub fn has_created_indices(&self) -> bool {
        self.indices_created.is_some()
    }

    pub fn has_deleted_indices(&self) -> bool {
        self.indices_deleted.is_some()
    }

    pub fn node_joins(&self) -> &[Node] {
        self.node_joins.as_deref().unwrap_or_default()
    }

    pub fn node_leaves(&self) -> &[Node] {
        self.node_leaves.as_deref().unwrap_or_default()
    }

    pub fn indices_created(&self) -> &[Index] {
        self.indices_created.as_deref().unwrap_or_default()
    }

    pub fn indices_deleted(&self) -> &[Index] {
        self.indices_deleted.as_deref().unwrap_or_default()
    }

    pub fn doc_delta(&self) -> i64 {
        self.doc_delta
    }

    pub fn abs_doc_delta(&self) -> u64 {
        self.doc_delta.unsigned_abs()
    }

    pub fn data_delta(&self) -> i64 {
        self.data_delta
    }

    /// Absolute byte delta, human readable.
    pub fn abs_data_delta(&self) -> String {
        readable_bytes(self.data_delta.saturating_abs())
    }

    fn add_joining_node(&mut self, node: Node) {
        self.node_joins.get_or_insert_with(Vec::new).push(node);
    }

    fn add_leaving_node(&mut self, node: Node) {
        self.node_leaves.get_or_insert_with(Vec::new).push(node);
    }

    fn add_created_index(&mut self, index: Index) {
        self.indices_created.get_or_insert_with(Vec::new).push(index);
    }

    fn add_deleted_index(&mut self, index: Index) {
        self.indices_deleted.get_or_insert_with(Vec::new).push(index);
    }

    /// One line per non-empty change category.
    pub fn messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        if self.has_joins() {
            messages.push(format!(
                "{} new node(s) joined the cluster: [{}]",
                self.node_joins().len(),
                labels(self.node_joins().iter().map(Node::label))
            ));
        }
        if self.has_leaves() {
            messages.push(format!(
                "{} node(s) left the cluster: [{}]",
                self.node_leaves().len(),
                labels(self.node_leaves().iter().map(Node::label))
            ));
        }
        if self.has_created_indices() {
            messages.push(format!(
                "{} indices created: [{}]",
                self.indices_created().len(),
                labels(self.indices_created().iter().map(|i| i.name.clone()))
            ));
        }
        if self.has_deleted_indices() {
            messages.push(format!(
                "{} indices deleted: [{}]",
                self.indices_deleted().len(),
                labels(self.indices_deleted().iter().map(|i| i.name.clone()))
            ));
        }
        messages
    }
}

/// Entries of `from` whose key does not appear in `other`, in `from` order.
fn missing_from<'a, T>(
    from: &'a [T],
    other: &'a [T],
    key: impl Fn(&T) -> &String,
) -> impl Iterator<Item = &'a T> {
    let known: HashSet<&str> = other.iter().map(|item| key(item).as_str()).collect();
    from.iter()
        .filter(move |item| !known.contains(key(*item).as_str()))
}

fn signed_delta(current: u64, previous: u64) -> i64 {
    let delta = i128::from(current) - i128::from(previous);
    i64::try_from(delta).unwrap_or(if delta < 0 { i64::MIN } else { i64::MAX })
}

fn labels(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(",")
}
