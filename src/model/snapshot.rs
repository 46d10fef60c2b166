//! Snapshot and warmer records listed by the management API.

use crate::error::{ClusterError, Result};
use crate::json::{get_property, get_string, get_u64};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub name: String,
    pub indices: Vec<String>,
    pub state: String,
    pub start_time: String,
    pub start_time_in_millis: u64,
    pub end_time: String,
    pub end_time_in_millis: u64,
    pub duration_in_millis: u64,
    pub failures: Vec<Value>,
    pub shards: Option<Value>,
}

impl Snapshot {
    pub fn new(info: &Value) -> Self {
        Self {
            name: get_string(info, "snapshot", ""),
            indices: get_property(info, "indices")
                .and_then(Value::as_array)
                .map(|list| {
                    list.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            state: get_string(info, "state", ""),
            start_time: get_string(info, "start_time", ""),
            start_time_in_millis: get_u64(info, "start_time_in_millis", 0),
            end_time: get_string(info, "end_time", ""),
            end_time_in_millis: get_u64(info, "end_time_in_millis", 0),
            duration_in_millis: get_u64(info, "duration_in_millis", 0),
            failures: get_property(info, "failures")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            shards: get_property(info, "shards").cloned(),
        }
    }

    /// Parse a `{"snapshots": [...]}` listing.
    pub fn parse_all(document: &Value) -> Result<Vec<Snapshot>> {
        let snapshots = get_property(document, "snapshots")
            .and_then(Value::as_array)
            .ok_or_else(|| ClusterError::invalid("snapshots", "snapshots"))?;
        Ok(snapshots.iter().map(Snapshot::new).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warmer {
    pub id: String,
    pub index: String,
    pub source: Option<Value>,
    pub types: Vec<String>,
}

impl Warmer {
    pub fn new(id: &str, index: &str, body: &Value) -> Self {
        Self {
            id: id.to_string(),
            index: index.to_string(),
            source: get_property(body, "source").cloned(),
            types: get_property(body, "types")
                .and_then(Value::as_array)
                .map(|list| {
                    list.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Parse a `{index: {"warmers": {id: body}}}` listing.
    pub fn parse_all(document: &Value) -> Result<Vec<Warmer>> {
        let indices = document
            .as_object()
            .ok_or(ClusterError::MissingDocument("warmers"))?;
        let mut warmers = Vec::new();
        for (index, entry) in indices {
            if let Some(definitions) = entry.get("warmers").and_then(Value::as_object) {
                for (id, body) in definitions {
                    warmers.push(Warmer::new(id, index, body));
                }
            }
        }
        Ok(warmers)
    }
}
