//! Snapshot repository definitions.

use crate::error::{ClusterError, Result};
use crate::json::get_str;
use serde::Serialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Repository {
    pub name: String,
    /// Repository type (`fs`, `url`, `s3`, `hdfs`, `azure`)
    pub kind: String,
    pub settings: Map<String, Value>,
}

impl Repository {
    pub fn new(name: &str, info: &Value) -> Self {
        Self {
            name: name.to_string(),
            kind: get_str(info, "type").unwrap_or_default().to_string(),
            settings: info
                .get("settings")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
        }
    }

    /// Parse the `_snapshot/_all` listing.
    pub fn parse_all(document: &Value) -> Result<Vec<Repository>> {
        let repositories = document
            .as_object()
            .ok_or(ClusterError::MissingDocument("repositories"))?;
        Ok(repositories
            .iter()
            .map(|(name, info)| Repository::new(name, info))
            .collect())
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ClusterError::Validation(
                "Repository name is required".to_string(),
            ));
        }
        if self.kind.trim().is_empty() {
            return Err(ClusterError::Validation(
                "Repository type is required".to_string(),
            ));
        }
        for setting in required_settings(&self.kind) {
            if !self.settings.get(*setting).is_some_and(not_empty) {
                return Err(ClusterError::Validation(format!(
                    "{} is required for repositories of type {}",
                    setting, self.kind
                )));
            }
        }
        Ok(())
    }

    /// Creation body: type plus the non-empty settings valid for that type.
    pub fn as_json(&self) -> Value {
        let mut body = json!({ "type": self.kind });
        if let Some(allowed) = allowed_settings(&self.kind) {
            let settings: Map<String, Value> = allowed
                .iter()
                .filter_map(|key| {
                    self.settings
                        .get(*key)
                        .filter(|value| not_empty(value))
                        .map(|value| (key.to_string(), value.clone()))
                })
                .collect();
            body["settings"] = Value::Object(settings);
        }
        body
    }
}

fn required_settings(kind: &str) -> &'static [&'static str] {
    match kind {
        "fs" => &["location"],
        "url" => &["url"],
        "s3" => &["bucket"],
        "hdfs" => &["path"],
        _ => &[],
    }
}

fn allowed_settings(kind: &str) -> Option<&'static [&'static str]> {
    let allowed: &'static [&'static str] = match kind {
        "fs" => &[
            "location",
            "chunk_size",
            "max_restore_bytes_per_sec",
            "max_snapshot_bytes_per_sec",
            "compress",
        ],
        "url" => &["url"],
        "s3" => &[
            "region",
            "bucket",
            "base_path",
            "access_key",
            "secret_key",
            "chunk_size",
            "max_retries",
            "compress",
            "server_side_encryption",
        ],
        "hdfs" => &[
            "uri",
            "path",
            "load_defaults",
            "conf_location",
            "concurrent_streams",
            "compress",
            "chunk_size",
        ],
        "azure" => &[
            "container",
            "base_path",
            "concurrent_streams",
            "chunk_size",
            "compress",
        ],
        _ => return None,
    };
    Some(allowed)
}

fn not_empty(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}
