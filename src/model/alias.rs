//! Alias assignments.

use crate::error::{ClusterError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// A single alias definition.
///
/// Alias and index names are lower-cased on construction. Two aliases are
/// equal only if every field matches, so the same name with a different
/// filter or routing is a different alias.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alias {
    pub alias: String,
    pub index: String,
    pub filter: Option<Value>,
    pub index_routing: Option<String>,
    pub search_routing: Option<String>,
}

impl Alias {
    pub fn new(alias: &str, index: &str) -> Self {
        Self {
            alias: alias.to_lowercase(),
            index: index.to_lowercase(),
            filter: None,
            index_routing: None,
            search_routing: None,
        }
    }

    pub fn with_filter(mut self, filter: Value) -> Self {
        self.filter = (!filter.is_null()).then_some(filter);
        self
    }

    /// Set the filter from editor text. Blank text clears the filter.
    pub fn with_filter_text(mut self, text: &str) -> Result<Self> {
        self.filter = if text.trim().is_empty() {
            None
        } else {
            Some(serde_json::from_str(text)?)
        };
        Ok(self)
    }

    pub fn with_index_routing(mut self, routing: &str) -> Self {
        self.index_routing = non_empty(routing);
        self
    }

    pub fn with_search_routing(mut self, routing: &str) -> Self {
        self.search_routing = non_empty(routing);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.alias.trim().is_empty() {
            return Err(ClusterError::Validation(
                "Alias must have a non empty name".to_string(),
            ));
        }
        if self.index.trim().is_empty() {
            return Err(ClusterError::Validation(
                "Alias must have a valid index name".to_string(),
            ));
        }
        Ok(())
    }

    /// Body of an alias action (`add`/`remove`).
    pub fn info(&self) -> Value {
        let mut info = Map::new();
        info.insert("index".to_string(), Value::String(self.index.clone()));
        info.insert("alias".to_string(), Value::String(self.alias.clone()));
        if let Some(filter) = &self.filter {
            info.insert("filter".to_string(), filter.clone());
        }
        if let Some(routing) = &self.index_routing {
            info.insert("index_routing".to_string(), Value::String(routing.clone()));
        }
        if let Some(routing) = &self.search_routing {
            info.insert("search_routing".to_string(), Value::String(routing.clone()));
        }
        Value::Object(info)
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}

/// All aliases attached to one index.
///
/// `Clone` is a deep copy: the working copy shares no alias with its baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexAliases {
    pub index: String,
    pub aliases: Vec<Alias>,
}

impl IndexAliases {
    pub fn new(index: &str, aliases: Vec<Alias>) -> Self {
        Self {
            index: index.to_string(),
            aliases,
        }
    }
}

/// Build the alias baseline from the aliases document.
///
/// Indices without aliases are skipped.
pub fn parse_aliases(document: &Value) -> Result<Vec<IndexAliases>> {
    let indices = document
        .as_object()
        .ok_or(ClusterError::MissingDocument("aliases"))?;

    let mut collection = Vec::new();
    for (index, entry) in indices {
        let Some(definitions) = entry.get("aliases").and_then(Value::as_object) else {
            continue;
        };
        if definitions.is_empty() {
            continue;
        }
        let aliases = definitions
            .iter()
            .map(|(name, info)| {
                let mut alias = Alias::new(name, index);
                if let Some(filter) = info.get("filter") {
                    alias = alias.with_filter(filter.clone());
                }
                if let Some(routing) = info.get("index_routing").and_then(Value::as_str) {
                    alias = alias.with_index_routing(routing);
                }
                if let Some(routing) = info.get("search_routing").and_then(Value::as_str) {
                    alias = alias.with_search_routing(routing);
                }
                alias
            })
            .collect();
        collection.push(IndexAliases::new(index, aliases));
    }
    Ok(collection)
}
