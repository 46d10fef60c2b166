//! Alias reconciliation between a server baseline and a locally edited copy.
//!
//! A single directional [`diff`] drives both sides of the update:
//! `diff(baseline, working)` is what must be added and
//! `diff(working, baseline)` is what must be removed.

use crate::error::{ClusterError, Result};
use crate::model::alias::{Alias, IndexAliases};
use serde_json::{json, Value};

/// Aliases present in `modified` with no structurally equal counterpart in
/// `original`.
///
/// When an index of `modified` is absent from `original`, every alias under it
/// is a difference.
pub fn diff(original: &[IndexAliases], modified: &[IndexAliases]) -> Vec<Alias> {
    let mut differences = Vec::new();
    for group in modified {
        let mut baseline = original
            .iter()
            .filter(|candidate| candidate.index == group.index)
            .peekable();
        if baseline.peek().is_none() {
            differences.extend(group.aliases.iter().cloned());
            continue;
        }
        let known: Vec<&Alias> = baseline.flat_map(|g| g.aliases.iter()).collect();
        differences.extend(
            group
                .aliases
                .iter()
                .filter(|alias| !known.contains(alias))
                .cloned(),
        );
    }
    differences
}

/// Apply additions and removals to a collection.
///
/// Groups left without aliases are dropped.
pub fn apply(
    collection: &[IndexAliases],
    additions: &[Alias],
    removals: &[Alias],
) -> Vec<IndexAliases> {
    let mut result: Vec<IndexAliases> = collection.to_vec();
    for removed in removals {
        if let Some(group) = result.iter_mut().find(|g| g.index == removed.index) {
            group.aliases.retain(|alias| alias != removed);
        }
    }
    for added in additions {
        match result.iter_mut().find(|g| g.index == added.index) {
            Some(group) => group.aliases.push(added.clone()),
            None => result.push(IndexAliases::new(&added.index, vec![added.clone()])),
        }
    }
    result.retain(|group| !group.aliases.is_empty());
    result
}

/// Body of an alias update: removals first, then additions.
pub fn update_actions(additions: &[Alias], removals: &[Alias]) -> Value {
    let actions: Vec<Value> = removals
        .iter()
        .map(|alias| json!({ "remove": alias.info() }))
        .chain(additions.iter().map(|alias| json!({ "add": alias.info() })))
        .collect();
    json!({ "actions": actions })
}

/// A server-side alias baseline and the copy being edited against it.
#[derive(Debug, Clone)]
pub struct AliasWorkingSet {
    baseline: Vec<IndexAliases>,
    working: Vec<IndexAliases>,
}

impl AliasWorkingSet {
    pub fn new(baseline: Vec<IndexAliases>) -> Self {
        let working = baseline.clone();
        Self { baseline, working }
    }

    pub fn baseline(&self) -> &[IndexAliases] {
        &self.baseline
    }

    pub fn working(&self) -> &[IndexAliases] {
        &self.working
    }

    /// Attach an alias to its index in the working copy.
    pub fn add_alias(&mut self, alias: Alias) -> Result<()> {
        alias.validate()?;
        match self.working.iter_mut().find(|g| g.index == alias.index) {
            Some(group) => {
                if group.aliases.iter().any(|a| a.alias == alias.alias) {
                    return Err(ClusterError::Validation(
                        "Alias is already associated with this index".to_string(),
                    ));
                }
                group.aliases.push(alias);
            }
            None => {
                let index = alias.index.clone();
                self.working.push(IndexAliases::new(&index, vec![alias]));
            }
        }
        Ok(())
    }

    /// Detach one alias; returns whether it was present.
    pub fn remove_alias(&mut self, index: &str, alias: &str) -> bool {
        let Some(position) = self.working.iter().position(|g| g.index == index) else {
            return false;
        };
        let group = &mut self.working[position];
        let before = group.aliases.len();
        group.aliases.retain(|a| a.alias != alias);
        let removed = group.aliases.len() != before;
        if group.aliases.is_empty() {
            self.working.remove(position);
        }
        removed
    }

    /// Detach every alias of an index; returns whether the index had any.
    pub fn remove_index_aliases(&mut self, index: &str) -> bool {
        let before = self.working.len();
        self.working.retain(|g| g.index != index);
        self.working.len() != before
    }

    pub fn additions(&self) -> Vec<Alias> {
        diff(&self.baseline, &self.working)
    }

    pub fn removals(&self) -> Vec<Alias> {
        diff(&self.working, &self.baseline)
    }

    pub fn has_changes(&self) -> bool {
        !self.additions().is_empty() || !self.removals().is_empty()
    }

    pub fn update_actions(&self) -> Value {
        update_actions(&self.additions(), &self.removals())
    }

    /// Drop local edits.
    pub fn reset(&mut self) {
        self.working = self.baseline.clone();
    }
}
