use super::Filter;
use crate::model::snapshot::Warmer;

/// Filters warmers by id substring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarmerFilter {
    pub id: String,
}

impl WarmerFilter {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl Filter<Warmer> for WarmerFilter {
    fn is_blank(&self) -> bool {
        self.id.trim().is_empty()
    }

    fn matches(&self, warmer: &Warmer) -> bool {
        self.is_blank() || warmer.id.contains(self.id.as_str())
    }
}
