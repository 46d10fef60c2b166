use super::Filter;
use crate::model::alias::IndexAliases;

/// Filters alias groups by index and alias substrings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasFilter {
    pub index: String,
    pub alias: String,
}

impl AliasFilter {
    pub fn new(index: &str, alias: &str) -> Self {
        Self {
            index: index.to_string(),
            alias: alias.to_string(),
        }
    }
}

impl Filter<IndexAliases> for AliasFilter {
    fn is_blank(&self) -> bool {
        self.index.trim().is_empty() && self.alias.trim().is_empty()
    }

    fn matches(&self, group: &IndexAliases) -> bool {
        if self.is_blank() {
            return true;
        }
        if !self.index.trim().is_empty() && !group.index.contains(self.index.as_str()) {
            return false;
        }
        self.alias.trim().is_empty()
            || group
                .aliases
                .iter()
                .any(|alias| alias.alias.contains(self.alias.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::alias::Alias;

    fn group() -> IndexAliases {
        IndexAliases::new("logs-2024", vec![Alias::new("recent", "logs-2024"), Alias::new("all", "logs-2024")])
    }

    #[test]
    fn test_blank() {
        assert!(AliasFilter::default().is_blank());
        assert!(AliasFilter::default().matches(&group()));
    }

    #[test]
    fn test_index_and_alias() {
        assert!(AliasFilter::new("logs", "").matches(&group()));
        assert!(AliasFilter::new("", "rec").matches(&group()));
        assert!(AliasFilter::new("2024", "all").matches(&group()));
        assert!(!AliasFilter::new("metrics", "all").matches(&group()));
        assert!(!AliasFilter::new("logs", "missing").matches(&group()));
    }
}
