use super::Filter;
use crate::model::index::{Index, IndexState};
use regex::{Regex, RegexBuilder};

/// Index state criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexStateFilter {
    #[default]
    Any,
    Open,
    Closed,
    Unhealthy,
}

impl IndexStateFilter {
    /// Parse the UI value (`open`, `close`, `unhealthy`, empty for any).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "any" => Some(Self::Any),
            "open" => Some(Self::Open),
            "close" | "closed" => Some(Self::Closed),
            "unhealthy" => Some(Self::Unhealthy),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
enum NameMatcher {
    Any,
    Pattern(Regex),
    /// Fallback when the name is not a valid pattern
    Substring(String),
}

impl NameMatcher {
    fn compile(name: &str) -> Self {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Self::Any;
        }
        match RegexBuilder::new(trimmed).case_insensitive(true).build() {
            Ok(regex) => Self::Pattern(regex),
            Err(_) => Self::Substring(trimmed.to_lowercase()),
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Pattern(regex) => regex.is_match(name),
            Self::Substring(needle) => name.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Filters indices by name pattern, state and the special flag.
///
/// The name is a case-insensitive regular expression; text that does not
/// compile falls back to case-insensitive substring containment.
#[derive(Debug, Clone)]
pub struct IndexFilter {
    name: String,
    state: IndexStateFilter,
    hide_special: bool,
    timestamp: Option<u64>,
    matcher: NameMatcher,
}

impl Default for IndexFilter {
    fn default() -> Self {
        Self::new("", IndexStateFilter::Any, false)
    }
}

impl IndexFilter {
    pub fn new(name: &str, state: IndexStateFilter, hide_special: bool) -> Self {
        Self {
            name: name.to_string(),
            state,
            hide_special,
            timestamp: None,
            matcher: NameMatcher::compile(name),
        }
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
        self.matcher = NameMatcher::compile(name);
    }

    pub fn state(&self) -> IndexStateFilter {
        self.state
    }

    pub fn set_state(&mut self, state: IndexStateFilter) {
        self.state = state;
    }

    pub fn hide_special(&self) -> bool {
        self.hide_special
    }

    pub fn set_hide_special(&mut self, hide: bool) {
        self.hide_special = hide;
    }

    pub fn timestamp(&self) -> Option<u64> {
        self.timestamp
    }

    fn matches_state(&self, index: &Index) -> bool {
        match self.state {
            IndexStateFilter::Any => true,
            IndexStateFilter::Open => index.state == IndexState::Open,
            IndexStateFilter::Closed => index.state == IndexState::Closed,
            IndexStateFilter::Unhealthy => index.unhealthy,
        }
    }
}

impl PartialEq for IndexFilter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.state == other.state
            && self.hide_special == other.hide_special
            && self.timestamp == other.timestamp
    }
}

impl Filter<Index> for IndexFilter {
    fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.state == IndexStateFilter::Any && !self.hide_special
    }

    fn matches(&self, index: &Index) -> bool {
        if self.is_blank() {
            return true;
        }
        if self.hide_special && index.special {
            return false;
        }
        self.matches_state(index) && self.matcher.matches(&index.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank() {
        assert!(IndexFilter::default().is_blank());
        assert!(IndexFilter::new("  ", IndexStateFilter::Any, false).is_blank());
        assert!(!IndexFilter::new("", IndexStateFilter::Any, true).is_blank());
        assert!(!IndexFilter::new("", IndexStateFilter::Open, false).is_blank());
    }

    #[test]
    fn test_regex_name() {
        let filter = IndexFilter::new("^LOGS-\\d+$", IndexStateFilter::Any, false);
        assert!(filter.matches(&Index::closed("logs-2024")));
        assert!(!filter.matches(&Index::closed("old-logs-2024")));
    }

    #[test]
    fn test_invalid_regex_falls_back_to_substring() {
        let filter = IndexFilter::new("Logs[", IndexStateFilter::Any, false);
        assert!(filter.matches(&Index::closed("my-logs[1]")));
        assert!(!filter.matches(&Index::closed("metrics")));
    }

    #[test]
    fn test_hide_special() {
        let filter = IndexFilter::new("", IndexStateFilter::Any, true);
        assert!(!filter.matches(&Index::closed(".kibana")));
        assert!(filter.matches(&Index::closed("kibana")));
    }

    #[test]
    fn test_state() {
        let closed = Index::closed("archive");
        assert!(IndexFilter::new("", IndexStateFilter::Closed, false).matches(&closed));
        assert!(!IndexFilter::new("", IndexStateFilter::Open, false).matches(&closed));
        assert!(!IndexFilter::new("", IndexStateFilter::Unhealthy, false).matches(&closed));
    }

    #[test]
    fn test_equality_and_clone() {
        let filter = IndexFilter::new("logs", IndexStateFilter::Open, true);
        let mut copy = filter.clone();
        assert_eq!(filter, copy);
        copy.set_name("metrics");
        assert_ne!(filter, copy);
        assert_ne!(filter, filter.clone().with_timestamp(5));
    }

    #[test]
    fn test_parse_state() {
        assert_eq!(IndexStateFilter::parse("close"), Some(IndexStateFilter::Closed));
        assert_eq!(IndexStateFilter::parse(""), Some(IndexStateFilter::Any));
        assert_eq!(IndexStateFilter::parse("bogus"), None);
    }
}
