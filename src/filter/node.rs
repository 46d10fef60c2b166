use super::Filter;
use crate::model::node::Node;

/// Filters nodes by name substring and role.
///
/// A node passes the role check if it has any role whose flag is enabled.
/// All three roles enabled with an empty name is the blank filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFilter {
    pub name: String,
    pub data: bool,
    pub master: bool,
    pub client: bool,
    pub timestamp: Option<u64>,
}

impl Default for NodeFilter {
    fn default() -> Self {
        Self {
            name: String::new(),
            data: true,
            master: true,
            client: true,
            timestamp: None,
        }
    }
}

impl NodeFilter {
    pub fn new(name: &str, data: bool, master: bool, client: bool) -> Self {
        Self {
            name: name.to_string(),
            data,
            master,
            client,
            timestamp: None,
        }
    }

    fn matches_name(&self, name: &str) -> bool {
        let needle = self.name.trim();
        needle.is_empty() || name.to_lowercase().contains(&needle.to_lowercase())
    }

    fn matches_type(&self, node: &Node) -> bool {
        (node.data && self.data) || (node.master && self.master) || (node.client && self.client)
    }
}

impl Filter<Node> for NodeFilter {
    fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.data && self.master && self.client
    }

    fn matches(&self, node: &Node) -> bool {
        self.is_blank() || (self.matches_name(&node.name) && self.matches_type(node))
    }
}
