//! Predicate filters used by the paginator.
//!
//! Every filter is a plain value: `Clone` gives an independent copy and
//! `PartialEq` lets a presentation layer detect that the criteria changed.

mod alias;
mod index;
mod node;
mod warmer;

pub use alias::AliasFilter;
pub use index::{IndexFilter, IndexStateFilter};
pub use node::NodeFilter;
pub use warmer::WarmerFilter;

pub trait Filter<T>: Clone + PartialEq {
    /// No active criteria; matches everything.
    fn is_blank(&self) -> bool;

    fn matches(&self, item: &T) -> bool;
}

/// Filter with no criteria, for collections without a filtering UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOpFilter;

impl<T> Filter<T> for NoOpFilter {
    fn is_blank(&self) -> bool {
        true
    }

    fn matches(&self, _item: &T) -> bool {
        true
    }
}

/// Snapshot listings have no filtering criteria.
pub type SnapshotFilter = NoOpFilter;
