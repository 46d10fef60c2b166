//! Domain model rebuilt from raw documents on every poll.

pub mod alias;
pub mod changes;
pub mod cluster;
pub mod health;
pub mod index;
pub mod node;
pub mod repository;
pub mod settings;
pub mod shard;
pub mod snapshot;

pub use alias::{parse_aliases, Alias, IndexAliases};
pub use changes::ClusterChanges;
pub use cluster::{Cluster, RawDocuments};
pub use health::ClusterHealth;
pub use index::{is_special, Index, IndexState};
pub use node::{Node, NodeRoles};
pub use repository::Repository;
pub use settings::{allocation_enabled, ClusterSettings};
pub use shard::{Shard, UnassignedShard};
pub use snapshot::{Snapshot, Warmer};
