pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod json;
pub mod model;
pub mod observability;
pub mod paging;
pub mod poller;
pub mod reconcile;
pub mod source;
pub mod store;

pub use config::Config;
pub use error::{ClusterError, Result};
pub use model::{Cluster, ClusterChanges, RawDocuments};
pub use poller::Poller;
pub use source::{ClusterSource, FileSource};
