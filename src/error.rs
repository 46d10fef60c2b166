use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClusterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing document: {0}")]
    MissingDocument(&'static str),

    #[error("Invalid {document} document: missing or malformed '{path}'")]
    InvalidDocument {
        document: &'static str,
        path: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Stale poll result: generation {generation} superseded by {latest}")]
    Stale { generation: u64, latest: u64 },
}

impl ClusterError {
    pub(crate) fn invalid(document: &'static str, path: impl Into<String>) -> Self {
        ClusterError::InvalidDocument {
            document,
            path: path.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClusterError>;
