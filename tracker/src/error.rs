use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path}: invalid json: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{path}: {reason}")]
    InvalidRoster { path: PathBuf, reason: String },
}

/// Failures that abort a run before anything is written.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("player roster {0} not found")]
    MissingRoster(PathBuf),
    #[error("player roster {0} is empty")]
    EmptyRoster(PathBuf),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
