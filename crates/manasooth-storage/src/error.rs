use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

use manasooth_instruments::error::GoalError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("key not found: {key}")]
    NotFound { key: String },

    #[error("invalid storage key: {key:?}")]
    InvalidKey { key: String },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("goal not found: {0}")]
    GoalNotFound(Uuid),

    #[error(transparent)]
    Goal(#[from] GoalError),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}
