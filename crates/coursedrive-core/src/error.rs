//! Error types for core operations.

use thiserror::Error;

/// Result type for local store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a [`KeyValueStore`](crate::store::KeyValueStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded for storage.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key cannot be mapped onto the backing storage.
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
}

/// Errors raised while turning user input into a folder id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FolderRefError {
    /// Nothing was provided.
    #[error("folder reference is empty")]
    Empty,

    /// A Drive URL was provided but no folder id could be found in it.
    #[error("no folder id found in {0}")]
    MissingId(String),

    /// The extracted id contains characters Drive ids never use.
    #[error("invalid folder id: {0}")]
    InvalidId(String),
}
