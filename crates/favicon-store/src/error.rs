//! Storage error types.

use std::time::Duration;
use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The object store rejected or failed the write. Not retried here;
    /// callers decide whether to try again later.
    #[error("upload failed: {0}")]
    Upload(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// No upload connection became available within the wait bound.
    #[error("no upload connection available after {waited:?}")]
    PoolTimeout { waited: Duration },

    /// The upload pool was shut down while a caller was waiting.
    #[error("upload pool closed")]
    PoolClosed,

    #[error("configuration error: {0}")]
    Config(String),
}

impl StorageError {
    pub(crate) fn upload(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Upload(Box::new(err))
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
