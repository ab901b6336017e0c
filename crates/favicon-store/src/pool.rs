//! Bounded upload concurrency.
//!
//! One pool is constructed at process startup and shared across all
//! pipeline instances. A permit is held for exactly one put and released
//! whether the put succeeds or fails.

use crate::config::PoolConfig;
use crate::error::{StorageError, StorageResult};
use crate::traits::{ObjectLocation, ObjectStore, UploadMetadata};
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Fixed-size pool of upload connections over an [`ObjectStore`].
pub struct UploadPool {
    store: Arc<dyn ObjectStore>,
    permits: Semaphore,
    acquire_timeout: Duration,
}

impl UploadPool {
    /// Create a pool with the given capacity and wait bound.
    pub fn new(store: Arc<dyn ObjectStore>, config: PoolConfig) -> Self {
        Self {
            store,
            permits: Semaphore::new(config.size),
            acquire_timeout: config.acquire_timeout(),
        }
    }

    /// Write an object through one pooled connection.
    ///
    /// Blocks up to the configured wait bound for a free connection and
    /// fails with [`StorageError::PoolTimeout`] when none frees up.
    pub async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        metadata: &UploadMetadata,
    ) -> StorageResult<ObjectLocation> {
        let permit = match tokio::time::timeout(self.acquire_timeout, self.permits.acquire()).await
        {
            Ok(Ok(permit)) => permit,
            Ok(Err(_)) => return Err(StorageError::PoolClosed),
            Err(_) => {
                tracing::warn!(key, waited_ms = self.acquire_timeout.as_millis() as u64, "upload pool exhausted");
                return Err(StorageError::PoolTimeout {
                    waited: self.acquire_timeout,
                });
            }
        };

        let result = self.store.put_object(key, data, metadata).await;
        drop(permit);
        result
    }

    /// Permits not currently held by an upload.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}
