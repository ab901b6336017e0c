//! In-memory object store.
//!
//! Used as the storage substitute in tests and by embedders that want the
//! pipeline without a real object store behind it. Last write wins, like
//! the real backends.

use crate::error::StorageResult;
use crate::traits::{ObjectLocation, ObjectStore, UploadMetadata};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// One stored object.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Bytes,
    pub metadata: UploadMetadata,
}

/// Object store over a process-local map.
pub struct MemoryStore {
    host: String,
    objects: Mutex<HashMap<String, StoredObject>>,
    puts: AtomicUsize,
}

impl MemoryStore {
    /// Create a store that reports the given host in object locations.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            objects: Mutex::new(HashMap::new()),
            puts: AtomicUsize::new(0),
        }
    }

    /// Fetch a stored object by key.
    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    /// Number of distinct keys currently stored.
    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.lock().unwrap().is_empty()
    }

    /// Total puts performed, including overwrites of existing keys.
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        metadata: &UploadMetadata,
    ) -> StorageResult<ObjectLocation> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                data,
                metadata: metadata.clone(),
            },
        );
        tracing::trace!(backend = "memory", key, "stored object");
        Ok(ObjectLocation {
            host: self.host.clone(),
            path: key.to_string(),
        })
    }
}
