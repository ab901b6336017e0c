//! Storage trait definitions and upload contract types.

use crate::error::StorageResult;
use async_trait::async_trait;
use bytes::Bytes;

/// Content type of every published favicon object.
pub const CONTENT_TYPE: &str = "image/png";

/// Ten-year public cache directive.
pub const CACHE_CONTROL: &str = "max-age=315360000, public";

/// Fixed far-future expiry: 2036-06-28T17:48:34Z, as epoch seconds.
pub const EXPIRES_EPOCH_SECS: i64 = 2_098_374_514;

/// Canned ACL applied to every published object.
pub const ACL: &str = "public-read";

/// Storage class applied to every published object.
pub const STORAGE_CLASS: &str = "REDUCED_REDUNDANCY";

/// User-metadata key carrying the originating host.
pub const HOST_METADATA_KEY: &str = "favicon-host";

/// Headers and tags attached to a published favicon object.
///
/// Everything except the originating host is fixed. The values must stay
/// byte-identical across deployments so assets already sitting in caches
/// keep matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadMetadata {
    pub content_type: &'static str,
    pub cache_control: &'static str,
    pub expires_epoch_secs: i64,
    pub acl: &'static str,
    pub storage_class: &'static str,
    /// Originating host, stored as user metadata on the object.
    pub favicon_host: String,
}

impl UploadMetadata {
    /// The fixed favicon upload contract for one originating host.
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            content_type: CONTENT_TYPE,
            cache_control: CACHE_CONTROL,
            expires_epoch_secs: EXPIRES_EPOCH_SECS,
            acl: ACL,
            storage_class: STORAGE_CLASS,
            favicon_host: host.into(),
        }
    }
}

/// Where a store placed an object, as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    /// Host serving the object.
    pub host: String,
    /// Path of the object under that host, without a leading slash.
    pub path: String,
}

impl ObjectLocation {
    /// Public HTTPS URL for the stored object.
    pub fn url(&self) -> String {
        format!("https://{}/{}", self.host, self.path.trim_start_matches('/'))
    }
}

/// Object store abstraction for published favicons.
///
/// Writes are idempotent from the caller's point of view: keys are
/// content-derived, so repeated puts of the same bytes land on the same
/// key and last-write-wins at the storage layer.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Write an object and report where it landed.
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        metadata: &UploadMetadata,
    ) -> StorageResult<ObjectLocation>;
}
