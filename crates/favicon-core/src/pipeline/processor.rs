//! Pipeline orchestration - wires decode, selection, normalization,
//! content addressing and upload around one input.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use std::sync::{Arc, OnceLock};
use tokio::sync::OnceCell;

use favicon_store::{UploadMetadata, UploadPool};

use crate::config::NormalizeConfig;
use crate::error::Result;

use super::decode::ImageDecoder;
use super::hash::ContentAddresser;
use super::normalize::Normalizer;
use super::select::LayerSelector;

/// One favicon publication: raw uploaded bytes plus the host they came
/// from, with every derived value computed at most once.
///
/// Instances are cheap and single-use; the upload pool behind them is
/// shared process-wide.
pub struct FaviconPipeline {
    data: Bytes,
    host: String,
    uploads: Arc<UploadPool>,
    normalizer: Normalizer,
    normalized: OnceCell<Bytes>,
    encoded: OnceCell<String>,
    favicon_url: OnceCell<String>,
    content_hash: OnceLock<String>,
}

impl FaviconPipeline {
    /// Create a pipeline with default normalization settings.
    pub fn new(data: impl Into<Bytes>, host: impl Into<String>, uploads: Arc<UploadPool>) -> Self {
        Self::with_config(data, host, uploads, NormalizeConfig::default())
    }

    /// Create a pipeline with custom normalization settings.
    pub fn with_config(
        data: impl Into<Bytes>,
        host: impl Into<String>,
        uploads: Arc<UploadPool>,
        config: NormalizeConfig,
    ) -> Self {
        Self {
            data: data.into(),
            host: host.into(),
            uploads,
            normalizer: Normalizer::new(config),
            normalized: OnceCell::new(),
            encoded: OnceCell::new(),
            favicon_url: OnceCell::new(),
            content_hash: OnceLock::new(),
        }
    }

    /// True when the caller actually supplied bytes.
    pub fn is_valid(&self) -> bool {
        !self.data.is_empty()
    }

    /// The raw input bytes.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// The originating host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Hex digest of the raw input bytes, computed once.
    pub fn content_hash(&self) -> &str {
        self.content_hash
            .get_or_init(|| ContentAddresser::content_hash(&self.data))
    }

    /// Content-addressed object key for this input.
    pub fn storage_path(&self) -> String {
        ContentAddresser::storage_path(self.content_hash())
    }

    /// Normalize the favicon (once) and publish it, returning the
    /// public URL.
    ///
    /// The storage key derives from the hash of the original input, not
    /// the normalized output, so re-submissions of the same source land
    /// on the same object.
    pub async fn favicon_url(&self) -> Result<String> {
        self.favicon_url
            .get_or_try_init(|| async {
                let normalized = self.normalized().await?;
                self.upload(self.storage_path(), normalized).await
            })
            .await
            .cloned()
    }

    /// The normalized favicon as unwrapped base64. Never touches
    /// storage.
    pub async fn encoded_favicon(&self) -> Result<String> {
        self.encoded
            .get_or_try_init(|| async {
                let normalized = self.normalized().await?;
                Ok(BASE64.encode(&normalized))
            })
            .await
            .cloned()
    }

    /// Publish the raw input bytes as-is under their own content path,
    /// skipping decode and normalization.
    ///
    /// For callers that already hold a suitable image and only need
    /// storage and addressing. Not memoized; the content-derived key
    /// makes repeat calls idempotent at the storage layer.
    pub async fn upload_original(&self) -> Result<String> {
        self.upload(self.storage_path(), self.data.clone()).await
    }

    async fn upload(&self, path: String, data: Bytes) -> Result<String> {
        let metadata = UploadMetadata::for_host(&self.host);
        let location = self.uploads.put_object(&path, data, &metadata).await?;
        tracing::debug!(host = %self.host, path = %path, "published favicon");
        Ok(location.url())
    }

    /// Decode, select and normalize, at most once per instance.
    async fn normalized(&self) -> Result<Bytes> {
        self.normalized
            .get_or_try_init(|| async {
                let start = std::time::Instant::now();
                let layers = ImageDecoder::decode(&self.data)?;
                tracing::trace!(layers = layers.len(), "decoded input");
                let selected = LayerSelector::select(layers)?;
                let bytes = self.normalizer.normalize(selected)?;
                tracing::debug!(
                    host = %self.host,
                    size = bytes.len(),
                    "normalized favicon in {:?}",
                    start.elapsed()
                );
                Ok(bytes)
            })
            .await
            .cloned()
    }
}
