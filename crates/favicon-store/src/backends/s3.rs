//! S3-compatible object store using the AWS SDK.

use crate::config::S3Config;
use crate::error::{StorageError, StorageResult};
use crate::traits::{ObjectLocation, ObjectStore, UploadMetadata, HOST_METADATA_KEY};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::primitives::DateTime;
use aws_sdk_s3::types::{ObjectCannedAcl, StorageClass};
use aws_sdk_s3::Client;
use bytes::Bytes;
use tracing::instrument;

/// S3 object store.
///
/// Credentials and bucket are read once at construction; the SDK client
/// keeps its own connection pool for the life of the process.
pub struct S3Store {
    client: Client,
    bucket: String,
    /// Host reported in object locations.
    public_host: String,
    /// Custom endpoints serve buckets path-style, so the bucket becomes
    /// the first path segment instead of a host label.
    path_style: bool,
}

impl std::fmt::Debug for S3Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Store")
            .field("bucket", &self.bucket)
            .field("public_host", &self.public_host)
            .finish_non_exhaustive()
    }
}

impl S3Store {
    /// Create a store from injected configuration.
    pub async fn new(config: &S3Config) -> StorageResult<Self> {
        if config.bucket.is_empty() {
            return Err(StorageError::Config("s3 bucket name is empty".to_string()));
        }
        let has_key_id = config.access_key_id.is_some();
        let has_secret = config.secret_access_key.is_some();
        if has_key_id ^ has_secret {
            return Err(StorageError::Config(
                "s3 config requires both access_key_id and secret_access_key when either is set"
                    .to_string(),
            ));
        }

        let region = if config.region.is_empty() {
            "us-east-1".to_string()
        } else {
            config.region.clone()
        };

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region.clone()));
        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            let credentials = aws_sdk_s3::config::Credentials::new(
                key_id.clone(),
                secret.clone(),
                None, // session token
                None, // expiration
                "favicon-store-config",
            );
            loader = loader.credentials_provider(credentials);
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        let endpoint = config.endpoint.as_deref().map(normalize_endpoint);
        if let Some(endpoint_url) = &endpoint {
            builder = builder.endpoint_url(endpoint_url).force_path_style(true);
        }
        let client = Client::from_conf(builder.build());

        let (public_host, path_style) = match &endpoint {
            Some(endpoint_url) => (endpoint_host(endpoint_url), true),
            None => (format!("{}.s3.{}.amazonaws.com", config.bucket, region), false),
        };

        Ok(Self {
            client,
            bucket: config.bucket.clone(),
            public_host,
            path_style,
        })
    }

    fn location(&self, key: &str) -> ObjectLocation {
        let path = if self.path_style {
            format!("{}/{}", self.bucket, key)
        } else {
            key.to_string()
        };
        ObjectLocation {
            host: self.public_host.clone(),
            path,
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    #[instrument(skip(self, data, metadata), fields(backend = "s3", size = data.len()))]
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        metadata: &UploadMetadata,
    ) -> StorageResult<ObjectLocation> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(data.into())
            .content_type(metadata.content_type)
            .cache_control(metadata.cache_control)
            .expires(DateTime::from_secs(metadata.expires_epoch_secs))
            .acl(ObjectCannedAcl::from(metadata.acl))
            .storage_class(StorageClass::from(metadata.storage_class))
            .metadata(HOST_METADATA_KEY, &metadata.favicon_host)
            .send()
            .await
            .map_err(StorageError::upload)?;

        Ok(self.location(key))
    }
}

/// Accept bare `host:port` endpoints by assuming plain HTTP, the common
/// local-MinIO shape.
fn normalize_endpoint(endpoint: &str) -> String {
    let lower = endpoint.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        endpoint.trim_end_matches('/').to_string()
    } else {
        format!("http://{}", endpoint.trim_end_matches('/'))
    }
}

/// Authority part of a normalized endpoint URL.
fn endpoint_host(endpoint: &str) -> String {
    endpoint
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
        .to_string()
}
