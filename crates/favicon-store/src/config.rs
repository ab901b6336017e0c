//! Storage configuration, injected by the embedding application.

use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// S3 connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct S3Config {
    /// Target bucket.
    pub bucket: String,

    /// AWS region; defaults to us-east-1 when unset in the environment.
    pub region: String,

    /// Endpoint override for S3-compatible services (MinIO etc.).
    /// Leave unset for real AWS.
    pub endpoint: Option<String>,

    /// Explicit credentials. When unset, the ambient AWS credential
    /// chain is used.
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl S3Config {
    /// Read the deployment environment: `AWS_S3_BUCKET`, `AWS_REGION`,
    /// `AWS_S3_ENDPOINT` and the standard credential variables.
    pub fn from_env() -> Result<Self, StorageError> {
        let bucket = std::env::var("AWS_S3_BUCKET")
            .map_err(|_| StorageError::Config("AWS_S3_BUCKET is not set".to_string()))?;
        Ok(Self {
            bucket,
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            endpoint: std::env::var("AWS_S3_ENDPOINT").ok(),
            access_key_id: std::env::var("AWS_ACCESS_KEY_ID").ok(),
            secret_access_key: std::env::var("AWS_SECRET_ACCESS_KEY").ok(),
        })
    }
}

/// Upload pool settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum concurrent uploads across the process.
    pub size: usize,

    /// How long a caller waits for a free connection before failing.
    pub acquire_timeout_ms: u64,
}

impl PoolConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            size: 10,
            acquire_timeout_ms: 5_000,
        }
    }
}
