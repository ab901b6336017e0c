//! Object storage for published favicons.
//!
//! Defines the [`ObjectStore`] trait the pipeline uploads through, the
//! fixed upload metadata contract, an S3 backend, an in-memory backend
//! for tests and embedders without real storage, and a bounded
//! [`UploadPool`] shared process-wide.

pub mod backends;
pub mod config;
pub mod error;
pub mod pool;
pub mod traits;

// Re-exports for convenient access
pub use backends::{MemoryStore, S3Store};
pub use config::{PoolConfig, S3Config};
pub use error::{StorageError, StorageResult};
pub use pool::UploadPool;
pub use traits::{ObjectLocation, ObjectStore, UploadMetadata};
