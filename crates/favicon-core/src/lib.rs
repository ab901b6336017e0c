//! Favicon normalization and content-addressed publishing.
//!
//! Takes arbitrary uploaded image bytes and produces a canonical,
//! cacheable favicon asset: decode (icon containers included), drop
//! blank layers, pick the best survivor, bound it to 32x32, re-encode
//! as PNG, then publish under a content-addressed path in object
//! storage.
//!
//! # Architecture
//!
//! Data flows one direction:
//!
//! ```text
//! bytes -> decode -> select -> normalize --\
//!    \--------------- hash ----------------+--> upload -> URL
//! ```
//!
//! The hash always covers the raw input, never the normalized output,
//! so identical submissions dedupe to one object while distinct sources
//! stay distinct.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use favicon_core::FaviconPipeline;
//! use favicon_store::{PoolConfig, S3Config, S3Store, UploadPool};
//!
//! # async fn run(bytes: Vec<u8>) -> favicon_core::Result<()> {
//! let store = Arc::new(S3Store::new(&S3Config::from_env()?).await?);
//! let uploads = Arc::new(UploadPool::new(store, PoolConfig::default()));
//!
//! let pipeline = FaviconPipeline::new(bytes, "example.com", uploads);
//! if pipeline.is_valid() {
//!     let url = pipeline.favicon_url().await?;
//!     println!("published at {url}");
//! }
//! # Ok(())
//! # }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;

// Re-exports for convenient access
pub use config::NormalizeConfig;
pub use error::{FaviconError, Result};
pub use pipeline::{ContentAddresser, FaviconPipeline, ImageDecoder, LayerSelector, Normalizer};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
