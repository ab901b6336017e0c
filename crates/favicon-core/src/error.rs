//! Error types for the favicon pipeline.
//!
//! Each failure stays distinct so callers can decide whether to skip the
//! host, retry later, or surface the error upstream.

use favicon_store::StorageError;
use thiserror::Error;

/// Favicon pipeline errors.
#[derive(Debug, Error)]
pub enum FaviconError {
    /// Input bytes are not interpretable as a raster image, even after
    /// the forced icon-container retry.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// Every decoded layer reduced to a fully transparent pixel.
    #[error("no usable layer: all {layer_count} decoded layers are blank")]
    NoUsableLayer { layer_count: usize },

    /// PNG re-encoding of the selected layer failed.
    #[error("encode error: {message}")]
    Encode { message: String },

    /// Upload failed or no pooled connection became available.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl FaviconError {
    pub(crate) fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Convenience type alias for pipeline results.
pub type Result<T> = std::result::Result<T, FaviconError>;
