//! Output normalization: bounded dimensions, canonical PNG encoding.

use bytes::Bytes;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

use crate::config::NormalizeConfig;
use crate::error::{FaviconError, Result};

/// Normalizes a selected layer into the published byte form.
pub struct Normalizer {
    config: NormalizeConfig,
}

impl Normalizer {
    /// Create a normalizer with the given configuration.
    pub fn new(config: NormalizeConfig) -> Self {
        Self { config }
    }

    /// Downscale an oversized layer and re-encode it as PNG.
    ///
    /// Layers wider than the configured maximum are resized to fit
    /// within a square of that edge, preserving aspect ratio; narrower
    /// layers keep their native resolution. The layer is consumed, so
    /// its pixel buffer is released once encoding finishes.
    pub fn normalize(&self, layer: DynamicImage) -> Result<Bytes> {
        let max = self.config.max_dimension;
        let layer = if layer.width() > max {
            layer.thumbnail(max, max)
        } else {
            layer
        };

        let mut buffer = Cursor::new(Vec::new());
        layer
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| FaviconError::Encode {
                message: e.to_string(),
            })?;
        Ok(Bytes::from(buffer.into_inner()))
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizeConfig::default())
    }
}
