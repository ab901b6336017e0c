//! Layer filtering and selection.

use image::imageops::FilterType;
use image::DynamicImage;

use crate::error::{FaviconError, Result};

/// Picks the layer worth publishing out of a decoded layer set.
pub struct LayerSelector;

impl LayerSelector {
    /// Drop blank layers and keep the last survivor.
    ///
    /// Icon containers order layers smallest to largest, so the last
    /// usable layer is the highest-resolution one. Fails when every
    /// layer is blank; a blank favicon is never published.
    pub fn select(layers: Vec<DynamicImage>) -> Result<DynamicImage> {
        let layer_count = layers.len();
        let mut usable: Vec<DynamicImage> = layers
            .into_iter()
            .filter(|layer| !Self::is_blank(layer))
            .collect();
        usable
            .pop()
            .ok_or(FaviconError::NoUsableLayer { layer_count })
    }

    /// A layer is blank when its 1x1 reduction is fully transparent.
    fn is_blank(layer: &DynamicImage) -> bool {
        let probe = layer.resize_exact(1, 1, FilterType::Triangle);
        probe.to_rgba8().get_pixel(0, 0)[3] == 0
    }
}
