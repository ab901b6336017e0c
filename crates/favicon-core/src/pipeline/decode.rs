//! Image decoding with icon-container support and a forced-format fallback.
//!
//! Favicons arrive as whatever bytes a site served: single raster images
//! or ICO/CUR containers bundling several resolutions. The decoder
//! produces the full ordered layer sequence either way.

use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

use crate::error::{FaviconError, Result};

const ICONDIR_HEADER_LEN: usize = 6;
const ICONDIR_ENTRY_LEN: usize = 16;

/// Decodes raw favicon bytes into an ordered sequence of raster layers.
pub struct ImageDecoder;

impl ImageDecoder {
    /// Decode bytes into layers.
    ///
    /// Tries format inference first; on failure, retries once forcing
    /// icon-container interpretation. No further fallbacks.
    pub fn decode(bytes: &[u8]) -> Result<Vec<DynamicImage>> {
        match Self::decode_auto(bytes) {
            Ok(layers) => Ok(layers),
            Err(primary) => {
                tracing::trace!("format inference failed, forcing icon-container decode");
                Self::decode_container(bytes).map_err(|_| primary)
            }
        }
    }

    /// Decode using the inferred format. Icon containers yield every
    /// directory entry as a layer, in directory order; anything else
    /// yields a single layer.
    fn decode_auto(bytes: &[u8]) -> Result<Vec<DynamicImage>> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| FaviconError::decode(format!("cannot sniff image format: {e}")))?;
        match reader.format() {
            Some(ImageFormat::Ico) => Self::decode_container(bytes),
            Some(_) => {
                let image = reader
                    .decode()
                    .map_err(|e| FaviconError::decode(e.to_string()))?;
                Ok(vec![image])
            }
            None => Err(FaviconError::decode("unrecognized image format")),
        }
    }

    /// Decode bytes as an ICONDIR container, all entries.
    ///
    /// The `image` ico codec decodes only the entry it judges best, so
    /// the directory is walked here and each entry is handed to the
    /// codec separately. Any malformed entry fails the whole container.
    fn decode_container(bytes: &[u8]) -> Result<Vec<DynamicImage>> {
        if bytes.len() < ICONDIR_HEADER_LEN {
            return Err(FaviconError::decode("icon container too small"));
        }
        let reserved = u16::from_le_bytes([bytes[0], bytes[1]]);
        let kind = u16::from_le_bytes([bytes[2], bytes[3]]);
        if reserved != 0 || (kind != 1 && kind != 2) {
            return Err(FaviconError::decode("not an icon container"));
        }
        let count = u16::from_le_bytes([bytes[4], bytes[5]]) as usize;
        if count == 0 {
            return Err(FaviconError::decode("icon container holds no images"));
        }

        let mut layers = Vec::with_capacity(count);
        for index in 0..count {
            let dir_offset = ICONDIR_HEADER_LEN + index * ICONDIR_ENTRY_LEN;
            let entry = bytes
                .get(dir_offset..dir_offset + ICONDIR_ENTRY_LEN)
                .ok_or_else(|| FaviconError::decode("truncated icon directory"))?;
            let size = u32::from_le_bytes([entry[8], entry[9], entry[10], entry[11]]) as usize;
            let offset = u32::from_le_bytes([entry[12], entry[13], entry[14], entry[15]]) as usize;
            let payload = offset
                .checked_add(size)
                .and_then(|end| bytes.get(offset..end))
                .ok_or_else(|| {
                    FaviconError::decode(format!("icon entry {index} is out of bounds"))
                })?;
            layers.push(Self::decode_entry(entry, payload, index)?);
        }
        Ok(layers)
    }

    /// Decode one directory entry by rebuilding it as a single-image
    /// container, so the ico codec handles both PNG and DIB payloads
    /// (including the AND mask).
    fn decode_entry(entry: &[u8], payload: &[u8], index: usize) -> Result<DynamicImage> {
        let payload_offset = (ICONDIR_HEADER_LEN + ICONDIR_ENTRY_LEN) as u32;
        let mut single =
            Vec::with_capacity(ICONDIR_HEADER_LEN + ICONDIR_ENTRY_LEN + payload.len());
        single.extend_from_slice(&0u16.to_le_bytes());
        single.extend_from_slice(&1u16.to_le_bytes());
        single.extend_from_slice(&1u16.to_le_bytes());
        single.extend_from_slice(&entry[..12]);
        single.extend_from_slice(&payload_offset.to_le_bytes());
        single.extend_from_slice(payload);

        image::load_from_memory_with_format(&single, ImageFormat::Ico)
            .map_err(|e| FaviconError::decode(format!("icon entry {index}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::ico::{IcoEncoder, IcoFrame};
    use image::{GenericImageView, Rgba, RgbaImage};

    fn rgba_layer(size: u32, pixel: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(size, size, Rgba(pixel)))
    }

    fn ico_bytes(layers: &[DynamicImage]) -> Vec<u8> {
        let frames: Vec<IcoFrame> = layers
            .iter()
            .map(|layer| {
                IcoFrame::as_png(
                    layer.as_bytes(),
                    layer.width(),
                    layer.height(),
                    layer.color().into(),
                )
                .unwrap()
            })
            .collect();
        let mut out = Vec::new();
        IcoEncoder::new(Cursor::new(&mut out))
            .encode_images(&frames)
            .unwrap();
        out
    }

    fn png_bytes(layer: &DynamicImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        layer.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_plain_png_single_layer() {
        let bytes = png_bytes(&rgba_layer(16, [255, 0, 0, 255]));
        let layers = ImageDecoder::decode(&bytes).unwrap();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].dimensions(), (16, 16));
    }

    #[test]
    fn test_decode_container_yields_all_layers_in_order() {
        let bytes = ico_bytes(&[
            rgba_layer(16, [255, 0, 0, 255]),
            rgba_layer(32, [0, 255, 0, 255]),
            rgba_layer(64, [0, 0, 255, 255]),
        ]);
        let layers = ImageDecoder::decode(&bytes).unwrap();
        assert_eq!(layers.len(), 3);
        assert_eq!(layers[0].dimensions(), (16, 16));
        assert_eq!(layers[1].dimensions(), (32, 32));
        assert_eq!(layers[2].dimensions(), (64, 64));
    }

    #[test]
    fn test_decode_forced_container_after_failed_inference() {
        // A CUR-typed container is not sniffed as any known format, so
        // only the forced icon-container pass can decode it.
        let mut bytes = ico_bytes(&[rgba_layer(16, [9, 9, 9, 255])]);
        bytes[2] = 2;
        let layers = ImageDecoder::decode(&bytes).unwrap();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].dimensions(), (16, 16));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = ImageDecoder::decode(&[0xde, 0xad, 0xbe, 0xef, 0, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, FaviconError::Decode { .. }), "got {err}");
    }

    #[test]
    fn test_decode_truncated_container_fails() {
        let mut bytes = ico_bytes(&[rgba_layer(16, [1, 2, 3, 255])]);
        bytes.truncate(bytes.len() / 2);
        let err = ImageDecoder::decode(&bytes).unwrap_err();
        assert!(matches!(err, FaviconError::Decode { .. }), "got {err}");
    }

    #[test]
    fn test_decode_empty_input_fails() {
        let err = ImageDecoder::decode(&[]).unwrap_err();
        assert!(matches!(err, FaviconError::Decode { .. }), "got {err}");
    }
}
