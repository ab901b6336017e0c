//! End-to-end pipeline tests against the in-memory store.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use favicon_core::FaviconPipeline;
use favicon_store::{MemoryStore, PoolConfig, UploadPool};
use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::{DynamicImage, GenericImageView, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::sync::Arc;

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

fn test_store() -> (Arc<MemoryStore>, Arc<UploadPool>) {
    let store = Arc::new(MemoryStore::new("favicons.test"));
    let pool = Arc::new(UploadPool::new(store.clone(), PoolConfig::default()));
    (store, pool)
}

/// A three-layer container where the smallest layer is transparent:
/// the largest opaque layer wins, gets bounded to 32x32 PNG, and is
/// published exactly once under the content-derived path.
#[tokio::test]
async fn test_multi_layer_container_end_to_end() {
    let (store, pool) = test_store();
    let input = ico_bytes(&[
        rgba_layer(16, [0, 0, 0, 0]),
        rgba_layer(32, [200, 40, 40, 255]),
        rgba_layer(64, [40, 200, 40, 255]),
    ]);
    let pipeline = FaviconPipeline::new(input.clone(), "example.com", pool);
    assert!(pipeline.is_valid());

    let url = pipeline.favicon_url().await.unwrap();
    let path = pipeline.storage_path();
    let digest = pipeline.content_hash().to_string();

    // Path layout and URL embed the hash of the original container bytes.
    assert_eq!(path, format!("public-favicons/{}/{}.png", &digest[..4], digest));
    assert_eq!(url, format!("https://favicons.test/{path}"));

    // One upload, holding a 32x32 PNG downscaled from the 64px layer.
    assert_eq!(store.put_count(), 1);
    let stored = store.object(&path).unwrap();
    let published = image::load_from_memory_with_format(&stored.data, ImageFormat::Png).unwrap();
    assert_eq!(published.dimensions(), (32, 32));
    // The surviving layer was the green 64px one, not the red 32px one.
    assert_eq!(published.to_rgba8().get_pixel(0, 0).0, [40, 200, 40, 255]);

    // The inline form matches the published bytes byte for byte.
    let encoded = pipeline.encoded_favicon().await.unwrap();
    assert_eq!(BASE64.decode(encoded).unwrap(), stored.data.as_ref());
    assert_eq!(store.put_count(), 1);
}

#[tokio::test]
async fn test_identical_inputs_dedupe_to_one_object() {
    let (store, pool) = test_store();
    let input = ico_bytes(&[rgba_layer(32, [10, 20, 30, 255])]);

    let first = FaviconPipeline::new(input.clone(), "a.example.com", pool.clone());
    let second = FaviconPipeline::new(input, "b.example.org", pool);

    let url_a = first.favicon_url().await.unwrap();
    let url_b = second.favicon_url().await.unwrap();

    assert_eq!(url_a, url_b);
    assert_eq!(store.len(), 1);
    assert_eq!(store.put_count(), 2);
}

#[tokio::test]
async fn test_undecodable_input_fails_without_publishing() {
    let (store, pool) = test_store();
    let pipeline = FaviconPipeline::new(b"not an image at all".to_vec(), "example.com", pool);

    assert!(pipeline.is_valid());
    assert!(pipeline.favicon_url().await.is_err());
    assert!(pipeline.encoded_favicon().await.is_err());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_upload_original_bypasses_normalization() {
    let (store, pool) = test_store();
    // Raw bytes that are not even an image: upload_original never
    // decodes, so this still publishes.
    let raw = Bytes::from_static(b"\x00\x01\x02\x03 opaque payload");
    let pipeline = FaviconPipeline::new(raw.clone(), "example.com", pool);

    let url = pipeline.upload_original().await.unwrap();
    let stored = store.object(&pipeline.storage_path()).unwrap();
    assert_eq!(stored.data, raw);
    assert_eq!(url, format!("https://favicons.test/{}", pipeline.storage_path()));
}
