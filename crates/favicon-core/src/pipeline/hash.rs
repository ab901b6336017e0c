//! Content addressing: hash of the raw input and the derived storage path.

use blake3::Hasher as Blake3Hasher;

/// Root prefix every published favicon lives under.
pub const PATH_ROOT: &str = "public-favicons";

/// Hex characters of the digest used as the shard segment.
const SHARD_LEN: usize = 4;

/// Derives stable storage identities from raw input bytes.
pub struct ContentAddresser;

impl ContentAddresser {
    /// BLAKE3 hex digest of the raw input bytes.
    ///
    /// The hash covers the original, undecoded input: two different
    /// sources that happen to normalize to identical pixels still get
    /// distinct storage keys.
    pub fn content_hash(data: &[u8]) -> String {
        let mut hasher = Blake3Hasher::new();
        hasher.update(data);
        hasher.finalize().to_hex().to_string()
    }

    /// `public-favicons/<digest[0..4]>/<digest>.png`.
    ///
    /// The shard segment keeps any one prefix from accumulating too
    /// many objects.
    pub fn storage_path(digest: &str) -> String {
        format!("{PATH_ROOT}/{}/{digest}.png", &digest[..SHARD_LEN])
    }
}
