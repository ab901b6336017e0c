//! Pipeline configuration, injected by the embedding application.

use serde::{Deserialize, Serialize};

/// Output normalization settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Layers wider than this are downscaled to fit within a square of
    /// this edge length, preserving aspect ratio.
    pub max_dimension: u32,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self { max_dimension: 32 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_max_dimension() {
        assert_eq!(NormalizeConfig::default().max_dimension, 32);
    }
}
