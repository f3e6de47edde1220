//! Buffering configuration for chunked serialization.

use serde::{Deserialize, Serialize};

/// Default size of the first output chunk.
pub const DEFAULT_FIRST_CHUNK_SIZE: usize = 1024;

/// Default size of every chunk after the first.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Chunk sizes used by [`serialize_with`](crate::serialize_with).
///
/// A small first chunk keeps small payloads cheap; larger follow-up chunks
/// amortize allocation for big ones. The bytes produced never depend on
/// these values.
///
/// Both sizes are at least one byte, however the config was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawChunkConfig")]
pub struct ChunkConfig {
    first_chunk_size: usize,
    chunk_size: usize,
}

impl ChunkConfig {
    /// Create a config; zero sizes are raised to one byte.
    pub fn new(first_chunk_size: usize, chunk_size: usize) -> Self {
        Self {
            first_chunk_size: first_chunk_size.max(1),
            chunk_size: chunk_size.max(1),
        }
    }

    /// Capacity of the first chunk.
    pub fn first_chunk_size(&self) -> usize {
        self.first_chunk_size
    }

    /// Capacity of each following chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FIRST_CHUNK_SIZE, DEFAULT_CHUNK_SIZE)
    }
}

/// Deserialized form, before clamping. Missing fields take the defaults.
#[derive(Deserialize)]
#[serde(default)]
struct RawChunkConfig {
    first_chunk_size: usize,
    chunk_size: usize,
}

impl Default for RawChunkConfig {
    fn default() -> Self {
        Self {
            first_chunk_size: DEFAULT_FIRST_CHUNK_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl From<RawChunkConfig> for ChunkConfig {
    fn from(raw: RawChunkConfig) -> Self {
        Self::new(raw.first_chunk_size, raw.chunk_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sizes() {
        let config = ChunkConfig::default();
        assert_eq!(config.first_chunk_size(), 1024);
        assert_eq!(config.chunk_size(), 4096);
    }

    #[test]
    fn test_new_clamps_zero() {
        let config = ChunkConfig::new(0, 0);
        assert_eq!(config, ChunkConfig::new(1, 1));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ChunkConfig = serde_json::from_str(r#"{"chunk_size": 512}"#).unwrap();
        assert_eq!(config.first_chunk_size(), DEFAULT_FIRST_CHUNK_SIZE);
        assert_eq!(config.chunk_size(), 512);
    }

    #[test]
    fn test_deserialized_zero_is_clamped() {
        let config: ChunkConfig = serde_json::from_str(r#"{"chunk_size": 0}"#).unwrap();
        assert_eq!(config.chunk_size(), 1);
        assert_eq!(config.first_chunk_size(), DEFAULT_FIRST_CHUNK_SIZE);
    }

    #[test]
    fn test_serialized_form_roundtrips() {
        let config = ChunkConfig::new(64, 256);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"first_chunk_size":64,"chunk_size":256}"#);
        assert_eq!(serde_json::from_str::<ChunkConfig>(&json).unwrap(), config);
    }
}
