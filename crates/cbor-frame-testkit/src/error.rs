//! Error types for frame inspection.

use cbor_frame_core::Crc32;
use thiserror::Error;

/// Errors raised while opening framed bytes.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("decoding error: {0}")]
    DecodingError(String),

    #[error("{0} trailing bytes after the item")]
    TrailingBytes(usize),

    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    #[error("checksum mismatch: envelope carries {expected}, body hashes to {actual}")]
    ChecksumMismatch { expected: Crc32, actual: Crc32 },
}

/// Result type for inspection.
pub type Result<T> = std::result::Result<T, InspectError>;
