//! # cbor-frame
//!
//! Framing for pre-encoded CBOR, with size expressions that predict the
//! framed length without encoding anything.
//!
//! ## Overview
//!
//! - **Data items**: an opaque CBOR blob wrapped as tag 24 around a byte
//!   string, so an outer decoder can skip it without interpreting it.
//!   See [`data_item`].
//! - **CRC-protected envelopes**: `[data item of body, crc32(body)]`, so a
//!   receiver can detect corruption before decoding the body. See [`crc`].
//!
//! Each encoder has a size expression that is exact for any payload length:
//!
//! ```rust
//! use cbor_frame::{
//!     encode_unknown_cbor_data_item, serialize_encoding_strict,
//!     unknown_cbor_data_item_size_expr, Size,
//! };
//!
//! let blob = vec![0x40u8; 256];
//! let framed = serialize_encoding_strict(&encode_unknown_cbor_data_item(blob));
//!
//! let predicted = unknown_cbor_data_item_size_expr(Size::fixed(256));
//! assert_eq!(predicted.evaluate(), Ok(framed.len() as u64));
//! ```
//!
//! ## Re-exports
//!
//! - `cbor_frame::core` - Encodings, sizes and serialization entry points

pub mod crc;
pub mod data_item;

// Re-export component crates
pub use cbor_frame_core as core;

pub use crc::{
    encode_crc_protected, encoded_crc_protected_size_expr,
    encoded_crc_protected_size_expr_with, CrcProtected,
};
pub use data_item::{
    encode_known_cbor_data_item, encode_nested_cbor, encode_nested_cbor_bytes,
    encode_unknown_cbor_data_item, known_cbor_data_item_size_expr,
    unknown_cbor_data_item_size_expr, Nested, ENCODED_CBOR_DATA_ITEM_TAG,
};

// Re-export commonly used core types
pub use cbor_frame_core::{
    serialize, serialize_builder, serialize_encoding, serialize_encoding_strict,
    serialize_encoding_with, serialize_strict, serialize_with, Builder, ChunkConfig, ChunkedBytes, Crc32, Encodable,
    Encoding, Size, SizeError, Witness,
};
