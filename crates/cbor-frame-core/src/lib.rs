//! # cbor-frame core
//!
//! Pure primitives for deterministic CBOR encoding and size prediction.
//!
//! This crate contains no I/O. It describes bytes to write ([`Encoding`]),
//! writes them ([`serialize`] and friends), and predicts how many there will
//! be without writing them ([`Size`]).
//!
//! ## Key Types
//!
//! - [`Encoding`] - An immutable, composable sequence of CBOR write tokens
//! - [`Size`] - A fixed byte count, or one that depends on a magnitude
//! - [`Encodable`] - Values that can describe their own encoding and size
//! - [`Witness`] - A type-only stand-in used during size estimation
//! - [`Crc32`] - The checksum used by protected envelopes
//!
//! ## Dual track
//!
//! Every [`Encodable`] type answers two questions independently: "what are
//! my bytes" ([`Encodable::to_encoding`]) and "how many bytes will that be"
//! ([`Encodable::size_expr`]). Both sides share the head width rule in
//! [`head`], so they cannot drift apart.

pub mod checksum;
pub mod config;
pub mod encodable;
pub mod encoding;
pub mod error;
pub mod head;
pub mod serialize;
pub mod size;

pub use checksum::{exemplar_checksum_size, Crc32};
pub use config::ChunkConfig;
pub use encodable::{Encodable, PreEncoded, Witness};
pub use encoding::{Encoding, Token};
pub use error::{Result, SizeError};
pub use head::{head_size, Head, Major};
pub use serialize::{
    serialize, serialize_builder, serialize_encoding, serialize_encoding_strict,
    serialize_encoding_with, serialize_strict, serialize_with, Builder, ChunkedBytes,
};
pub use size::Size;
