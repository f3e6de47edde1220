//! # cbor-frame testkit
//!
//! Testing utilities for cbor-frame.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Inspection**: a `ciborium`-backed decoder that opens data items and
//!   CRC envelopes, so tests can check framing against an independent
//!   implementation
//! - **Golden vectors**: known payloads with their expected framed bytes
//! - **Generators**: Proptest strategies for property-based testing
//!
//! ## Golden Vectors
//!
//! ```rust
//! use cbor_frame_testkit::vectors::{all_vectors, verify_all_vectors};
//!
//! for (name, ok) in verify_all_vectors() {
//!     assert!(ok, "{name}");
//! }
//! assert!(!all_vectors().is_empty());
//! ```
//!
//! ## Inspection
//!
//! ```rust
//! use cbor_frame::{encode_crc_protected, serialize_encoding_strict};
//! use cbor_frame_testkit::inspect::open_crc_envelope;
//!
//! let framed = serialize_encoding_strict(&encode_crc_protected(&42u64));
//! let (body, _crc) = open_crc_envelope(&framed).unwrap();
//! assert_eq!(body, vec![0x18, 0x2a]);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use cbor_frame_testkit::generators::cbor_blob;
//!
//! proptest! {
//!     #[test]
//!     fn wraps_any_blob(blob in cbor_blob()) {
//!         // ...
//!     }
//! }
//! ```

pub mod error;
pub mod generators;
pub mod inspect;
pub mod vectors;

pub use error::{InspectError, Result};
pub use generators::{boundary_len, boundary_payload, cbor_blob, payload};
pub use inspect::{decode_value, open_crc_envelope, unwrap_data_item};
pub use vectors::{all_vectors, records_json, verify_all_vectors, GoldenRecord, GoldenVector};
