//! Proptest generators for property-based testing.

use bytes::Bytes;
use proptest::prelude::*;

use cbor_frame_core::{serialize_encoding_strict, Encoding};

/// Payload lengths at which a byte-string head changes width, and their
/// neighbours.
pub const BOUNDARY_LENGTHS: [usize; 8] = [0, 1, 23, 24, 255, 256, 65535, 65536];

/// Generate payload bytes of at most `max_len`.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate one of the head-width boundary lengths.
pub fn boundary_len() -> impl Strategy<Value = usize> {
    prop::sample::select(BOUNDARY_LENGTHS.to_vec())
}

/// Generate random bytes of a boundary length.
pub fn boundary_payload() -> impl Strategy<Value = Vec<u8>> {
    boundary_len().prop_flat_map(|len| prop::collection::vec(any::<u8>(), len))
}

/// Generate a short text string.
pub fn text() -> impl Strategy<Value = String> {
    "[a-z0-9 ]{0,64}".prop_map(String::from)
}

/// Generate an arbitrary well-formed CBOR encoding.
pub fn encoding() -> impl Strategy<Value = Encoding> {
    let leaf = prop_oneof![
        any::<u64>().prop_map(Encoding::uint),
        any::<i64>().prop_map(Encoding::int),
        payload(300).prop_map(Encoding::bytes),
        text().prop_map(Encoding::text),
        any::<bool>().prop_map(Encoding::bool),
        Just(Encoding::null()),
    ];

    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(|items| {
                let header = Encoding::array_len(items.len() as u64);
                items.into_iter().fold(header, Encoding::then)
            }),
            // tags 2 and 3 are bignums, which decoders treat specially
            (6u64..=1000, inner).prop_map(|(tag, item)| Encoding::tag(tag) + item),
        ]
    })
}

/// Generate the serialized bytes of an arbitrary well-formed CBOR item.
pub fn cbor_blob() -> impl Strategy<Value = Bytes> {
    encoding().prop_map(|e| serialize_encoding_strict(&e))
}
