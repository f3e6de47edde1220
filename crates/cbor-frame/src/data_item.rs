//! Nested CBOR data items (RFC 8949 §3.4.5.1).
//!
//! A data item is tag 24 followed by a byte string holding another complete
//! CBOR encoding:
//!
//! ```text
//! d8 18            tag(24)
//! 4x / 58 xx / ..  bytes(len)
//! ...              the nested encoding
//! ```
//!
//! The "unknown" functions take bytes that are already encoded; the "known"
//! ones take an [`Encodable`] and serialize it first. Both produce the same
//! wire shape and share one size formula.

use bytes::Bytes;

use cbor_frame_core::{
    head_size, serialize_strict, Encodable, Encoding, Size, Witness,
};

/// Semantic tag for "encoded CBOR data item".
pub const ENCODED_CBOR_DATA_ITEM_TAG: u64 = 24;

/// Wrap already-encoded bytes as a tagged data item.
///
/// `bytes` must itself be valid CBOR. This is not checked: invalid input
/// yields a well-formed wrapper around garbage, which only a downstream
/// decoder will notice.
pub fn encode_unknown_cbor_data_item(bytes: impl Into<Bytes>) -> Encoding {
    Encoding::tag(ENCODED_CBOR_DATA_ITEM_TAG) + Encoding::bytes(bytes)
}

/// Serialize `value` and wrap the result as a tagged data item.
pub fn encode_known_cbor_data_item<T: Encodable + ?Sized>(value: &T) -> Encoding {
    encode_unknown_cbor_data_item(serialize_strict(value))
}

/// Alias of [`encode_known_cbor_data_item`].
pub fn encode_nested_cbor<T: Encodable + ?Sized>(value: &T) -> Encoding {
    encode_known_cbor_data_item(value)
}

/// Alias of [`encode_unknown_cbor_data_item`].
pub fn encode_nested_cbor_bytes(bytes: impl Into<Bytes>) -> Encoding {
    encode_unknown_cbor_data_item(bytes)
}

/// Size of a data item wrapping `inner` bytes.
///
/// `2 + head_size(inner) + inner`: the tag-24 head takes two bytes, then
/// the byte-string head, then the payload itself.
pub fn unknown_cbor_data_item_size_expr(inner: Size) -> Size {
    Size::fixed(head_size(ENCODED_CBOR_DATA_ITEM_TAG)) + Size::head_of(inner.clone()) + inner
}

/// Size of a data item wrapping a value whose encoding is `inner` bytes.
///
/// Identical to [`unknown_cbor_data_item_size_expr`]; the wire shape does
/// not depend on how the caller obtained the payload.
pub fn known_cbor_data_item_size_expr(inner: Size) -> Size {
    unknown_cbor_data_item_size_expr(inner)
}

/// A value that encodes as a nested data item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nested<T>(pub T);

impl<T: Encodable> Encodable for Nested<T> {
    fn to_encoding(&self) -> Encoding {
        encode_known_cbor_data_item(&self.0)
    }

    fn size_expr(_: Witness<Self>) -> Size {
        known_cbor_data_item_size_expr(T::size_expr(Witness::new()))
    }

    fn encoded_size(&self) -> u64 {
        let inner = self.0.encoded_size();
        head_size(ENCODED_CBOR_DATA_ITEM_TAG) + head_size(inner) + inner
    }
}
