//! CRC-protected envelopes.
//!
//! A value is serialized to `body`, then framed as a 2-element array:
//!
//! ```text
//! 82                 array(2)
//! d8 18 <bytes body> data item of body
//! <uint crc32(body)> checksum, shortest form
//! ```
//!
//! A receiver checks the CRC against the raw body before decoding it.

use tracing::trace;

use cbor_frame_core::{
    exemplar_checksum_size, head_size, serialize_strict, Crc32, Encodable, Encoding, Size,
    Witness,
};

use crate::data_item::{
    encode_unknown_cbor_data_item, unknown_cbor_data_item_size_expr, ENCODED_CBOR_DATA_ITEM_TAG,
};

/// Number of elements in an envelope: the data item and the checksum.
const ENVELOPE_LEN: u64 = 2;

/// Serialize `value` and frame it with a CRC32 of its bytes.
///
/// The result is always a 2-element array, including for an empty body.
pub fn encode_crc_protected<T: Encodable + ?Sized>(value: &T) -> Encoding {
    let body = serialize_strict(value);
    let crc = Crc32::compute(&body);
    trace!(body_len = body.len(), crc = %crc, "framing crc-protected body");

    Encoding::array_len(ENVELOPE_LEN) + encode_unknown_cbor_data_item(body) + crc.to_encoding()
}

/// Size of an envelope around a body of `size_of_inner` bytes.
///
/// The checksum's width cannot be derived from the body length, so it comes
/// from the payload type via [`Encodable::checksum_size_expr`]. For most
/// types that is a representative estimate rather than an exact figure.
pub fn encoded_crc_protected_size_expr<T: Encodable + ?Sized>(
    size_of_inner: Size,
    witness: Witness<T>,
) -> Size {
    envelope_size(size_of_inner, T::checksum_size_expr(witness))
}

/// Like [`encoded_crc_protected_size_expr`], measuring the checksum width
/// on a representative value instead of asking the type.
pub fn encoded_crc_protected_size_expr_with<T: Encodable + ?Sized>(
    size_of_inner: Size,
    exemplar: &T,
) -> Size {
    envelope_size(size_of_inner, exemplar_checksum_size(exemplar))
}

fn envelope_size(size_of_inner: Size, checksum_size: Size) -> Size {
    Size::fixed(head_size(ENVELOPE_LEN))
        + unknown_cbor_data_item_size_expr(size_of_inner)
        + checksum_size
}

/// A value that encodes as a CRC-protected envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrcProtected<T>(pub T);

impl<T: Encodable> Encodable for CrcProtected<T> {
    fn to_encoding(&self) -> Encoding {
        encode_crc_protected(&self.0)
    }

    fn size_expr(_: Witness<Self>) -> Size {
        encoded_crc_protected_size_expr(T::size_expr(Witness::new()), Witness::<T>::new())
    }

    // Exact: the checksum of this particular body is known.
    fn encoded_size(&self) -> u64 {
        let body = serialize_strict(&self.0);
        let crc = Crc32::compute(&body);
        let inner = body.len() as u64;
        head_size(ENVELOPE_LEN)
            + head_size(ENCODED_CBOR_DATA_ITEM_TAG)
            + head_size(inner)
            + inner
            + crc.encoded_size()
    }
}
