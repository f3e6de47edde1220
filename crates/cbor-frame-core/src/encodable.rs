//! The encodable capability and its instances for common types.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use bytes::Bytes;

use crate::checksum::{exemplar_checksum_size, Crc32};
use crate::encoding::Encoding;
use crate::head::head_size;
use crate::size::Size;

/// A type-only stand-in for a value of type `T`.
///
/// Size estimation works from a `Witness` rather than a value, so it can
/// never observe (or require) real payload content.
pub struct Witness<T: ?Sized>(PhantomData<fn() -> T>);

impl<T: ?Sized> Witness<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    /// The witness for the type of `value`.
    pub fn of(_value: &T) -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for Witness<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Witness<T> {}

impl<T: ?Sized> Default for Witness<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Witness<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Witness<{}>", type_name::<T>())
    }
}

/// Values that can describe their own CBOR encoding and predict its size.
///
/// The two sides are independent: [`to_encoding`](Self::to_encoding)
/// describes bytes, [`size_expr`](Self::size_expr) predicts their count
/// from the type alone. For every value, `size_expr` applied to the value's
/// magnitude must equal the length of its serialization. Types made of
/// several independently sized parts return [`Size::unresolved`] instead,
/// which never evaluates to a wrong number.
pub trait Encodable {
    /// The writes that encode this value.
    fn to_encoding(&self) -> Encoding;

    /// Encoded size of values of this type.
    ///
    /// Variable-width types return a [`Size::Dependent`] whose input is the
    /// type's magnitude: the value for integers, the length for strings.
    fn size_expr(witness: Witness<Self>) -> Size;

    /// Exact encoded size of this particular value.
    fn encoded_size(&self) -> u64 {
        self.to_encoding().encoded_len()
    }

    /// Encoded size of a CRC32 over this type's serialization.
    ///
    /// The checksum's magnitude is unrelated to the payload length, so the
    /// default assumes a full-width checksum (5 bytes), which a CRC32 needs
    /// for all but 1 in 65536 inputs. Types whose serialization is fixed can
    /// return an exact answer.
    fn checksum_size_expr(witness: Witness<Self>) -> Size {
        let _ = witness;
        Size::fixed(Crc32::REPRESENTATIVE_ENCODED_SIZE)
    }
}

/// Size of a head-only item (integers): the input is the head argument.
fn head_only() -> Size {
    Size::head_of(Size::input())
}

/// Size of a byte or text string: the input is the length.
fn length_prefixed() -> Size {
    Size::head_of(Size::input()) + Size::input()
}

/// CBOR head argument for a signed integer.
fn int_argument(n: i64) -> u64 {
    if n >= 0 {
        n as u64
    } else {
        !(n as u64)
    }
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl Encodable for $t {
            fn to_encoding(&self) -> Encoding {
                Encoding::uint(*self as u64)
            }

            fn size_expr(_: Witness<Self>) -> Size {
                head_only()
            }

            fn encoded_size(&self) -> u64 {
                head_size(*self as u64)
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($t:ty),*) => {$(
        impl Encodable for $t {
            fn to_encoding(&self) -> Encoding {
                Encoding::int(*self as i64)
            }

            /// The input is the CBOR argument: `n` for `n >= 0`, `-1 - n` otherwise.
            fn size_expr(_: Witness<Self>) -> Size {
                head_only()
            }

            fn encoded_size(&self) -> u64 {
                head_size(int_argument(*self as i64))
            }
        }
    )*};
}

impl_unsigned!(u8, u16, u32, u64, usize);
impl_signed!(i8, i16, i32, i64, isize);

impl Encodable for bool {
    fn to_encoding(&self) -> Encoding {
        Encoding::bool(*self)
    }

    fn size_expr(_: Witness<Self>) -> Size {
        Size::fixed(1)
    }
}

/// Unit encodes as CBOR null.
impl Encodable for () {
    fn to_encoding(&self) -> Encoding {
        Encoding::null()
    }

    fn size_expr(_: Witness<Self>) -> Size {
        Size::fixed(1)
    }

    // Only one value exists, so its checksum is known exactly.
    fn checksum_size_expr(_: Witness<Self>) -> Size {
        exemplar_checksum_size(&())
    }
}

impl Encodable for [u8] {
    fn to_encoding(&self) -> Encoding {
        Encoding::bytes(Bytes::copy_from_slice(self))
    }

    fn size_expr(_: Witness<Self>) -> Size {
        length_prefixed()
    }

    fn encoded_size(&self) -> u64 {
        head_size(self.len() as u64) + self.len() as u64
    }
}

impl Encodable for Vec<u8> {
    fn to_encoding(&self) -> Encoding {
        self.as_slice().to_encoding()
    }

    fn size_expr(_: Witness<Self>) -> Size {
        length_prefixed()
    }

    fn encoded_size(&self) -> u64 {
        self.as_slice().encoded_size()
    }
}

impl Encodable for Bytes {
    fn to_encoding(&self) -> Encoding {
        Encoding::bytes(self.clone())
    }

    fn size_expr(_: Witness<Self>) -> Size {
        length_prefixed()
    }

    fn encoded_size(&self) -> u64 {
        head_size(self.len() as u64) + self.len() as u64
    }
}

impl<const N: usize> Encodable for [u8; N] {
    fn to_encoding(&self) -> Encoding {
        self.as_slice().to_encoding()
    }

    fn size_expr(_: Witness<Self>) -> Size {
        Size::fixed(head_size(N as u64) + N as u64)
    }
}

impl Encodable for str {
    fn to_encoding(&self) -> Encoding {
        Encoding::text(self)
    }

    fn size_expr(_: Witness<Self>) -> Size {
        length_prefixed()
    }

    fn encoded_size(&self) -> u64 {
        head_size(self.len() as u64) + self.len() as u64
    }
}

impl Encodable for String {
    fn to_encoding(&self) -> Encoding {
        self.as_str().to_encoding()
    }

    fn size_expr(_: Witness<Self>) -> Size {
        length_prefixed()
    }

    fn encoded_size(&self) -> u64 {
        self.as_str().encoded_size()
    }
}

/// Bytes that are already a CBOR encoding, serialized verbatim.
///
/// Its size input is the byte length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreEncoded(pub Bytes);

impl Encodable for PreEncoded {
    fn to_encoding(&self) -> Encoding {
        Encoding::pre_encoded(self.0.clone())
    }

    fn size_expr(_: Witness<Self>) -> Size {
        Size::input()
    }

    fn encoded_size(&self) -> u64 {
        self.0.len() as u64
    }
}

/// Pairs encode as a 2-element array.
impl<A: Encodable, B: Encodable> Encodable for (A, B) {
    fn to_encoding(&self) -> Encoding {
        Encoding::array_len(2) + self.0.to_encoding() + self.1.to_encoding()
    }

    /// Resolves only when at most one component has a variable width.
    fn size_expr(_: Witness<Self>) -> Size {
        1u64 + Size::independent_sum([
            A::size_expr(Witness::new()),
            B::size_expr(Witness::new()),
        ])
    }

    fn encoded_size(&self) -> u64 {
        1 + self.0.encoded_size() + self.1.encoded_size()
    }
}

/// Triples encode as a 3-element array.
impl<A: Encodable, B: Encodable, C: Encodable> Encodable for (A, B, C) {
    fn to_encoding(&self) -> Encoding {
        Encoding::array_len(3)
            + self.0.to_encoding()
            + self.1.to_encoding()
            + self.2.to_encoding()
    }

    fn size_expr(_: Witness<Self>) -> Size {
        1u64 + Size::independent_sum([
            A::size_expr(Witness::new()),
            B::size_expr(Witness::new()),
            C::size_expr(Witness::new()),
        ])
    }

    fn encoded_size(&self) -> u64 {
        1 + self.0.encoded_size() + self.1.encoded_size() + self.2.encoded_size()
    }
}
