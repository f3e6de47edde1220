//! CRC32 checksums over serialized bytes.
//!
//! Uses the IEEE CRC-32 polynomial (`crc32fast`). Checksums are cheap to
//! recompute and are never cached.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::encodable::{Encodable, Witness};
use crate::encoding::Encoding;
use crate::head::head_size;
use crate::serialize::serialize_strict;
use crate::size::Size;

/// A 32-bit CRC of a specific byte blob.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crc32(pub u32);

impl Crc32 {
    /// Encoded size of a checksum that needs all four bytes.
    pub const REPRESENTATIVE_ENCODED_SIZE: u64 = head_size(u32::MAX as u64);

    /// Compute the checksum of `bytes`.
    pub fn compute(bytes: &[u8]) -> Self {
        Self(crc32fast::hash(bytes))
    }

    /// The raw checksum value.
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Whether `bytes` hash to this checksum.
    pub fn matches(&self, bytes: &[u8]) -> bool {
        Self::compute(bytes) == *self
    }
}

impl fmt::Debug for Crc32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Crc32({:#010x})", self.0)
    }
}

impl fmt::Display for Crc32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl From<u32> for Crc32 {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Checksums encode as plain unsigned integers.
impl Encodable for Crc32 {
    fn to_encoding(&self) -> Encoding {
        Encoding::uint(u64::from(self.0))
    }

    fn size_expr(_: Witness<Self>) -> Size {
        Size::head_of(Size::input())
    }

    fn encoded_size(&self) -> u64 {
        head_size(u64::from(self.0))
    }
}

/// Encoded checksum size measured on a representative value.
///
/// Serializes `exemplar`, checksums the bytes and measures the checksum's
/// encoding. The result is exact for the exemplar and only representative
/// for other values of its type.
pub fn exemplar_checksum_size<T: Encodable + ?Sized>(exemplar: &T) -> Size {
    let body = serialize_strict(exemplar);
    let crc = Crc32::compute(&body);
    let size = crc.encoded_size();
    debug!(body_len = body.len(), crc = %crc, size, "measured exemplar checksum size");
    Size::fixed(size)
}
