//! CBOR item heads: the major type plus its variable-width argument.
//!
//! Every CBOR item starts with a head. Arguments 0-23 fit in the initial
//! byte; larger ones follow it in 1, 2, 4 or 8 big-endian bytes. The
//! encoder ([`Head::new`]) and the size rule ([`head_size`]) live side by
//! side so the size formulas elsewhere in the workspace stay byte-exact.

/// Largest argument that fits in the initial byte.
const MAX_INLINE: u64 = 23;

/// CBOR major types (RFC 8949 §3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Major {
    UnsignedInt = 0,
    NegativeInt = 1,
    Bytes = 2,
    Text = 3,
    Array = 4,
    Map = 5,
    Tag = 6,
    Simple = 7,
}

/// An encoded head, at most 9 bytes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Head {
    buf: [u8; 9],
    len: u8,
}

impl Head {
    /// Encode the shortest head for `major` with argument `n`.
    pub fn new(major: Major, n: u64) -> Self {
        let mt = (major as u8) << 5;
        let mut buf = [0u8; 9];
        let len = if n <= MAX_INLINE {
            buf[0] = mt | (n as u8);
            1
        } else if n <= 0xff {
            buf[0] = mt | 24;
            buf[1] = n as u8;
            2
        } else if n <= 0xffff {
            buf[0] = mt | 25;
            buf[1..3].copy_from_slice(&(n as u16).to_be_bytes());
            3
        } else if n <= 0xffff_ffff {
            buf[0] = mt | 26;
            buf[1..5].copy_from_slice(&(n as u32).to_be_bytes());
            5
        } else {
            buf[0] = mt | 27;
            buf[1..9].copy_from_slice(&n.to_be_bytes());
            9
        };
        Self { buf, len }
    }

    /// The encoded head bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    /// Number of encoded bytes.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false; a head is at least one byte.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl std::fmt::Debug for Head {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Head({})", hex::encode(self.as_bytes()))
    }
}

/// Encoded size in bytes of a head carrying argument `n`, initial byte included.
///
/// Must agree with [`Head::new`] for every `n`.
pub const fn head_size(n: u64) -> u64 {
    if n <= MAX_INLINE {
        1
    } else if n <= 0xff {
        2
    } else if n <= 0xffff {
        3
    } else if n <= 0xffff_ffff {
        5
    } else {
        9
    }
}
