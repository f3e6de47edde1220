//! Encoding values: pending CBOR writes that have not been materialized.
//!
//! An [`Encoding`] is an ordered list of [`Token`]s. It is built by
//! concatenation and consumed by the entry points in
//! [`serialize`](crate::serialize). Encodings always use the shortest head
//! and definite lengths.

use std::ops::Add;

use bytes::{Bytes, BytesMut};

use crate::head::{head_size, Head, Major};

/// Simple-value arguments (major type 7).
mod simple {
    pub const FALSE: u64 = 20;
    pub const TRUE: u64 = 21;
    pub const NULL: u64 = 22;
}

/// A single primitive write.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Unsigned integer (major type 0).
    UInt(u64),
    /// Negative integer `-1 - n` (major type 1).
    NegInt(u64),
    /// Definite-length byte string (major type 2).
    Bytes(Bytes),
    /// Definite-length UTF-8 text (major type 3).
    Text(String),
    /// Array header with the number of items that follow (major type 4).
    ArrayLen(u64),
    /// Map header with the number of pairs that follow (major type 5).
    MapLen(u64),
    /// Semantic tag applying to the next item (major type 6).
    Tag(u64),
    Bool(bool),
    Null,
    /// Bytes that are already valid CBOR, written verbatim.
    PreEncoded(Bytes),
}

impl Token {
    /// Exact number of bytes this token writes.
    pub fn encoded_len(&self) -> u64 {
        match self {
            Token::UInt(n) | Token::NegInt(n) => head_size(*n),
            Token::Bytes(b) => head_size(b.len() as u64) + b.len() as u64,
            Token::Text(s) => head_size(s.len() as u64) + s.len() as u64,
            Token::ArrayLen(n) | Token::MapLen(n) | Token::Tag(n) => head_size(*n),
            Token::Bool(_) | Token::Null => 1,
            Token::PreEncoded(b) => b.len() as u64,
        }
    }

    fn write_to<S: Sink + ?Sized>(&self, sink: &mut S) {
        match self {
            Token::UInt(n) => sink.put_slice(Head::new(Major::UnsignedInt, *n).as_bytes()),
            Token::NegInt(n) => sink.put_slice(Head::new(Major::NegativeInt, *n).as_bytes()),
            Token::Bytes(b) => {
                sink.put_slice(Head::new(Major::Bytes, b.len() as u64).as_bytes());
                sink.put_bytes(b);
            }
            Token::Text(s) => {
                sink.put_slice(Head::new(Major::Text, s.len() as u64).as_bytes());
                sink.put_slice(s.as_bytes());
            }
            Token::ArrayLen(n) => sink.put_slice(Head::new(Major::Array, *n).as_bytes()),
            Token::MapLen(n) => sink.put_slice(Head::new(Major::Map, *n).as_bytes()),
            Token::Tag(n) => sink.put_slice(Head::new(Major::Tag, *n).as_bytes()),
            Token::Bool(b) => {
                let arg = if *b { simple::TRUE } else { simple::FALSE };
                sink.put_slice(Head::new(Major::Simple, arg).as_bytes());
            }
            Token::Null => sink.put_slice(Head::new(Major::Simple, simple::NULL).as_bytes()),
            Token::PreEncoded(b) => sink.put_bytes(b),
        }
    }
}

/// Destination for materialized bytes.
pub(crate) trait Sink {
    fn put_slice(&mut self, src: &[u8]);

    /// Write an owned byte string. Sinks that can keep the buffer as-is
    /// override this to avoid a copy.
    fn put_bytes(&mut self, src: &Bytes) {
        self.put_slice(src);
    }
}

impl Sink for BytesMut {
    fn put_slice(&mut self, src: &[u8]) {
        self.extend_from_slice(src);
    }
}

impl Sink for Vec<u8> {
    fn put_slice(&mut self, src: &[u8]) {
        self.extend_from_slice(src);
    }
}

/// An immutable, composable sequence of CBOR writes.
///
/// Concatenation is associative and keeps order:
/// `a.then(b).then(c) == a.then(b.then(c))`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Encoding {
    tokens: Vec<Token>,
}

impl Encoding {
    /// The empty encoding; writes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    fn token(token: Token) -> Self {
        Self {
            tokens: vec![token],
        }
    }

    /// An unsigned integer.
    pub fn uint(n: u64) -> Self {
        Self::token(Token::UInt(n))
    }

    /// A signed integer, using major type 1 for negatives.
    pub fn int(n: i64) -> Self {
        if n >= 0 {
            Self::uint(n as u64)
        } else {
            // CBOR encodes -1 as 0, -2 as 1, etc.
            Self::token(Token::NegInt(!(n as u64)))
        }
    }

    /// A byte string.
    pub fn bytes(b: impl Into<Bytes>) -> Self {
        Self::token(Token::Bytes(b.into()))
    }

    /// A text string.
    pub fn text(s: impl Into<String>) -> Self {
        Self::token(Token::Text(s.into()))
    }

    /// An array header; the `n` items must follow.
    pub fn array_len(n: u64) -> Self {
        Self::token(Token::ArrayLen(n))
    }

    /// A map header; the `n` key/value pairs must follow.
    pub fn map_len(n: u64) -> Self {
        Self::token(Token::MapLen(n))
    }

    /// A semantic tag; the tagged item must follow.
    pub fn tag(t: u64) -> Self {
        Self::token(Token::Tag(t))
    }

    pub fn bool(b: bool) -> Self {
        Self::token(Token::Bool(b))
    }

    pub fn null() -> Self {
        Self::token(Token::Null)
    }

    /// Splice bytes that are already a valid CBOR encoding.
    ///
    /// The bytes are not checked.
    pub fn pre_encoded(b: impl Into<Bytes>) -> Self {
        Self::token(Token::PreEncoded(b.into()))
    }

    /// Concatenate: `self`'s writes, then `next`'s.
    pub fn then(mut self, next: Encoding) -> Self {
        self.tokens.extend(next.tokens);
        self
    }

    /// The writes, in order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Whether this encoding has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Exact number of bytes this encoding writes, computed without writing.
    pub fn encoded_len(&self) -> u64 {
        self.tokens.iter().map(Token::encoded_len).sum()
    }

    pub(crate) fn write_to<S: Sink + ?Sized>(&self, sink: &mut S) {
        for token in &self.tokens {
            token.write_to(sink);
        }
    }
}

impl Add for Encoding {
    type Output = Encoding;

    fn add(self, rhs: Encoding) -> Encoding {
        self.then(rhs)
    }
}

impl From<Token> for Encoding {
    fn from(token: Token) -> Self {
        Self::token(token)
    }
}

impl FromIterator<Encoding> for Encoding {
    fn from_iter<I: IntoIterator<Item = Encoding>>(iter: I) -> Self {
        iter.into_iter().fold(Encoding::new(), Encoding::then)
    }
}
