//! Serialization entry points.
//!
//! Three output shapes are offered, all producing identical bytes:
//!
//! - [`serialize`]: a [`ChunkedBytes`] built incrementally, first chunk
//!   small and later chunks larger (see [`ChunkConfig`])
//! - [`serialize_strict`]: one contiguous [`Bytes`] buffer
//! - [`serialize_builder`]: a [`Builder`] that can be spliced with other
//!   builders before a single final materialization
//!
//! The `*_encoding` variants take an [`Encoding`] directly; the value
//! variants ask the [`Encodable`] for its encoding first.

use std::mem;
use std::ops::Add;

use bytes::{Bytes, BytesMut};
use tracing::trace;

use crate::config::ChunkConfig;
use crate::encodable::Encodable;
use crate::encoding::{Encoding, Sink};

/// Serialize a value into chunked bytes with the default chunk sizes.
pub fn serialize<T: Encodable + ?Sized>(value: &T) -> ChunkedBytes {
    serialize_encoding(&value.to_encoding())
}

/// Serialize a value into chunked bytes with explicit chunk sizes.
pub fn serialize_with<T: Encodable + ?Sized>(config: &ChunkConfig, value: &T) -> ChunkedBytes {
    serialize_encoding_with(config, &value.to_encoding())
}

/// Serialize a value into one contiguous buffer.
///
/// Always equal to `serialize(value).to_bytes()`.
pub fn serialize_strict<T: Encodable + ?Sized>(value: &T) -> Bytes {
    serialize_encoding_strict(&value.to_encoding())
}

/// Wrap a value's encoding in a builder without materializing it.
pub fn serialize_builder<T: Encodable + ?Sized>(value: &T) -> Builder {
    Builder::from(value.to_encoding())
}

/// Materialize an encoding into chunked bytes with the default chunk sizes.
pub fn serialize_encoding(encoding: &Encoding) -> ChunkedBytes {
    serialize_encoding_with(&ChunkConfig::default(), encoding)
}

/// Materialize an encoding into chunked bytes.
pub fn serialize_encoding_with(config: &ChunkConfig, encoding: &Encoding) -> ChunkedBytes {
    let mut writer = ChunkWriter::new(config);
    encoding.write_to(&mut writer);
    let out = writer.finish();
    trace!(len = out.len(), chunks = out.chunks().len(), "serialized encoding");
    out
}

/// Materialize an encoding into one contiguous buffer.
pub fn serialize_encoding_strict(encoding: &Encoding) -> Bytes {
    // The exact length is known up front, so a single allocation suffices.
    let mut buf = BytesMut::with_capacity(encoding.encoded_len() as usize);
    encoding.write_to(&mut buf);
    trace!(len = buf.len(), "serialized encoding strictly");
    buf.freeze()
}

/// Serialized bytes held as a sequence of chunks.
///
/// Equality compares content, not chunk boundaries.
#[derive(Debug, Clone, Default)]
pub struct ChunkedBytes {
    chunks: Vec<Bytes>,
    len: usize,
}

impl ChunkedBytes {
    /// Total number of bytes across all chunks.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The chunks, in order. None of them is empty.
    pub fn chunks(&self) -> &[Bytes] {
        &self.chunks
    }

    /// Concatenate all chunks into one buffer.
    pub fn to_bytes(&self) -> Bytes {
        match self.chunks.as_slice() {
            [] => Bytes::new(),
            [only] => only.clone(),
            many => {
                let mut buf = BytesMut::with_capacity(self.len);
                for chunk in many {
                    buf.extend_from_slice(chunk);
                }
                buf.freeze()
            }
        }
    }

    /// Concatenate all chunks into a vector.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        for chunk in &self.chunks {
            out.extend_from_slice(chunk);
        }
        out
    }

    fn iter_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.chunks.iter().flat_map(|c| c.iter().copied())
    }
}

impl PartialEq for ChunkedBytes {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter_bytes().eq(other.iter_bytes())
    }
}

impl Eq for ChunkedBytes {}

impl IntoIterator for ChunkedBytes {
    type Item = Bytes;
    type IntoIter = std::vec::IntoIter<Bytes>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.into_iter()
    }
}

/// Sink that fills fixed-capacity chunks.
struct ChunkWriter {
    chunk_size: usize,
    current: BytesMut,
    limit: usize,
    chunks: Vec<Bytes>,
    len: usize,
}

impl ChunkWriter {
    fn new(config: &ChunkConfig) -> Self {
        let first = config.first_chunk_size();
        Self {
            chunk_size: config.chunk_size(),
            current: BytesMut::with_capacity(first),
            limit: first,
            chunks: Vec::new(),
            len: 0,
        }
    }

    /// Seal the current chunk. Every chunk after this point uses the
    /// regular chunk size; its buffer is allocated on the next write.
    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.chunks.push(mem::take(&mut self.current).freeze());
        }
        self.limit = self.chunk_size;
    }

    fn finish(mut self) -> ChunkedBytes {
        self.flush();
        ChunkedBytes {
            chunks: self.chunks,
            len: self.len,
        }
    }
}

impl Sink for ChunkWriter {
    fn put_slice(&mut self, mut src: &[u8]) {
        self.len += src.len();
        while !src.is_empty() {
            let room = self.limit - self.current.len();
            if room == 0 {
                self.flush();
                continue;
            }
            if self.current.is_empty() {
                self.current.reserve(self.limit);
            }
            let n = room.min(src.len());
            self.current.extend_from_slice(&src[..n]);
            src = &src[n..];
        }
    }

    fn put_bytes(&mut self, src: &Bytes) {
        // Large byte strings become chunks of their own without copying.
        if src.len() >= self.chunk_size {
            self.flush();
            self.len += src.len();
            self.chunks.push(src.clone());
        } else {
            self.put_slice(src);
        }
    }
}

/// A composable, not yet materialized serialization.
///
/// Builders are spliced with [`Builder::append`] (or `+`) and written once
/// with [`Builder::finish`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Builder {
    encoding: Encoding,
}

impl Builder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Splice `other` after this builder's writes.
    pub fn append(self, other: Builder) -> Self {
        Self {
            encoding: self.encoding.then(other.encoding),
        }
    }

    /// Number of bytes [`Builder::finish`] will produce.
    pub fn len(&self) -> u64 {
        self.encoding.encoded_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Materialize into one contiguous buffer.
    pub fn finish(&self) -> Bytes {
        serialize_encoding_strict(&self.encoding)
    }

    /// Materialize into chunked bytes.
    pub fn finish_chunked(&self, config: &ChunkConfig) -> ChunkedBytes {
        serialize_encoding_with(config, &self.encoding)
    }

    /// The underlying encoding.
    pub fn into_encoding(self) -> Encoding {
        self.encoding
    }
}

impl From<Encoding> for Builder {
    fn from(encoding: Encoding) -> Self {
        Self { encoding }
    }
}

impl Add for Builder {
    type Output = Builder;

    fn add(self, rhs: Builder) -> Builder {
        self.append(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Encoding {
        Encoding::array_len(3)
            + Encoding::uint(1_000_000)
            + Encoding::bytes(vec![0x5a; 5000])
            + Encoding::text("tail")
    }

    #[test]
    fn test_default_chunking() {
        let out = serialize_encoding(&sample());
        let chunks = out.chunks();

        // header + uint + bytes head fill the first chunk, the large byte
        // string becomes its own chunk, and the text lands in a fresh one.
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1].len(), 5000);
        assert_eq!(out.len(), 1 + 5 + 3 + 5000 + 5);
    }

    #[test]
    fn test_small_first_chunk() {
        let config = ChunkConfig::new(2, 4);
        let out = serialize_encoding_with(&config, &(Encoding::text("abcdefghij")));
        let sizes: Vec<usize> = out.chunks().iter().map(Bytes::len).collect();
        assert_eq!(sizes, vec![2, 4, 4, 1]);
        assert_eq!(out.to_vec(), serialize_encoding_strict(&Encoding::text("abcdefghij")));
    }

    #[test]
    fn test_large_first_write_ends_first_chunk() {
        let config = ChunkConfig::new(2, 4);
        let e = Encoding::pre_encoded(vec![0xf6; 8]) + Encoding::text("abcdefghij");
        let out = serialize_encoding_with(&config, &e);
        let sizes: Vec<usize> = out.chunks().iter().map(Bytes::len).collect();
        assert_eq!(sizes, vec![8, 4, 4, 3]);
        assert_eq!(out.to_bytes(), serialize_encoding_strict(&e));
    }

    #[test]
    fn test_zero_config_writes_single_byte_chunks() {
        let config: ChunkConfig =
            serde_json::from_str(r#"{"first_chunk_size": 0, "chunk_size": 0}"#).unwrap();
        let out = serialize_encoding_with(&config, &Encoding::text("abc"));
        assert!(out.chunks().iter().all(|c| c.len() == 1));
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_empty_encoding() {
        let out = serialize_encoding(&Encoding::new());
        assert!(out.is_empty());
        assert!(out.chunks().is_empty());
        assert!(out.to_bytes().is_empty());
        assert!(serialize_encoding_strict(&Encoding::new()).is_empty());
    }

    #[test]
    fn test_strict_matches_chunked() {
        let e = sample();
        assert_eq!(serialize_encoding(&e).to_bytes(), serialize_encoding_strict(&e));
    }

    #[test]
    fn test_chunked_equality_ignores_boundaries() {
        let e = sample();
        let a = serialize_encoding_with(&ChunkConfig::new(1, 1), &e);
        let b = serialize_encoding_with(&ChunkConfig::default(), &e);
        assert_ne!(a.chunks().len(), b.chunks().len());
        assert_eq!(a, b);
    }

    #[test]
    fn test_builder_splicing() {
        let head = Builder::from(Encoding::array_len(2));
        let first = serialize_builder(&7u64);
        let second = serialize_builder(&String::from("x"));

        let spliced = head + first + second;
        assert_eq!(spliced.len(), 4);
        assert_eq!(spliced.finish().as_ref(), &[0x82, 0x07, 0x61, b'x']);
        assert_eq!(
            spliced.finish_chunked(&ChunkConfig::default()).to_bytes(),
            spliced.finish()
        );
    }

    #[test]
    fn test_value_entry_points_agree() {
        let value = vec![0xabu8; 2048];
        let strict = serialize_strict(&value);
        assert_eq!(serialize(&value).to_bytes(), strict);
        assert_eq!(serialize_builder(&value).finish(), strict);
    }

    proptest! {
        #[test]
        fn chunking_never_changes_bytes(
            payload in prop::collection::vec(any::<u8>(), 0..10_000),
            first in 1usize..64,
            rest in 1usize..256,
        ) {
            let e = Encoding::array_len(2) + Encoding::bytes(payload) + Encoding::uint(9);
            let chunked = serialize_encoding_with(&ChunkConfig::new(first, rest), &e);
            let strict = serialize_encoding_strict(&e);

            prop_assert_eq!(chunked.len(), strict.len());
            prop_assert!(chunked.chunks().iter().all(|c| !c.is_empty()));
            prop_assert_eq!(chunked.to_bytes(), strict);
        }
    }
}
