//! Reference decoding of framed bytes.
//!
//! Decoding is done by `ciborium`, independently of the encoder under
//! test, so agreement between the two is meaningful.

use std::io::Cursor;

use ciborium::value::Value;

use cbor_frame::ENCODED_CBOR_DATA_ITEM_TAG;
use cbor_frame_core::Crc32;

use crate::error::{InspectError, Result};

/// Decode exactly one CBOR item, rejecting trailing bytes.
pub fn decode_value(bytes: &[u8]) -> Result<Value> {
    let mut cursor = Cursor::new(bytes);
    let value: Value = ciborium::from_reader(&mut cursor)
        .map_err(|e| InspectError::DecodingError(e.to_string()))?;

    let consumed = cursor.position() as usize;
    if consumed != bytes.len() {
        return Err(InspectError::TrailingBytes(bytes.len() - consumed));
    }
    Ok(value)
}

/// Decode a tag-24 data item and return the wrapped bytes.
pub fn unwrap_data_item(bytes: &[u8]) -> Result<Vec<u8>> {
    data_item_payload(decode_value(bytes)?)
}

/// Decode a CRC envelope, check its checksum, and return the body and CRC.
pub fn open_crc_envelope(bytes: &[u8]) -> Result<(Vec<u8>, Crc32)> {
    let items = match decode_value(bytes)? {
        Value::Array(items) => items,
        other => {
            return Err(InspectError::MalformedFrame(format!(
                "expected array, got {}",
                kind(&other)
            )))
        }
    };

    let [item, crc]: [Value; 2] = items.try_into().map_err(|items: Vec<Value>| {
        InspectError::MalformedFrame(format!("expected 2 elements, got {}", items.len()))
    })?;

    let body = data_item_payload(item)?;

    let expected = match crc {
        Value::Integer(i) => u32::try_from(i)
            .map(Crc32)
            .map_err(|_| InspectError::MalformedFrame("checksum out of range".into()))?,
        other => {
            return Err(InspectError::MalformedFrame(format!(
                "expected integer checksum, got {}",
                kind(&other)
            )))
        }
    };

    let actual = Crc32::compute(&body);
    if actual != expected {
        return Err(InspectError::ChecksumMismatch { expected, actual });
    }

    Ok((body, expected))
}

fn data_item_payload(value: Value) -> Result<Vec<u8>> {
    match value {
        Value::Tag(ENCODED_CBOR_DATA_ITEM_TAG, inner) => match *inner {
            Value::Bytes(b) => Ok(b),
            other => Err(InspectError::MalformedFrame(format!(
                "tag 24 must wrap bytes, got {}",
                kind(&other)
            ))),
        },
        Value::Tag(tag, _) => Err(InspectError::MalformedFrame(format!(
            "expected tag 24, got tag {tag}"
        ))),
        other => Err(InspectError::MalformedFrame(format!(
            "expected tag 24, got {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Integer(_) => "integer",
        Value::Bytes(_) => "bytes",
        Value::Float(_) => "float",
        Value::Text(_) => "text",
        Value::Bool(_) => "bool",
        Value::Null => "null",
        Value::Tag(..) => "tag",
        Value::Array(_) => "array",
        Value::Map(_) => "map",
        _ => "unknown",
    }
}
