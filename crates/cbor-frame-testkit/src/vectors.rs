//! Golden test vectors for byte-exact framing.
//!
//! Each vector is a body that is already valid CBOR, together with the
//! bytes expected from wrapping it as a data item and as a CRC envelope.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use cbor_frame::{
    encode_crc_protected, encode_unknown_cbor_data_item, serialize_encoding_strict,
};
use cbor_frame_core::PreEncoded;

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Body bytes (hex), themselves a CBOR encoding.
    pub body: &'static str,
    /// Expected data item around the body (hex).
    pub expected_data_item: &'static str,
    /// Expected CRC envelope around the body (hex).
    pub expected_envelope: &'static str,
}

/// Serializable form of a vector, with the outputs actually produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenRecord {
    pub name: String,
    pub body: String,
    pub data_item: String,
    pub envelope: String,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "empty body",
            body: "",
            expected_data_item: "d81840",
            // crc32 of no bytes is zero
            expected_envelope: "82d8184000",
        },
        GoldenVector {
            name: "null",
            body: "f6",
            expected_data_item: "d81841f6",
            expected_envelope: "82d81841f61a86dcb8a4",
        },
        GoldenVector {
            name: "uint 42",
            body: "182a",
            expected_data_item: "d81842182a",
            expected_envelope: "82d81842182a1a18794370",
        },
        GoldenVector {
            name: "empty byte string",
            body: "40",
            expected_data_item: "d8184140",
            expected_envelope: "82d81841401aa4deae1d",
        },
        GoldenVector {
            name: "pair [7, \"abc\"]",
            body: "820763616263",
            expected_data_item: "d81846820763616263",
            expected_envelope: "82d818468207636162631ab36c085d",
        },
        GoldenVector {
            name: "bytes \"hello\"",
            body: "4568656c6c6f",
            expected_data_item: "d818464568656c6c6f",
            expected_envelope: "82d818464568656c6c6f1a1e656be7",
        },
        GoldenVector {
            name: "24-byte body needs a one-byte length",
            body: "776161616161616161616161616161616161616161616161",
            expected_data_item: "d8185818776161616161616161616161616161616161616161616161",
            expected_envelope:
                "82d81858187761616161616161616161616161616161616161616161611a295457e9",
        },
    ]
}

impl GoldenVector {
    /// Decode the body hex.
    pub fn body_bytes(&self) -> Bytes {
        // Vector bodies are static and known to be valid hex.
        Bytes::from(hex::decode(self.body).unwrap_or_default())
    }

    /// Run the encoders on this vector's body.
    pub fn to_record(&self) -> GoldenRecord {
        let body = self.body_bytes();
        let data_item = serialize_encoding_strict(&encode_unknown_cbor_data_item(body.clone()));
        let envelope = serialize_encoding_strict(&encode_crc_protected(&PreEncoded(body)));

        GoldenRecord {
            name: self.name.to_string(),
            body: self.body.to_string(),
            data_item: hex::encode(data_item),
            envelope: hex::encode(envelope),
        }
    }

    /// Whether the encoders reproduce the expected bytes.
    pub fn verify(&self) -> bool {
        let record = self.to_record();
        record.data_item == self.expected_data_item && record.envelope == self.expected_envelope
    }
}

/// Verify all golden vectors, reporting `(name, matches)` for each.
pub fn verify_all_vectors() -> Vec<(String, bool)> {
    all_vectors()
        .iter()
        .map(|v| (v.name.to_string(), v.verify()))
        .collect()
}

/// All vectors as produced records, pretty-printed as JSON.
pub fn records_json() -> serde_json::Result<String> {
    let records: Vec<GoldenRecord> = all_vectors().iter().map(GoldenVector::to_record).collect();
    serde_json::to_string_pretty(&records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_verify() {
        for (name, ok) in verify_all_vectors() {
            assert!(ok, "Vector '{}' did not reproduce", name);
        }
    }

    #[test]
    fn test_vector_bodies_are_valid_hex() {
        for vector in all_vectors() {
            assert!(
                hex::decode(vector.body).is_ok(),
                "Vector '{}' has invalid body hex",
                vector.name
            );
        }
    }

    #[test]
    fn test_vectors_are_deterministic() {
        for vector in all_vectors() {
            assert_eq!(vector.to_record(), vector.to_record(), "Vector '{}'", vector.name);
        }
    }

    #[test]
    fn test_records_json_roundtrip() {
        let json = records_json().unwrap();
        let parsed: Vec<GoldenRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), all_vectors().len());
        assert_eq!(parsed[0].data_item, "d81840");
    }
}
