//! Golden test vectors for byte-exact framing.
//!
//! Every encoder of these frames must produce identical:
//! - data item bytes (tag 24 around the body)
//! - envelope bytes (array of data item and crc32)
//! - size expressions matching both

use cbor_frame::core::PreEncoded;
use cbor_frame::{
    encode_crc_protected, encode_known_cbor_data_item, encode_unknown_cbor_data_item,
    encoded_crc_protected_size_expr, encoded_crc_protected_size_expr_with,
    serialize_encoding_strict, unknown_cbor_data_item_size_expr, Encodable, Size, Witness,
};
use cbor_frame_testkit::{all_vectors, open_crc_envelope, unwrap_data_item, GoldenRecord};
use serde::{Deserialize, Serialize};

/// On-disk layout of a golden vector file.
#[derive(Debug, Serialize, Deserialize)]
struct GoldenFile {
    version: String,
    description: String,
    vectors: Vec<GoldenRecord>,
}

fn frame_hex<T: Encodable + ?Sized>(value: &T) -> (String, String) {
    let item = serialize_encoding_strict(&encode_known_cbor_data_item(value));
    let envelope = serialize_encoding_strict(&encode_crc_protected(value));
    (hex::encode(item), hex::encode(envelope))
}

#[test]
fn test_vectors_verify() {
    for vector in all_vectors() {
        let record = vector.to_record();
        assert_eq!(
            record.data_item, vector.expected_data_item,
            "Vector '{}' data item mismatch",
            vector.name
        );
        assert_eq!(
            record.envelope, vector.expected_envelope,
            "Vector '{}' envelope mismatch",
            vector.name
        );
    }
}

#[test]
fn test_typed_values_match_vectors() {
    assert_eq!(
        frame_hex(&()),
        ("d81841f6".to_string(), "82d81841f61a86dcb8a4".to_string())
    );
    assert_eq!(
        frame_hex(&42u64),
        ("d81842182a".to_string(), "82d81842182a1a18794370".to_string())
    );
    assert_eq!(
        frame_hex(&(7u64, String::from("abc"))),
        (
            "d81846820763616263".to_string(),
            "82d818468207636162631ab36c085d".to_string()
        )
    );
    assert_eq!(
        frame_hex(&b"hello".to_vec()),
        (
            "d818464568656c6c6f".to_string(),
            "82d818464568656c6c6f1a1e656be7".to_string()
        )
    );
}

#[test]
fn test_size_expressions_match_vectors() {
    for vector in all_vectors() {
        let body = vector.body_bytes();
        let len = body.len() as u64;

        let item = serialize_encoding_strict(&encode_unknown_cbor_data_item(body.clone()));
        assert_eq!(
            unknown_cbor_data_item_size_expr(Size::fixed(len)).evaluate(),
            Ok(item.len() as u64),
            "Vector '{}' data item size",
            vector.name
        );

        let exemplar = PreEncoded(body.clone());
        let envelope = serialize_encoding_strict(&encode_crc_protected(&exemplar));
        assert_eq!(
            encoded_crc_protected_size_expr_with(Size::fixed(len), &exemplar).evaluate(),
            Ok(envelope.len() as u64),
            "Vector '{}' envelope size",
            vector.name
        );
    }
}

#[test]
fn test_representative_checksum_width() {
    // Every non-empty body here has a crc32 above 0xffff.
    for vector in all_vectors().iter().filter(|v| !v.body.is_empty()) {
        let body = vector.body_bytes();
        let envelope = serialize_encoding_strict(&encode_crc_protected(&PreEncoded(body.clone())));
        let predicted = encoded_crc_protected_size_expr(
            Size::fixed(body.len() as u64),
            Witness::<PreEncoded>::new(),
        );
        assert_eq!(predicted.evaluate(), Ok(envelope.len() as u64), "Vector '{}'", vector.name);
    }
}

#[test]
fn test_vectors_decode_independently() {
    for vector in all_vectors() {
        let body = vector.body_bytes().to_vec();

        let item = hex::decode(vector.expected_data_item).unwrap();
        assert_eq!(unwrap_data_item(&item).unwrap(), body, "Vector '{}'", vector.name);

        let envelope = hex::decode(vector.expected_envelope).unwrap();
        let (opened, _crc) = open_crc_envelope(&envelope).unwrap();
        assert_eq!(opened, body, "Vector '{}'", vector.name);
    }
}

#[test]
fn test_vectors_deterministic() {
    let a: Vec<GoldenRecord> = all_vectors().iter().map(|v| v.to_record()).collect();
    let b: Vec<GoldenRecord> = all_vectors().iter().map(|v| v.to_record()).collect();
    assert_eq!(a, b);
}

/// Print golden vectors as JSON, for other implementations to check against.
#[test]
fn print_golden_vectors_json() {
    let file = GoldenFile {
        version: "1".to_string(),
        description: "cbor-frame data item and crc envelope vectors".to_string(),
        vectors: all_vectors().iter().map(|v| v.to_record()).collect(),
    };

    let json = serde_json::to_string_pretty(&file).unwrap();
    println!("{}", json);

    let parsed: GoldenFile = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.vectors, file.vectors);
}
