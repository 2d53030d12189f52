//! `CborCodec`: combined encoder/decoder pair, plus JSON conveniences.

use crate::decoder::CborDecoder;
use crate::encoder::CborEncoder;
use crate::error::CborError;
use crate::options::{DecodeOptions, EncodeOptions};
use crate::value::Value;

#[derive(Debug, Default, Clone)]
pub struct CborCodec {
    pub encoder: CborEncoder,
    pub decoder: CborDecoder,
}

impl CborCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(encode: EncodeOptions, decode: DecodeOptions) -> Self {
        Self {
            encoder: CborEncoder::with_options(encode),
            decoder: CborDecoder::with_options(decode),
        }
    }

    pub fn encode(&self, value: &Value) -> Result<Vec<u8>, CborError> {
        self.encoder.encode(value)
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Value, CborError> {
        self.decoder.decode(bytes)
    }

    /// Encodes a `serde_json` document.
    pub fn encode_json(&self, value: &serde_json::Value) -> Result<Vec<u8>, CborError> {
        self.encoder.encode(&Value::from(value.clone()))
    }

    /// Decodes one item into a `serde_json` document. Non-finite doubles
    /// become `null`.
    pub fn decode_json(&self, bytes: &[u8]) -> Result<serde_json::Value, CborError> {
        self.decoder.decode(bytes).map(serde_json::Value::from)
    }
}

/// Encodes a `serde_json` document with default options.
pub fn json_to_cbor(value: &serde_json::Value) -> Result<Vec<u8>, CborError> {
    CborCodec::new().encode_json(value)
}

/// Decodes one item into a `serde_json` document with default options.
pub fn cbor_to_json(bytes: &[u8]) -> Result<serde_json::Value, CborError> {
    CborCodec::new().decode_json(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_round_trip() {
        let doc = json!({
            "name": "widget",
            "tags": ["a", "b"],
            "count": 3,
            "ratio": 0.25,
            "owner": null,
            "active": true,
            "offset": -40
        });
        let bytes = json_to_cbor(&doc).unwrap();
        assert_eq!(cbor_to_json(&bytes), Ok(doc));
    }

    #[test]
    fn json_numbers_pick_integer_tiers() {
        assert_eq!(json_to_cbor(&json!(500)), Ok(vec![0x19, 0x01, 0xf4]));
        assert_eq!(json_to_cbor(&json!(-500)), Ok(vec![0x39, 0x01, 0xf3]));
        assert_eq!(
            json_to_cbor(&json!(0.5)),
            Ok(vec![0xfb, 0x3f, 0xe0, 0, 0, 0, 0, 0, 0])
        );
    }

    #[test]
    fn codec_applies_options() {
        let codec = CborCodec::with_options(
            EncodeOptions::default(),
            DecodeOptions::default().with_max_depth(1),
        );
        let nested = Value::Array(vec![Value::array()]);
        let bytes = codec.encode(&nested).unwrap();
        assert_eq!(
            codec.decode(&bytes),
            Err(CborError::DepthLimitExceeded { depth: 2 })
        );
    }

    #[test]
    fn half_float_nan_decodes_to_json_null() {
        assert_eq!(cbor_to_json(&[0xf9, 0x7e, 0x00]), Ok(serde_json::Value::Null));
    }
}
