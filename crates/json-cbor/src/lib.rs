//! CBOR encoding and decoding for JSON-like value trees.
//!
//! The encoder writes a deterministic subset of CBOR: shortest integer and
//! length tiers, definite-length text/arrays/maps, 8-byte doubles. The
//! decoder additionally accepts indefinite-length text/arrays/maps and
//! half/single-precision floats, and is hardened for untrusted input.
//!
//! ```
//! use json_cbor::{decode, encode, Value};
//!
//! let value = Value::Array(vec![Value::Int(1), Value::from("a")]);
//! let bytes = encode(&value).unwrap();
//! assert_eq!(bytes, [0x82, 0x01, 0x61, 0x61]);
//! assert_eq!(decode(&bytes).unwrap(), value);
//! ```

pub mod cli;
mod codec;
pub mod constants;
mod decoder;
mod encoder;
mod error;
mod options;
pub mod sink;
mod value;

pub use codec::{cbor_to_json, json_to_cbor, CborCodec};
pub use decoder::CborDecoder;
pub use encoder::{write_arg, write_integer, write_str, CborEncoder};
pub use error::CborError;
pub use options::{DecodeOptions, EncodeOptions, DEFAULT_MAX_DEPTH};
pub use value::{Map, Value, ValueKind};

/// Encodes `value` with default options.
pub fn encode(value: &Value) -> Result<Vec<u8>, CborError> {
    CborEncoder::new().encode(value)
}

/// Exact encoded length of `value`, without producing the bytes.
pub fn encoded_size(value: &Value) -> Result<usize, CborError> {
    CborEncoder::new().encoded_size(value)
}

/// Encodes UTF-16 code units as one text item, rejecting unpaired
/// surrogates.
pub fn encode_utf16_text(units: &[u16]) -> Result<Vec<u8>, CborError> {
    CborEncoder::new().encode_utf16_text(units)
}

/// Decodes the first data item in `bytes` with default options; trailing
/// bytes are left for the caller to judge.
pub fn decode(bytes: &[u8]) -> Result<Value, CborError> {
    CborDecoder::new().decode(bytes)
}

/// Like [`decode`], also returning the number of bytes consumed.
pub fn decode_with_consumed(bytes: &[u8]) -> Result<(Value, usize), CborError> {
    CborDecoder::new().decode_with_consumed(bytes)
}

/// Decodes `bytes`, failing if anything follows the first data item.
pub fn decode_exact(bytes: &[u8]) -> Result<Value, CborError> {
    CborDecoder::new().decode_exact(bytes)
}
