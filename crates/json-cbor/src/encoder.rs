//! `CborEncoder`: encodes a [`Value`] tree into CBOR bytes.
//!
//! Encoding is two passes over the same traversal: the first runs against a
//! [`SizeCounter`] to learn the exact output length, the second writes into
//! a buffer allocated with that capacity. Output is deterministic for a
//! given tree: shortest integer/length tiers, definite lengths only, and
//! doubles always as 8-byte floats.

use json_cbor_buffers::Writer;
use tracing::{debug, trace};

use crate::constants::{Major, Width, FALSE, FLOAT64, NULL, TRUE};
use crate::error::CborError;
use crate::options::EncodeOptions;
use crate::sink::{Sink, SizeCounter};
use crate::value::Value;

#[derive(Debug, Default, Clone)]
pub struct CborEncoder {
    options: EncodeOptions,
}

impl CborEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Exact number of bytes [`encode`](Self::encode) will produce for
    /// `value`, computed without allocating output.
    pub fn encoded_size(&self, value: &Value) -> Result<usize, CborError> {
        let mut counter = SizeCounter::default();
        self.write_any(&mut counter, value, 0)?;
        Ok(counter.size())
    }

    /// Encodes `value` into a buffer of exactly the required size.
    pub fn encode(&self, value: &Value) -> Result<Vec<u8>, CborError> {
        let size = self.encoded_size(value).inspect_err(|e| {
            debug!(error = %e, "cbor encode failed");
        })?;
        trace!(size, "sized cbor output");
        let mut writer = Writer::with_capacity(size);
        self.write_any(&mut writer, value, 0)?;
        debug_assert_eq!(writer.len(), size);
        Ok(writer.into_vec())
    }

    /// Encodes UTF-16 code units as a single text item.
    ///
    /// Conversion is strict: an unpaired surrogate fails with
    /// [`CborError::InvalidText`] and nothing is produced.
    pub fn encode_utf16_text(&self, units: &[u16]) -> Result<Vec<u8>, CborError> {
        let text = utf16_to_string(units).inspect_err(|e| {
            debug!(error = %e, "cbor encode failed");
        })?;
        let mut counter = SizeCounter::default();
        write_str(&mut counter, &text);
        let mut writer = Writer::with_capacity(counter.size());
        write_str(&mut writer, &text);
        Ok(writer.into_vec())
    }

    /// Writes one value and its children to `sink`.
    ///
    /// `depth` is the number of arrays/maps enclosing `value`.
    pub fn write_any<S: Sink>(
        &self,
        sink: &mut S,
        value: &Value,
        depth: usize,
    ) -> Result<(), CborError> {
        match value {
            Value::Null => sink.u8(NULL),
            Value::Bool(b) => sink.u8(if *b { TRUE } else { FALSE }),
            Value::Int(i) => write_integer(sink, *i),
            Value::UInt(u) => write_arg(sink, Major::Unsigned, *u),
            Value::Double(f) => {
                sink.u8(FLOAT64);
                sink.f64(*f);
            }
            Value::Text(s) => write_str(sink, s),
            Value::Array(items) => {
                let depth = self.enter(depth)?;
                write_arg(sink, Major::Array, items.len() as u64);
                for item in items {
                    self.write_any(sink, item, depth)?;
                }
            }
            Value::Map(map) => {
                let depth = self.enter(depth)?;
                write_arg(sink, Major::Map, map.len() as u64);
                for (key, value) in map {
                    write_str(sink, key);
                    self.write_any(sink, value, depth)?;
                }
            }
        }
        Ok(())
    }

    fn enter(&self, depth: usize) -> Result<usize, CborError> {
        let depth = depth + 1;
        if depth > self.options.max_depth {
            return Err(CborError::DepthLimitExceeded { depth });
        }
        Ok(depth)
    }
}

/// Writes an opcode of the given major type carrying argument `n`, using
/// the shortest tier that holds it.
pub fn write_arg<S: Sink>(sink: &mut S, major: Major, n: u64) {
    match Width::for_arg(n) {
        None => sink.u8(major.base() | n as u8),
        Some(width) => {
            sink.u8(major.follows(width));
            match width {
                Width::W1 => sink.u8(n as u8),
                Width::W2 => sink.u16(n as u16),
                Width::W4 => sink.u32(n as u32),
                Width::W8 => sink.u64(n),
            }
        }
    }
}

/// Writes a signed integer; negatives go through the `-1 - n` transform.
pub fn write_integer<S: Sink>(sink: &mut S, int: i64) {
    if int >= 0 {
        write_arg(sink, Major::Unsigned, int as u64);
    } else {
        // -1 - int, computed without overflow for i64::MIN
        write_arg(sink, Major::Negative, !(int as u64));
    }
}

pub fn write_str<S: Sink>(sink: &mut S, s: &str) {
    write_arg(sink, Major::Text, s.len() as u64);
    sink.buf(s.as_bytes());
}

fn utf16_to_string(units: &[u16]) -> Result<String, CborError> {
    let mut out = String::with_capacity(units.len());
    let mut index = 0;
    for ch in char::decode_utf16(units.iter().copied()) {
        match ch {
            Ok(c) => {
                index += c.len_utf16();
                out.push(c);
            }
            Err(_) => return Err(CborError::InvalidText { index }),
        }
    }
    Ok(out)
}
