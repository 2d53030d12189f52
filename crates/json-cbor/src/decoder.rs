//! `CborDecoder`: reconstructs a [`Value`] tree from CBOR bytes.
//!
//! Single-pass recursive descent over an immutable slice. Input is treated
//! as untrusted: every fixed-width read is bounds-checked, indefinite-length
//! loops check for the end of input before looking for the break byte,
//! declared counts never drive allocation past what the remaining bytes
//! could hold, and nesting is capped by [`DecodeOptions::max_depth`].

use json_cbor_buffers::{decode_half, BufferError, Reader};
use tracing::{debug, trace};

use crate::constants::{Arg, Opcode, Width, BREAK};
use crate::error::CborError;
use crate::options::DecodeOptions;
use crate::value::{Map, Value};

#[derive(Debug, Default, Clone)]
pub struct CborDecoder {
    options: DecodeOptions,
}

impl CborDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decodes the first data item in `input`. Trailing bytes are ignored.
    pub fn decode(&self, input: &[u8]) -> Result<Value, CborError> {
        self.decode_with_consumed(input).map(|(value, _)| value)
    }

    /// Decodes the first data item and reports how many bytes it spanned.
    pub fn decode_with_consumed(&self, input: &[u8]) -> Result<(Value, usize), CborError> {
        let mut cursor = Cursor {
            reader: Reader::new(input),
            max_depth: self.options.max_depth,
        };
        match cursor.read_any(0) {
            Ok(value) => {
                let consumed = cursor.reader.x;
                trace!(consumed, total = input.len(), "decoded cbor item");
                Ok((value, consumed))
            }
            Err(e) => {
                debug!(error = %e, total = input.len(), "cbor decode failed");
                Err(e)
            }
        }
    }

    /// Decodes `input`, which must hold exactly one data item.
    pub fn decode_exact(&self, input: &[u8]) -> Result<Value, CborError> {
        let (value, consumed) = self.decode_with_consumed(input)?;
        if consumed != input.len() {
            return Err(CborError::TrailingBytes {
                consumed,
                total: input.len(),
            });
        }
        Ok(value)
    }
}

/// Per-call decode state.
struct Cursor<'a> {
    reader: Reader<'a>,
    max_depth: usize,
}

impl Cursor<'_> {
    /// Reads one data item. `depth` is the number of enclosing containers.
    fn read_any(&mut self, depth: usize) -> Result<Value, CborError> {
        let offset = self.reader.x;
        let byte = self.reader.u8()?;
        let opcode =
            Opcode::classify(byte).ok_or(CborError::MalformedOpcode { opcode: byte, offset })?;
        match opcode {
            Opcode::Unsigned(arg) => {
                let n = self.read_arg(arg)?;
                Ok(match i64::try_from(n) {
                    Ok(i) => Value::Int(i),
                    Err(_) => Value::UInt(n),
                })
            }
            Opcode::Negative(arg) => {
                let n = self.read_arg(arg)?;
                let magnitude =
                    i64::try_from(n).map_err(|_| CborError::IntegerOverflow { offset })?;
                Ok(Value::Int(-1 - magnitude))
            }
            Opcode::Text(arg) => {
                let len = self.read_len(arg)?;
                let text = self.reader.utf8(len).map_err(|e| match e {
                    BufferError::InvalidUtf8 { .. } => CborError::InvalidUtf8 { offset },
                    e => e.into(),
                })?;
                Ok(Value::Text(text.to_owned()))
            }
            Opcode::TextIndefinite => self.read_text_indefinite(offset),
            Opcode::Array(arg) => {
                let depth = self.enter(depth)?;
                let count = self.read_len(arg)?;
                self.read_arr(count, depth)
            }
            Opcode::ArrayIndefinite => {
                let depth = self.enter(depth)?;
                self.read_arr_indefinite(depth)
            }
            Opcode::Map(arg) => {
                let depth = self.enter(depth)?;
                let count = self.read_len(arg)?;
                self.read_map(count, depth)
            }
            Opcode::MapIndefinite => {
                let depth = self.enter(depth)?;
                self.read_map_indefinite(depth)
            }
            Opcode::False => Ok(Value::Bool(false)),
            Opcode::True => Ok(Value::Bool(true)),
            Opcode::Null => Ok(Value::Null),
            Opcode::Float16 => Ok(Value::Double(decode_half(self.reader.u16()?))),
            Opcode::Float32 => Ok(Value::Double(f64::from(self.reader.f32()?))),
            Opcode::Float64 => Ok(Value::Double(self.reader.f64()?)),
        }
    }

    fn enter(&self, depth: usize) -> Result<usize, CborError> {
        let depth = depth + 1;
        if depth > self.max_depth {
            return Err(CborError::DepthLimitExceeded { depth });
        }
        Ok(depth)
    }

    fn read_arg(&mut self, arg: Arg) -> Result<u64, CborError> {
        Ok(match arg {
            Arg::Inline(n) => u64::from(n),
            Arg::Follows(Width::W1) => u64::from(self.reader.u8()?),
            Arg::Follows(Width::W2) => u64::from(self.reader.u16()?),
            Arg::Follows(Width::W4) => u64::from(self.reader.u32()?),
            Arg::Follows(Width::W8) => self.reader.u64()?,
        })
    }

    /// Reads a length or count argument as `usize`.
    fn read_len(&mut self, arg: Arg) -> Result<usize, CborError> {
        let offset = self.reader.x;
        let n = self.read_arg(arg)?;
        usize::try_from(n).map_err(|_| CborError::LengthOverflow { offset })
    }

    /// Checks whether the next byte is a break, consuming it if so.
    fn at_break(&mut self) -> Result<bool, CborError> {
        if self.reader.peek()? == BREAK {
            self.reader.x += 1;
            return Ok(true);
        }
        Ok(false)
    }

    fn read_arr(&mut self, count: usize, depth: usize) -> Result<Value, CborError> {
        // every item takes at least one byte
        let mut arr = Vec::with_capacity(count.min(self.reader.remaining()));
        for _ in 0..count {
            arr.push(self.read_any(depth)?);
        }
        Ok(Value::Array(arr))
    }

    fn read_arr_indefinite(&mut self, depth: usize) -> Result<Value, CborError> {
        let mut arr = Vec::new();
        while !self.at_break()? {
            arr.push(self.read_any(depth)?);
        }
        Ok(Value::Array(arr))
    }

    fn read_map(&mut self, count: usize, depth: usize) -> Result<Value, CborError> {
        // every pair takes at least two bytes
        let mut map = Map::with_capacity(count.min(self.reader.remaining() / 2));
        for _ in 0..count {
            let key = self.read_key(depth)?;
            let value = self.read_any(depth)?;
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }

    fn read_map_indefinite(&mut self, depth: usize) -> Result<Value, CborError> {
        let mut map = Map::new();
        while !self.at_break()? {
            let key = self.read_key(depth)?;
            let value = self.read_any(depth)?;
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }

    /// Reads a map key, which must decode to text.
    fn read_key(&mut self, depth: usize) -> Result<String, CborError> {
        let offset = self.reader.x;
        match self.read_any(depth)? {
            Value::Text(key) => Ok(key),
            _ => Err(CborError::NonTextKey { offset }),
        }
    }

    /// Concatenates definite-length text chunks up to the break byte and
    /// validates the result as a whole.
    fn read_text_indefinite(&mut self, offset: usize) -> Result<Value, CborError> {
        let mut bytes = Vec::new();
        while !self.at_break()? {
            let chunk_offset = self.reader.x;
            let byte = self.reader.u8()?;
            let len = match Opcode::classify(byte) {
                Some(Opcode::Text(arg)) => self.read_len(arg)?,
                _ => {
                    return Err(CborError::MalformedOpcode {
                        opcode: byte,
                        offset: chunk_offset,
                    })
                }
            };
            bytes.extend_from_slice(self.reader.buf(len)?);
        }
        String::from_utf8(bytes)
            .map(Value::Text)
            .map_err(|_| CborError::InvalidUtf8 { offset })
    }
}
