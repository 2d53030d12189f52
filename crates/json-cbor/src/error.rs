use json_cbor_buffers::BufferError;
use thiserror::Error;

/// Errors raised by the CBOR encoder and decoder.
///
/// Every error aborts the whole call; no partial value or buffer is
/// returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CborError {
    /// Text could not be strictly converted to UTF-8 (encode path).
    #[error("text is not valid unicode: unpaired surrogate at code unit {index}")]
    InvalidText { index: usize },
    #[error("unexpected end of input at offset {offset}")]
    EndOfInput { offset: usize },
    #[error("invalid UTF-8 in text item at offset {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("malformed cbor opcode 0x{opcode:02x} at offset {offset}")]
    MalformedOpcode { opcode: u8, offset: usize },
    #[error("map key at offset {offset} is not text")]
    NonTextKey { offset: usize },
    #[error("nesting depth {depth} exceeds the configured limit")]
    DepthLimitExceeded { depth: usize },
    /// A negative integer whose magnitude does not fit in `i64`.
    #[error("negative integer at offset {offset} is out of range")]
    IntegerOverflow { offset: usize },
    #[error("length at offset {offset} does not fit in memory")]
    LengthOverflow { offset: usize },
    #[error("{} trailing byte(s) after the data item", total - consumed)]
    TrailingBytes { consumed: usize, total: usize },
}

impl From<BufferError> for CborError {
    fn from(e: BufferError) -> Self {
        match e {
            BufferError::EndOfInput { offset, .. } => CborError::EndOfInput { offset },
            BufferError::InvalidUtf8 { offset } => CborError::InvalidUtf8 { offset },
        }
    }
}
