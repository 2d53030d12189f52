use thiserror::Error;

/// Error returned by the bounds-checked [`Reader`](crate::Reader) methods.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    #[error("unexpected end of input at offset {offset}: {wanted} more byte(s) needed")]
    EndOfInput { offset: usize, wanted: usize },
    #[error("invalid UTF-8 at offset {offset}")]
    InvalidUtf8 { offset: usize },
}
