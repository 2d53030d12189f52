//! Big-endian byte primitives used by the `json-cbor` codec.
//!
//! - [`Reader`] walks an immutable byte slice; every read is bounds-checked.
//! - [`Writer`] appends big-endian values to a growable buffer.
//! - [`decode_half`] widens IEEE-754 half-precision bits to `f64`.

mod error;
mod half;
mod reader;
mod writer;

pub use error::BufferError;
pub use half::decode_half;
pub use reader::Reader;
pub use writer::Writer;
