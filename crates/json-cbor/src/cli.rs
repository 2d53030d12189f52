//! Core logic behind the `json-cbor-pack` and `json-cbor-unpack` binaries.
//!
//! - `json-cbor-pack`: JSON text → CBOR bytes
//! - `json-cbor-unpack`: CBOR bytes → JSON text

use std::io::{self, Read, Write};

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::codec::CborCodec;
use crate::error::CborError;
use crate::options::{DecodeOptions, EncodeOptions};
use crate::value::Value;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Cbor(#[from] CborError),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Options shared by both directions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOptions {
    pub max_depth: Option<usize>,
    /// Reject input with bytes after the first data item.
    pub exact: bool,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl CliOptions {
    fn codec(&self) -> CborCodec {
        let mut encode = EncodeOptions::default();
        let mut decode = DecodeOptions::default();
        if let Some(max_depth) = self.max_depth {
            encode = encode.with_max_depth(max_depth);
            decode = decode.with_max_depth(max_depth);
        }
        CborCodec::with_options(encode, decode)
    }
}

/// Log directive for a `-v` count.
pub fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the stderr log subscriber used by both binaries.
pub fn init_tracing(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(verbosity_filter(verbose)))
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Encodes a JSON document to CBOR bytes.
pub fn pack(json: &str, options: &CliOptions) -> Result<Vec<u8>, CliError> {
    let doc: serde_json::Value = serde_json::from_str(json)?;
    Ok(options.codec().encode(&Value::from(doc))?)
}

/// Decodes CBOR bytes to JSON text.
pub fn unpack(bytes: &[u8], options: &CliOptions) -> Result<String, CliError> {
    let decoder = options.codec().decoder;
    let value = if options.exact {
        decoder.decode_exact(bytes)?
    } else {
        decoder.decode(bytes)?
    };
    let doc = serde_json::Value::from(value);
    Ok(if options.pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    })
}

/// Reads JSON text from `input` and writes its CBOR encoding to `output`.
pub fn pack_stream<R: Read, W: Write>(
    mut input: R,
    mut output: W,
    options: &CliOptions,
) -> Result<(), CliError> {
    let mut buf = String::new();
    input.read_to_string(&mut buf)?;
    let bytes = pack(buf.trim(), options)?;
    output.write_all(&bytes)?;
    output.flush()?;
    Ok(())
}

/// Reads CBOR bytes from `input` and writes one line of JSON to `output`.
pub fn unpack_stream<R: Read, W: Write>(
    mut input: R,
    mut output: W,
    options: &CliOptions,
) -> Result<(), CliError> {
    let mut buf = Vec::new();
    input.read_to_end(&mut buf)?;
    let json = unpack(&buf, options)?;
    output.write_all(json.as_bytes())?;
    output.write_all(b"\n")?;
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_then_unpack() {
        let options = CliOptions::default();
        let bytes = pack(r#"{"a":[1,-2,"x"],"b":null}"#, &options).unwrap();
        assert_eq!(
            bytes,
            [0xa2, 0x61, b'a', 0x83, 0x01, 0x21, 0x61, b'x', 0x61, b'b', 0xf6]
        );
        assert_eq!(
            unpack(&bytes, &options).unwrap(),
            r#"{"a":[1,-2,"x"],"b":null}"#
        );
    }

    #[test]
    fn pack_rejects_bad_json() {
        assert!(matches!(
            pack("{", &CliOptions::default()),
            Err(CliError::Json(_))
        ));
    }

    #[test]
    fn unpack_exact_rejects_trailing_bytes() {
        let lenient = CliOptions::default();
        let exact = CliOptions {
            exact: true,
            ..CliOptions::default()
        };
        assert_eq!(unpack(&[0x01, 0x02], &lenient).unwrap(), "1");
        assert!(matches!(
            unpack(&[0x01, 0x02], &exact),
            Err(CliError::Cbor(CborError::TrailingBytes {
                consumed: 1,
                total: 2
            }))
        ));
    }

    #[test]
    fn max_depth_applies_to_both_directions() {
        let options = CliOptions {
            max_depth: Some(1),
            ..CliOptions::default()
        };
        assert!(matches!(
            pack("[[1]]", &options),
            Err(CliError::Cbor(CborError::DepthLimitExceeded { depth: 2 }))
        ));
        assert!(matches!(
            unpack(&[0x81, 0x81, 0x01], &options),
            Err(CliError::Cbor(CborError::DepthLimitExceeded { depth: 2 }))
        ));
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(verbosity_filter(0), "warn");
        assert_eq!(verbosity_filter(1), "info");
        assert_eq!(verbosity_filter(2), "debug");
        assert_eq!(verbosity_filter(3), "trace");
        assert_eq!(verbosity_filter(u8::MAX), "trace");
    }

    #[test]
    fn streams_round_trip() {
        let options = CliOptions::default();
        let mut packed = Vec::new();
        pack_stream(&b" [true, \"x\"]\n"[..], &mut packed, &options).unwrap();
        assert_eq!(packed, [0x82, 0xf5, 0x61, b'x']);

        let mut unpacked = Vec::new();
        unpack_stream(packed.as_slice(), &mut unpacked, &options).unwrap();
        assert_eq!(unpacked, b"[true,\"x\"]\n");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn stream_errors_share_one_type() {
        let options = CliOptions::default();
        let io_err = pack_stream(&b"1"[..], BrokenPipe, &options).unwrap_err();
        assert!(matches!(&io_err, CliError::Io(e) if e.kind() == io::ErrorKind::BrokenPipe));
        assert_eq!(io_err.to_string(), "i/o error: closed");

        let codec_err = unpack_stream(&[0x18][..], Vec::new(), &options).unwrap_err();
        assert_eq!(
            codec_err.to_string(),
            "unexpected end of input at offset 1"
        );
    }

    #[test]
    fn pretty_output() {
        let options = CliOptions {
            pretty: true,
            ..CliOptions::default()
        };
        assert_eq!(unpack(&[0x81, 0x01], &options).unwrap(), "[\n  1\n]");
    }
}
