//! Transparent decompression of compiler output files.
//!
//! Archived solc output is routinely stored gzip-compressed. The loader
//! sniffs the gzip magic rather than trusting file extensions, so both
//! `out.json` and `out.json.gz` work with no flag.

use flate2::read::GzDecoder;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Encoding of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputEncoding {
    /// Sniffed gzip stream.
    Gzip,
    /// Plain text.
    #[default]
    Plain,
}

impl InputEncoding {
    /// Detect the encoding from the leading magic bytes.
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.len() >= 2 && bytes[0] == 0x1f && bytes[1] == 0x8b {
            InputEncoding::Gzip
        } else {
            InputEncoding::Plain
        }
    }
}

impl std::fmt::Display for InputEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputEncoding::Gzip => write!(f, "gzip"),
            InputEncoding::Plain => write!(f, "plain"),
        }
    }
}

/// Decode a possibly-compressed byte buffer to text.
pub fn decode_bytes(bytes: &[u8]) -> io::Result<String> {
    match InputEncoding::sniff(bytes) {
        InputEncoding::Gzip => {
            let mut out = String::new();
            GzDecoder::new(bytes).read_to_string(&mut out)?;
            Ok(out)
        }
        InputEncoding::Plain => String::from_utf8(bytes.to_vec())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
    }
}

/// Read a compiler output file, decompressing if needed.
pub fn load(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    decode_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_sniff() {
        assert_eq!(InputEncoding::sniff(b"{\"sources\":{}}"), InputEncoding::Plain);
        assert_eq!(InputEncoding::sniff(&[0x1f, 0x8b, 0x08]), InputEncoding::Gzip);
        assert_eq!(InputEncoding::sniff(b""), InputEncoding::Plain);
    }

    #[test]
    fn test_decode_plain() {
        assert_eq!(decode_bytes(b"{}").unwrap(), "{}");
    }

    #[test]
    fn test_decode_gzip_round_trip() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"{\"sources\":{}}").unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(decode_bytes(&compressed).unwrap(), "{\"sources\":{}}");
    }
}
