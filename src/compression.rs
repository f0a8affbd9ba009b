//! Huffman compression of text.
//!
//! This module implements the whole pipeline, leaf first:
//! - [`frequency`]: counting how often every code point occurs
//! - [`huffman`]: building the Huffman tree with a min-heap
//! - [`codes`]: deriving the prefix code table from the tree
//! - [`bitstream`]: packing codes into bytes and decoding them again
//! - [`archive`]: the self-describing archive format
//!
//! # Examples
//!
//! ```rust
//! use huffzip::compression::{Compression, HuffmanCodec};
//!
//! let codec = HuffmanCodec;
//! let archive = codec.compress("mississippi".as_bytes())?;
//! assert_eq!(codec.decompress(&archive)?, b"mississippi");
//! # Ok::<(), huffzip::Error>(())
//! ```

use crate::error::Error;

/// Result type for compression operations
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for compression algorithms
pub trait Compression {
    /// Compress the input data
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompress the compressed data
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

pub mod archive;
pub mod bitstream;
pub mod codes;
pub mod frequency;
pub mod huffman;

pub use archive::Archive;
pub use bitstream::{pack, unpack, PackedBits};
pub use codes::{build_code_table, CodeTable, InvertedCodeTable};
pub use frequency::{build_frequency_table, FrequencyTable};
pub use huffman::{build_huffman_tree, HuffmanNode};

/// Huffman coder over UTF-8 text.
///
/// Stateless: every call builds its own tree and table.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCodec;

impl Compression for HuffmanCodec {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        compress(data)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        decompress(data)
    }
}

/// Build the archive for `input` without serializing it.
pub fn encode(input: &str) -> Result<Archive> {
    let freq_table = build_frequency_table(input)?;
    let tree = build_huffman_tree(&freq_table)?;
    let codes = build_code_table(&tree);
    drop(tree);

    let payload = pack(input, &codes)?;
    log::debug!(
        "encoded {} symbols ({} distinct) into {} bits",
        freq_table.total(),
        codes.len(),
        payload.bit_count
    );
    Ok(Archive::new(codes, payload))
}

/// Compress UTF-8 text into archive bytes.
///
/// Fails with [`Error::EmptyInput`] for an empty string.
pub fn compress_str(input: &str) -> Result<Vec<u8>> {
    let bytes = encode(input)?.to_bytes();
    log::debug!("archive is {} bytes for {} input bytes", bytes.len(), input.len());
    Ok(bytes)
}

/// Compress raw bytes, which must be valid UTF-8.
///
/// Fails with [`Error::InvalidInput`] if `data` is not UTF-8, and with
/// [`Error::EmptyInput`] if it is empty.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let text = std::str::from_utf8(data)
        .map_err(|e| Error::InvalidInput(format!("input is not valid UTF-8: {}", e)))?;
    compress_str(text)
}

/// Restore the original bytes from an archive.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let archive =
        Archive::from_bytes(data).inspect_err(|e| log::warn!("rejected archive: {}", e))?;
    let text = archive.decode()?;
    log::debug!("decoded {} bytes from a {} byte archive", text.len(), data.len());
    Ok(text.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let input = "huffman coding in rust is fun!";
        let archive = compress_str(input).unwrap();
        assert_eq!(decompress(&archive).unwrap(), input.as_bytes());
    }

    #[test]
    fn test_single_character() {
        let input = "aaaa";
        let archive = encode(input).unwrap();
        // With a single symbol, the assigned code is "0" for each occurrence.
        assert_eq!(archive.codes.get('a'), Some("0"));
        assert_eq!(archive.payload.bit_count, 4);
        assert_eq!(archive.payload.bytes, vec![0x00]);
        let bytes = archive.to_bytes();
        assert_eq!(decompress(&bytes).unwrap(), input.as_bytes());
    }

    #[test]
    fn test_aaabbc() {
        let archive = encode("aaabbc").unwrap();
        assert_eq!(archive.payload.bit_count, 9);
        assert_eq!(archive.payload.bytes.len(), 2);
        assert_eq!(archive.decode().unwrap(), "aaabbc");
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(compress(b""), Err(Error::EmptyInput)));
        assert!(matches!(HuffmanCodec.compress(&[]), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        assert!(matches!(
            compress(&[0x61, 0xFF, 0x62]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_deterministic_output() {
        let input = "the quick brown fox jumps over the lazy dog";
        assert_eq!(compress_str(input).unwrap(), compress_str(input).unwrap());
    }

    #[test]
    fn test_truncated_archive() {
        let mut archive = compress_str("abracadabra, abracadabra").unwrap();
        archive.pop();
        assert!(matches!(
            decompress(&archive),
            Err(Error::TruncatedArchive(_))
        ));
    }

    #[test]
    fn test_trailing_newline_after_archive() {
        let mut archive = compress_str("aaabbc").unwrap();
        archive.push(b'\n');
        assert_eq!(decompress(&archive).unwrap(), b"aaabbc");
    }

    #[test]
    fn test_payload_bit_without_code() {
        // The only code is "0", so a set bit can never decode.
        assert!(matches!(
            decompress(b"1\n97:0,\n1\n\x80"),
            Err(Error::TruncatedArchive(_))
        ));
    }

    #[test]
    fn test_multibyte_text() {
        let input = "Grüße, 世界! 🦀🦀🦀\nzweite Zeile\r\n";
        let archive = HuffmanCodec.compress(input.as_bytes()).unwrap();
        assert_eq!(HuffmanCodec.decompress(&archive).unwrap(), input.as_bytes());
    }
}
