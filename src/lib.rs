//! # huffzip
//!
//! Lossless compression of text with Huffman coding.
//!
//! The input is read as a sequence of Unicode code points. Their frequencies
//! drive a Huffman tree, the tree yields a prefix code table, and the encoded
//! bits are packed into bytes. The archive stores the code table and the exact
//! number of valid bits next to the payload, so it can be decoded without any
//! other state.
//!
//! ```rust
//! let archive = huffzip::compress(b"abracadabra")?;
//! let restored = huffzip::decompress(&archive)?;
//! assert_eq!(restored, b"abracadabra");
//! # Ok::<(), huffzip::Error>(())
//! ```

pub mod compression;
pub mod error;
pub mod file;

pub use compression::{compress, compress_str, decompress, Compression, HuffmanCodec};
pub use error::{Error, Result};
pub use file::{archive_path_for, compress_file, decompress_file, restored_path_for};
