//! Error types shared by every stage of the compression pipeline.

use thiserror::Error;

/// Error variants for compression, archive parsing and file handling.
#[derive(Debug, Error)]
pub enum Error {
    /// There are no symbols to build a code from.
    #[error("input is empty, nothing to compress")]
    EmptyInput,

    /// The archive header is missing, unparsable or inconsistent.
    #[error("malformed archive: {0}")]
    ArchiveFormat(String),

    /// The payload ends before the declared bit count, or in the middle of a code.
    #[error("truncated archive: {0}")]
    TruncatedArchive(String),

    /// The input cannot be encoded (not UTF-8, or a symbol has no code).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A decompression source that does not follow the `<name>.zip` convention.
    #[error("invalid archive name: {0}")]
    InvalidArchiveName(String),

    /// Reading or writing the underlying files failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
