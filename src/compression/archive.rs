//! Archive serialization.
//!
//! An archive has a short textual header followed by the raw payload:
//!
//! ```text
//! <table_entry_count>\n
//! <ord1>:<code1>,<ord2>:<code2>,...,\n
//! <valid_bit_count>\n
//! <raw packed bytes>
//! ```
//!
//! Ordinals are the decimal code point values of the symbols and codes are
//! strings of `0` and `1`, so the table line never needs escaping. The payload
//! runs to the end of the archive and may itself contain newlines.

use crate::compression::bitstream::{self, PackedBits};
use crate::compression::codes::CodeTable;
use crate::compression::Result;
use crate::error::Error;

/// A parsed or freshly built archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    /// Code of every symbol in the original text.
    pub codes: CodeTable,
    /// Packed payload and its valid bit count.
    pub payload: PackedBits,
}

impl Archive {
    pub fn new(codes: CodeTable, payload: PackedBits) -> Self {
        Archive { codes, payload }
    }

    /// Serialize into a single buffer.
    ///
    /// The archive is assembled in memory so callers write it in one piece.
    pub fn to_bytes(&self) -> Vec<u8> {
        let header = self.header();
        let mut bytes = Vec::with_capacity(header.len() + self.payload.bytes.len());
        bytes.extend_from_slice(header.as_bytes());
        bytes.extend_from_slice(&self.payload.bytes);
        bytes
    }

    fn header(&self) -> String {
        let mut header = format!("{}\n", self.codes.len());
        for (ch, code) in self.codes.iter() {
            header.push_str(&format!("{}:{},", u32::from(ch), code));
        }
        header.push('\n');
        header.push_str(&format!("{}\n", self.payload.bit_count));
        header
    }

    /// Parse an archive.
    ///
    ///
    /// Everything after the third header line is payload. Bytes past the
    /// declared bit count are kept but never read.
    ///
    /// # Errors
    ///
    /// - [`Error::ArchiveFormat`] if a header line is missing or malformed, or
    ///   the declared table size does not match the parsed entries.
    /// - [`Error::TruncatedArchive`] if the payload is shorter than the
    ///   declared bit count.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut rest = data;
        let count_line = next_line(&mut rest, "table size")?;
        let table_line = next_line(&mut rest, "code table")?;
        let bits_line = next_line(&mut rest, "bit count")?;

        let declared: usize = parse_number(count_line, "table size")?;
        let codes = parse_table(table_line)?;
        if codes.len() != declared {
            return Err(Error::ArchiveFormat(format!(
                "table declares {} entries but holds {}",
                declared,
                codes.len()
            )));
        }
        if codes.is_empty() {
            return Err(Error::ArchiveFormat("code table is empty".to_string()));
        }

        let bit_count: usize = parse_number(bits_line, "bit count")?;
        let needed = PackedBits::bytes_needed(bit_count);
        if rest.len() < needed {
            return Err(Error::TruncatedArchive(format!(
                "payload has {} bytes, {} bits need {}",
                rest.len(),
                bit_count,
                needed
            )));
        }

        Ok(Archive {
            codes,
            payload: PackedBits {
                bytes: rest.to_vec(),
                bit_count,
            },
        })
    }

    /// Decode the payload back into the original text.
    pub fn decode(&self) -> Result<String> {
        let inverted = self.codes.invert()?;
        bitstream::unpack(&inverted, &self.payload.bytes, self.payload.bit_count)
    }
}

/// Split the next `\n`-terminated line off `rest`, dropping a trailing `\r`.
fn next_line<'a>(rest: &mut &'a [u8], field: &str) -> Result<&'a str> {
    let end = rest
        .iter()
        .position(|&b| b == b'\n')
        .ok_or_else(|| Error::ArchiveFormat(format!("missing {} line", field)))?;
    let line = &rest[..end];
    *rest = &rest[end + 1..];

    let line = line.strip_suffix(b"\r").unwrap_or(line);
    std::str::from_utf8(line)
        .map_err(|_| Error::ArchiveFormat(format!("{} line is not text", field)))
}

fn parse_number(line: &str, field: &str) -> Result<usize> {
    line.trim()
        .parse()
        .map_err(|_| Error::ArchiveFormat(format!("{} {:?} is not a number", field, line)))
}

fn parse_table(line: &str) -> Result<CodeTable> {
    let mut codes = CodeTable::new();
    for pair in line.split(',').filter(|pair| !pair.is_empty()) {
        let (ordinal, code) = pair
            .split_once(':')
            .ok_or_else(|| Error::ArchiveFormat(format!("table entry {:?} has no ':'", pair)))?;
        let ordinal: u32 = ordinal.parse().map_err(|_| {
            Error::ArchiveFormat(format!("symbol ordinal {:?} is not a number", ordinal))
        })?;
        let ch = char::from_u32(ordinal).ok_or_else(|| {
            Error::ArchiveFormat(format!("{} is not a valid code point", ordinal))
        })?;
        codes.insert(ch, code.to_string())?;
    }
    Ok(codes)
}
