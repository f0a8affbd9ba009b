//! Packing prefix codes into bytes and reading them back.
//!
//! Bits are stored most-significant-bit first. The last byte is left-aligned
//! and padded with zero bits, so the number of valid bits has to travel with
//! the bytes: a decoder cannot otherwise tell a trailing run of `0` codes from
//! padding.

use crate::compression::codes::{CodeTable, InvertedCodeTable};
use crate::compression::Result;
use crate::error::Error;
use bitvec::prelude::*;

/// A packed bit sequence together with its exact length in bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBits {
    /// Packed bytes, the final one zero-padded on the right.
    pub bytes: Vec<u8>,
    /// Number of meaningful bits in `bytes`.
    pub bit_count: usize,
}

impl PackedBits {
    /// Number of bytes needed to hold `bit_count` bits.
    pub fn bytes_needed(bit_count: usize) -> usize {
        bit_count.div_ceil(8)
    }
}

/// Encode `input` with `codes` and pack the resulting bits into bytes.
///
/// Fails with [`Error::InvalidInput`] if a symbol of `input` has no code.
pub fn pack(input: &str, codes: &CodeTable) -> Result<PackedBits> {
    let mut bits: BitVec<u8, Msb0> = BitVec::new();

    for ch in input.chars() {
        let code = codes.get(ch).ok_or_else(|| {
            Error::InvalidInput(format!("symbol {:?} has no code in the table", ch))
        })?;
        bits.extend(code.bytes().map(|b| b == b'1'));
    }

    let bit_count = bits.len();
    bits.set_uninitialized(false);
    let bytes = bits.into_vec();
    log::trace!("packed {} bits into {} bytes", bit_count, bytes.len());

    Ok(PackedBits { bytes, bit_count })
}

/// Decode the first `bit_count` bits of `bytes` against the inverted table.
///
/// Bits are accumulated until they exactly match a code; the matching symbol
/// is emitted and accumulation starts over. Padding after `bit_count` is
/// ignored.
///
/// Fails with [`Error::TruncatedArchive`] if `bytes` holds fewer than
/// `bit_count` bits, if the bits end in the middle of a code, or if the
/// accumulated bits reach the longest code length without matching, which
/// only happens with a corrupt or cut payload.
pub fn unpack(codes: &InvertedCodeTable, bytes: &[u8], bit_count: usize) -> Result<String> {
    let bits = bytes.view_bits::<Msb0>();
    if bits.len() < bit_count {
        return Err(Error::TruncatedArchive(format!(
            "payload holds {} bits, header declares {}",
            bits.len(),
            bit_count
        )));
    }

    let mut output = String::new();
    let mut word = String::with_capacity(codes.max_code_len());

    for (position, bit) in bits[..bit_count].iter().by_vals().enumerate() {
        word.push(if bit { '1' } else { '0' });

        if let Some(ch) = codes.get(&word) {
            output.push(ch);
            word.clear();
        } else if word.len() >= codes.max_code_len() {
            return Err(Error::TruncatedArchive(format!(
                "bits {} ending at bit {} match no code",
                word, position
            )));
        }
    }

    if !word.is_empty() {
        return Err(Error::TruncatedArchive(format!(
            "payload ends inside a code ({} dangling bits)",
            word.len()
        )));
    }

    log::trace!("unpacked {} symbols from {} bits", output.chars().count(), bit_count);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc_table() -> CodeTable {
        let mut table = CodeTable::new();
        table.insert('a', "0".to_string()).unwrap();
        table.insert('b', "10".to_string()).unwrap();
        table.insert('c', "11".to_string()).unwrap();
        table
    }

    #[test]
    fn test_pack_aaabbc() {
        let packed = pack("aaabbc", &abc_table()).unwrap();
        // 000 10 10 11 -> 00010101 1(0000000)
        assert_eq!(packed.bit_count, 9);
        assert_eq!(packed.bytes, vec![0x15, 0x80]);
    }

    #[test]
    fn test_unpack_aaabbc() {
        let inverted = abc_table().invert().unwrap();
        let decoded = unpack(&inverted, &[0x15, 0x80], 9).unwrap();
        assert_eq!(decoded, "aaabbc");
    }

    #[test]
    fn test_exact_byte_boundary_has_no_padding() {
        let packed = pack("abababababababab", &abc_table()).unwrap();
        assert_eq!(packed.bit_count, 24);
        assert_eq!(packed.bytes.len(), PackedBits::bytes_needed(24));
    }

    #[test]
    fn test_padding_is_ignored() {
        let inverted = abc_table().invert().unwrap();
        // Padding bits set to one must not be read as codes.
        let decoded = unpack(&inverted, &[0x15, 0xFF], 9).unwrap();
        assert_eq!(decoded, "aaabbc");
    }

    #[test]
    fn test_trailing_zero_codes_survive() {
        let table = abc_table();
        let packed = pack("caaaa", &table).unwrap();
        assert_eq!(packed.bit_count, 6);
        let decoded = unpack(&table.invert().unwrap(), &packed.bytes, packed.bit_count).unwrap();
        assert_eq!(decoded, "caaaa");
    }

    #[test]
    fn test_missing_symbol() {
        assert!(matches!(
            pack("abd", &abc_table()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_short_payload() {
        let inverted = abc_table().invert().unwrap();
        assert!(matches!(
            unpack(&inverted, &[0x15], 9),
            Err(Error::TruncatedArchive(_))
        ));
    }

    #[test]
    fn test_dangling_bits() {
        let inverted = abc_table().invert().unwrap();
        // 0001 ends in the middle of a two-bit code.
        assert!(matches!(
            unpack(&inverted, &[0x10], 4),
            Err(Error::TruncatedArchive(_))
        ));
    }

    #[test]
    fn test_unmatched_bits() {
        let mut table = CodeTable::new();
        table.insert('a', "00".to_string()).unwrap();
        table.insert('b', "01".to_string()).unwrap();
        let inverted = table.invert().unwrap();
        // "11" is not a code and no longer code exists.
        assert!(matches!(
            unpack(&inverted, &[0xC0], 2),
            Err(Error::TruncatedArchive(_))
        ));
    }

    #[test]
    fn test_empty() {
        let inverted = abc_table().invert().unwrap();
        assert_eq!(unpack(&inverted, &[], 0).unwrap(), "");
    }
}
