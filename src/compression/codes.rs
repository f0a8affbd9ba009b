//! Prefix code tables derived from a Huffman tree.

use crate::compression::huffman::HuffmanNode;
use crate::compression::Result;
use crate::error::Error;
use std::collections::{BTreeMap, HashMap};

/// Mapping from each symbol to its code, a string of `'0'` and `'1'`.
///
/// Entries are kept in ascending symbol order so that serializing the same
/// table always produces the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, String>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a code for `ch`.
    ///
    /// The code must be non-empty and made only of `'0'` and `'1'`, and `ch`
    /// must not already have a code.
    pub fn insert(&mut self, ch: char, code: String) -> Result<()> {
        if code.is_empty() {
            return Err(Error::ArchiveFormat(format!(
                "empty code for symbol {}",
                u32::from(ch)
            )));
        }
        if !code.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(Error::ArchiveFormat(format!(
                "code {:?} for symbol {} is not a bit string",
                code,
                u32::from(ch)
            )));
        }
        if self.codes.contains_key(&ch) {
            return Err(Error::ArchiveFormat(format!(
                "symbol {} has more than one code",
                u32::from(ch)
            )));
        }
        self.codes.insert(ch, code);
        Ok(())
    }

    /// The code of `ch`, if it has one.
    pub fn get(&self, ch: char) -> Option<&str> {
        self.codes.get(&ch).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate over `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        self.codes.iter().map(|(&ch, code)| (ch, code.as_str()))
    }

    /// True when no code is a prefix of another code in the table.
    pub fn is_prefix_free(&self) -> bool {
        // In lexicographic order a prefix sorts directly before some code it
        // prefixes, so checking neighbours is enough.
        let mut codes: Vec<&str> = self.codes.values().map(String::as_str).collect();
        codes.sort_unstable();
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }

    /// Build the reverse lookup used by the decoder.
    ///
    /// Fails with [`Error::ArchiveFormat`] if two symbols share a code.
    pub fn invert(&self) -> Result<InvertedCodeTable> {
        let mut symbols = HashMap::with_capacity(self.codes.len());
        let mut max_len = 0;
        for (&ch, code) in &self.codes {
            if let Some(other) = symbols.insert(code.clone(), ch) {
                return Err(Error::ArchiveFormat(format!(
                    "symbols {} and {} share the code {}",
                    u32::from(other),
                    u32::from(ch),
                    code
                )));
            }
            max_len = max_len.max(code.len());
        }
        Ok(InvertedCodeTable { symbols, max_len })
    }
}

/// Reverse code table: bit string to symbol.
#[derive(Debug, Clone)]
pub struct InvertedCodeTable {
    symbols: HashMap<String, char>,
    max_len: usize,
}

impl InvertedCodeTable {
    /// The symbol whose code is exactly `bits`.
    pub fn get(&self, bits: &str) -> Option<char> {
        self.symbols.get(bits).copied()
    }

    /// Length of the longest code; longer bit strings can never match.
    pub fn max_code_len(&self) -> usize {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Recursively build the code table mapping characters to their Huffman codes.
///
/// If the tree consists of a single leaf (i.e. one unique symbol), the code "0" is assigned,
/// since an empty code could not be decoded.
pub fn build_code_table(root: &HuffmanNode) -> CodeTable {
    let mut table = CodeTable::new();
    match root {
        HuffmanNode::Leaf { ch, .. } => {
            table.codes.insert(*ch, "0".to_string());
        }
        HuffmanNode::Internal { .. } => build_code_table_helper(root, String::new(), &mut table),
    }
    log::trace!("derived {} prefix codes", table.len());
    table
}

fn build_code_table_helper(node: &HuffmanNode, prefix: String, table: &mut CodeTable) {
    match node {
        HuffmanNode::Leaf { ch, .. } => {
            table.codes.insert(*ch, prefix);
        }
        HuffmanNode::Internal { left, right, .. } => {
            let mut left_prefix = prefix.clone();
            left_prefix.push('0');
            build_code_table_helper(left, left_prefix, table);
            let mut right_prefix = prefix;
            right_prefix.push('1');
            build_code_table_helper(right, right_prefix, table);
        }
    }
}
