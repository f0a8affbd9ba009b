//! Symbol frequency counting.

use crate::compression::Result;
use crate::error::Error;
use std::collections::BTreeMap;

/// Occurrence count of every distinct code point in a text.
///
/// Every entry has a count of at least one; absent symbols are implicitly zero.
/// Iteration is in ascending code point order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<char, usize>,
}

impl FrequencyTable {
    /// Count the symbols of `input`.
    ///
    /// Fails with [`Error::EmptyInput`] when `input` has no symbols.
    pub fn from_text(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut counts = BTreeMap::new();
        for ch in input.chars() {
            *counts.entry(ch).or_insert(0) += 1;
        }

        log::trace!("counted {} distinct symbols", counts.len());
        Ok(FrequencyTable { counts })
    }

    /// Count of `ch`, zero when it does not occur.
    pub fn get(&self, ch: char) -> usize {
        self.counts.get(&ch).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterate over `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.counts.iter().map(|(&ch, &count)| (ch, count))
    }
}

/// Build a frequency table mapping each character in `input` to its frequency.
pub fn build_frequency_table(input: &str) -> Result<FrequencyTable> {
    FrequencyTable::from_text(input)
}
