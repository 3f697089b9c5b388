use crate::error::{Corruption, Result};

pub const ALPHABET_SIZE: usize = 256;

/// Occurrence count for every byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }
}

impl FrequencyTable {
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::default();
        for &byte in data {
            table.counts[byte as usize] += 1;
        }
        table
    }

    /// Rebuild a table from deserialized header counts.
    pub fn from_counts(counts: Vec<u64>) -> Result<Self> {
        let counts: [u64; ALPHABET_SIZE] = counts
            .try_into()
            .map_err(|v: Vec<u64>| Corruption::HeaderLength(v.len()))?;

        counts
            .iter()
            .try_fold(0u64, |acc, &c| acc.checked_add(c))
            .ok_or(Corruption::FrequencyOverflow)?;

        Ok(Self { counts })
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Sum of all counts, i.e. the length of the original input.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of symbols with a nonzero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Nonzero entries in ascending symbol order.
    pub fn present(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(symbol, &c)| (symbol as u8, c))
    }
}
