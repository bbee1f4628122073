//! Scaled byte frequency tables and their range-triple wire format.
//!
//! Raw byte counts are scaled into `0..=255` so that a table fits in one byte
//! per symbol. Only used symbols are serialized: consecutive used byte
//! values are grouped into ranges, and each range is written as
//!
//! ```text
//! [start: u8][end: u8][weight[start]: u8] ... [weight[end]: u8]
//! ```
//!
//! Byte values outside every range have weight 0.

use crate::error::{BytePressError, Result};

/// Number of distinct byte symbols.
pub const SYMBOL_COUNT: usize = 256;

/// Byte value → scaled frequency (0 means unused).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    weights: [u8; SYMBOL_COUNT],
}

impl FrequencyTable {
    /// Build a scaled table from the byte counts of `data`.
    ///
    /// The divisor is `max_count / 255 + 1`, so the largest count maps near
    /// 255. Any byte that occurs at least once keeps a weight of at least 1.
    /// An empty input yields a table where byte 0 has weight 1, so that a
    /// tree can always be built from it.
    pub fn from_data(data: &[u8]) -> Self {
        let mut counts = [0u64; SYMBOL_COUNT];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        Self::from_counts(&counts)
    }

    /// Build a scaled table from raw counts.
    pub fn from_counts(counts: &[u64; SYMBOL_COUNT]) -> Self {
        let max = counts.iter().copied().max().unwrap_or(0);

        let mut weights = [0u8; SYMBOL_COUNT];
        if max == 0 {
            weights[0] = 1;
            return Self { weights };
        }

        let divisor = max / 255 + 1;
        for (weight, &count) in weights.iter_mut().zip(counts.iter()) {
            let scaled = (count / divisor) as u8;
            *weight = if scaled == 0 && count != 0 { 1 } else { scaled };
        }

        Self { weights }
    }

    /// Build a table from already-scaled weights.
    pub fn from_weights(weights: [u8; SYMBOL_COUNT]) -> Self {
        Self { weights }
    }

    /// Weight of a byte value.
    #[inline]
    pub fn weight(&self, byte: u8) -> u8 {
        self.weights[byte as usize]
    }

    /// All 256 weights.
    pub fn weights(&self) -> &[u8; SYMBOL_COUNT] {
        &self.weights
    }

    /// Number of byte values with nonzero weight.
    pub fn distinct_symbols(&self) -> usize {
        self.weights.iter().filter(|&&w| w > 0).count()
    }

    /// Contiguous runs of used byte values, ascending.
    pub fn used_ranges(&self) -> Vec<(u8, u8)> {
        let mut ranges: Vec<(u8, u8)> = Vec::new();

        for (byte, &weight) in self.weights.iter().enumerate() {
            if weight == 0 {
                continue;
            }
            let byte = byte as u8;
            match ranges.last_mut() {
                Some((_, end)) if *end as usize + 1 == byte as usize => *end = byte,
                _ => ranges.push((byte, byte)),
            }
        }

        ranges
    }

    /// Append the range triples of this table to `out`. Returns the number
    /// of ranges written.
    pub fn write_ranges(&self, out: &mut Vec<u8>) -> usize {
        let ranges = self.used_ranges();
        for &(start, end) in &ranges {
            out.push(start);
            out.push(end);
            out.extend_from_slice(&self.weights[start as usize..=end as usize]);
        }
        ranges.len()
    }

    /// Parse a block made entirely of range triples.
    pub fn read_ranges(data: &[u8]) -> Result<Self> {
        let (table, consumed) = Self::read_range_count(data, usize::MAX)?;
        debug_assert_eq!(consumed, data.len());
        Ok(table)
    }

    /// Parse at most `max_ranges` triples from the front of `data`, stopping
    /// at the end of the slice. Returns the table and the bytes consumed.
    pub fn read_range_count(data: &[u8], max_ranges: usize) -> Result<(Self, usize)> {
        let mut weights = [0u8; SYMBOL_COUNT];
        let mut pos = 0usize;
        let mut next_free = 0usize;
        let mut ranges = 0usize;

        while pos < data.len() && ranges < max_ranges {
            if pos + 2 > data.len() {
                return Err(BytePressError::corrupt_metadata(format!(
                    "range header truncated at byte {}",
                    pos
                )));
            }

            let start = data[pos] as usize;
            let end = data[pos + 1] as usize;
            if start > end {
                return Err(BytePressError::corrupt_metadata(format!(
                    "range {}..={} ends before it starts",
                    start, end
                )));
            }
            if start < next_free {
                return Err(BytePressError::corrupt_metadata(format!(
                    "range starting at {} overlaps or is out of order",
                    start
                )));
            }

            let body = pos + 2;
            let span = end - start + 1;
            if body + span > data.len() {
                return Err(BytePressError::corrupt_metadata(format!(
                    "range {}..={} needs {} weights, {} available",
                    start,
                    end,
                    span,
                    data.len() - body
                )));
            }

            weights[start..=end].copy_from_slice(&data[body..body + span]);
            pos = body + span;
            next_free = end + 1;
            ranges += 1;
        }

        if max_ranges != usize::MAX && ranges < max_ranges {
            return Err(BytePressError::corrupt_metadata(format!(
                "expected {} ranges, found {}",
                max_ranges, ranges
            )));
        }

        Ok((Self { weights }, pos))
    }
}
