//! Semi-static frequency model with cumulative totals.
//!
//! Symbols 0-255 are bytes, symbol 256 is the end-of-stream marker with a
//! count of 1. `totals[s]..totals[s + 1]` is the slice of the scale owned by
//! symbol `s`, and `totals[257]` is the scale itself.

use bytepress_core::error::{BytePressError, Result};
use bytepress_core::frequency::{FrequencyTable, SYMBOL_COUNT};

/// Index of the end-of-stream symbol.
pub const EOF_SYMBOL: usize = 256;

/// Largest scale the 16-bit coder can resolve.
///
/// After normalization `high - low` always exceeds `0x4000`, so a scale
/// below that keeps every symbol's interval non-empty.
pub const MAX_SCALE: u32 = 0x3FFF;

/// Cumulative count window for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    /// Cumulative count below the symbol.
    pub low_count: u32,
    /// Cumulative count up to and including the symbol.
    pub high_count: u32,
    /// Total count of the model.
    pub scale: u32,
}

/// Frequency model shared by the encoder and decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyModel {
    table: FrequencyTable,
    totals: [u32; SYMBOL_COUNT + 2],
}

impl FrequencyModel {
    /// Build a model from the byte counts of `data`.
    pub fn from_data(data: &[u8]) -> Self {
        Self::from_scaled(&FrequencyTable::from_data(data))
    }

    /// Build a model from an already-scaled table.
    ///
    /// Weights are halved (keeping used bytes at 1 or more) until the scale
    /// fits in [`MAX_SCALE`]. Applying this to its own [`table`] is a no-op.
    ///
    /// [`table`]: FrequencyModel::table
    pub fn from_scaled(table: &FrequencyTable) -> Self {
        let mut weights = *table.weights();
        let mut halvings = 0;

        while scale_of(&weights) > MAX_SCALE {
            for weight in weights.iter_mut().filter(|w| **w > 0) {
                *weight = (*weight / 2).max(1);
            }
            halvings += 1;
        }
        if halvings > 0 {
            log::trace!("arith: halved model weights {} times", halvings);
        }

        let mut totals = [0u32; SYMBOL_COUNT + 2];
        for (i, &weight) in weights.iter().enumerate() {
            totals[i + 1] = totals[i] + u32::from(weight);
        }
        totals[EOF_SYMBOL + 1] = totals[EOF_SYMBOL] + 1;

        Self {
            table: FrequencyTable::from_weights(weights),
            totals,
        }
    }

    /// The scaled weights in use.
    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Total count, end-of-stream symbol included.
    pub fn scale(&self) -> u32 {
        self.totals[EOF_SYMBOL + 1]
    }

    /// Cumulative totals, `SYMBOL_COUNT + 2` entries.
    pub fn totals(&self) -> &[u32] {
        &self.totals
    }

    /// Window for a byte.
    pub fn symbol(&self, byte: u8) -> Result<Symbol> {
        let index = byte as usize;
        if self.totals[index] == self.totals[index + 1] {
            return Err(BytePressError::corrupt_metadata(format!(
                "byte {:#04x} has no probability in the model",
                byte
            )));
        }
        Ok(self.window(index))
    }

    /// Window for the end-of-stream symbol.
    pub fn eof(&self) -> Symbol {
        self.window(EOF_SYMBOL)
    }

    /// Symbol owning cumulative position `count` (`count < scale`).
    pub fn find(&self, count: u32) -> Option<(usize, Symbol)> {
        if count >= self.scale() {
            return None;
        }
        let index = self.totals.partition_point(|&t| t <= count) - 1;
        Some((index, self.window(index)))
    }

    fn window(&self, index: usize) -> Symbol {
        Symbol {
            low_count: self.totals[index],
            high_count: self.totals[index + 1],
            scale: self.scale(),
        }
    }
}

fn scale_of(weights: &[u8; SYMBOL_COUNT]) -> u32 {
    weights.iter().map(|&w| u32::from(w)).sum::<u32>() + 1
}
