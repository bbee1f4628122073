//! Arithmetic encoder with 16-bit registers.

use crate::model::{FrequencyModel, Symbol};
use bytepress_core::bitstream::{BitSink, BitWriter};
use bytepress_core::error::Result;

const TOP_BIT: u32 = 0x8000;
const SECOND_BIT: u32 = 0x4000;
const REGISTER_MASK: u32 = 0xFFFF;

/// Interval-narrowing encoder.
///
/// Underflow (the interval straddling the midpoint while shrinking toward
/// it) is tracked as a count of pending bits, emitted as the complement of
/// the next resolved top bit.
#[derive(Debug)]
pub struct ArithmeticEncoder {
    low: u32,
    high: u32,
    underflow_bits: u32,
    writer: BitWriter,
}

impl ArithmeticEncoder {
    /// Create an encoder with the full interval.
    pub fn new() -> Self {
        Self {
            low: 0,
            high: REGISTER_MASK,
            underflow_bits: 0,
            writer: BitWriter::new(),
        }
    }

    /// Narrow the interval to `symbol` and shift out settled bits.
    pub fn encode_symbol(&mut self, symbol: Symbol) -> Result<()> {
        let range = u64::from(self.high - self.low) + 1;
        let scale = u64::from(symbol.scale);
        self.high = self.low + (range * u64::from(symbol.high_count) / scale) as u32 - 1;
        self.low += (range * u64::from(symbol.low_count) / scale) as u32;

        loop {
            if self.high & TOP_BIT == self.low & TOP_BIT {
                let bit = self.high & TOP_BIT != 0;
                self.writer.write_bit(bit)?;
                while self.underflow_bits > 0 {
                    self.writer.write_bit(!bit)?;
                    self.underflow_bits -= 1;
                }
            } else if self.low & SECOND_BIT != 0 && self.high & SECOND_BIT == 0 {
                self.underflow_bits += 1;
                self.low &= SECOND_BIT - 1;
                self.high |= SECOND_BIT;
            } else {
                return Ok(());
            }

            self.low = (self.low << 1) & REGISTER_MASK;
            self.high = ((self.high << 1) | 1) & REGISTER_MASK;
        }
    }

    /// Encode every byte of `data` followed by the end-of-stream symbol.
    pub fn encode_all(&mut self, model: &FrequencyModel, data: &[u8]) -> Result<()> {
        for &byte in data {
            self.encode_symbol(model.symbol(byte)?)?;
        }
        self.encode_symbol(model.eof())
    }

    /// Emit the bits that pin a value inside the final interval.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let bit = self.low & SECOND_BIT != 0;
        self.writer.write_bit(bit)?;
        self.underflow_bits += 1;
        while self.underflow_bits > 0 {
            self.writer.write_bit(!bit)?;
            self.underflow_bits -= 1;
        }
        Ok(self.writer.into_inner())
    }
}

impl Default for ArithmeticEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        // Two equal halves: each symbol settles exactly one bit.
        let half_low = Symbol {
            low_count: 0,
            high_count: 1,
            scale: 2,
        };
        let half_high = Symbol {
            low_count: 1,
            high_count: 2,
            scale: 2,
        };

        let mut encoder = ArithmeticEncoder::new();
        encoder.encode_symbol(half_high).unwrap();
        encoder.encode_symbol(half_low).unwrap();
        encoder.encode_symbol(half_high).unwrap();
        // 1 0 1, then flush: low=0 -> 0 1
        assert_eq!(encoder.finish().unwrap(), vec![0b1010_1000]);
    }

    #[test]
    fn test_eof_only() {
        let model = FrequencyModel::from_data(b"");
        let mut encoder = ArithmeticEncoder::new();
        encoder.encode_all(&model, b"").unwrap();
        assert!(!encoder.finish().unwrap().is_empty());
    }
}
