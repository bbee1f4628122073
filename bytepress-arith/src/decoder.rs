//! Arithmetic decoder mirroring [`ArithmeticEncoder`](crate::ArithmeticEncoder).

use crate::model::{EOF_SYMBOL, FrequencyModel, Symbol};
use bytepress_core::bitstream::{BitReader, BitSource};
use bytepress_core::error::{BytePressError, Result};

const TOP_BIT: u32 = 0x8000;
const SECOND_BIT: u32 = 0x4000;
const REGISTER_MASK: u32 = 0xFFFF;

/// Bits that may be read past the end of the stream. The encoder's flush
/// leaves the decoder at most one register width behind.
const MAX_PADDING_BITS: u32 = 32;

/// Interval-narrowing decoder.
#[derive(Debug)]
pub struct ArithmeticDecoder<'a> {
    low: u32,
    high: u32,
    code: u32,
    reader: BitReader<'a>,
    padding_bits: u32,
}

impl<'a> ArithmeticDecoder<'a> {
    /// Start decoding `data`, priming the code register with 16 bits.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let mut decoder = Self {
            low: 0,
            high: REGISTER_MASK,
            code: 0,
            reader: BitReader::new(data),
            padding_bits: 0,
        };
        for _ in 0..16 {
            decoder.code = (decoder.code << 1) | decoder.next_bit()?;
        }
        Ok(decoder)
    }

    /// Next stream bit; zeros once the data runs out.
    fn next_bit(&mut self) -> Result<u32> {
        if self.reader.is_exhausted() {
            self.padding_bits += 1;
            if self.padding_bits > MAX_PADDING_BITS {
                return Err(BytePressError::invalid_format(
                    self.reader.bits_read() / 8,
                    "arithmetic stream ends before the end-of-stream symbol",
                ));
            }
            return Ok(0);
        }
        Ok(u32::from(self.reader.read_bit()?))
    }

    /// Decode the next symbol index (0-255 for bytes, 256 for end of stream).
    pub fn decode_symbol(&mut self, model: &FrequencyModel) -> Result<usize> {
        if self.code < self.low || self.code > self.high {
            return Err(self.corrupt());
        }

        let range = u64::from(self.high - self.low) + 1;
        let offset = u64::from(self.code - self.low) + 1;
        let count = (offset * u64::from(model.scale()) - 1) / range;

        let (index, symbol) = u32::try_from(count)
            .ok()
            .and_then(|count| model.find(count))
            .ok_or_else(|| self.corrupt())?;

        self.remove_symbol(symbol)?;
        Ok(index)
    }

    fn remove_symbol(&mut self, symbol: Symbol) -> Result<()> {
        let range = u64::from(self.high - self.low) + 1;
        let scale = u64::from(symbol.scale);
        self.high = self.low + (range * u64::from(symbol.high_count) / scale) as u32 - 1;
        self.low += (range * u64::from(symbol.low_count) / scale) as u32;

        loop {
            let settled = self.high & TOP_BIT == self.low & TOP_BIT;
            if !settled {
                if self.low & SECOND_BIT != 0 && self.high & SECOND_BIT == 0 {
                    self.code ^= SECOND_BIT;
                    self.low &= SECOND_BIT - 1;
                    self.high |= SECOND_BIT;
                } else {
                    return Ok(());
                }
            }

            self.low = (self.low << 1) & REGISTER_MASK;
            self.high = ((self.high << 1) | 1) & REGISTER_MASK;
            self.code = ((self.code << 1) | self.next_bit()?) & REGISTER_MASK;
        }
    }

    /// Decode bytes until the end-of-stream symbol.
    pub fn decode_all(&mut self, model: &FrequencyModel) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        loop {
            let index = self.decode_symbol(model)?;
            if index == EOF_SYMBOL {
                return Ok(output);
            }
            output.push(index as u8);
        }
    }

    fn corrupt(&self) -> BytePressError {
        BytePressError::invalid_format(
            self.reader.bits_read() / 8,
            "arithmetic code register left the current interval",
        )
    }
}
