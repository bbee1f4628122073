//! Huffman side table and block framing.
//!
//! The metadata block is
//!
//! ```text
//! [final_byte_bits: u8][start: u8][end: u8][weight...] [start][end][weight...] ...
//! ```
//!
//! `final_byte_bits` is the number of meaningful bits in the last payload
//! byte. It is written as 0 and patched once the payload is complete.

use bytepress_core::error::{BytePressError, Result};
use bytepress_core::frequency::FrequencyTable;

/// Encoded output: side table plus bit-packed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanBlock {
    /// Final-byte marker followed by frequency range triples.
    pub metadata: Vec<u8>,
    /// Concatenated code words.
    pub payload: Vec<u8>,
}

impl HuffmanBlock {
    /// Frame the block as one buffer: `[metadata_len: u16 BE][metadata][payload]`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 + self.metadata.len() + self.payload.len());
        out.extend_from_slice(&(self.metadata.len() as u16).to_be_bytes());
        out.extend_from_slice(&self.metadata);
        out.extend_from_slice(&self.payload);
        out
    }

    /// Split a buffer produced by [`HuffmanBlock::to_bytes`].
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < 2 {
            return Err(BytePressError::invalid_format(
                0,
                "missing metadata length prefix",
            ));
        }
        let len = u16::from_be_bytes([data[0], data[1]]) as usize;
        if data.len() < 2 + len {
            return Err(BytePressError::invalid_format(
                2,
                format!(
                    "metadata declares {} bytes, {} available",
                    len,
                    data.len() - 2
                ),
            ));
        }

        Ok(Self {
            metadata: data[2..2 + len].to_vec(),
            payload: data[2 + len..].to_vec(),
        })
    }

    /// Total encoded size in bytes (unframed).
    pub fn encoded_len(&self) -> usize {
        self.metadata.len() + self.payload.len()
    }
}

/// Serialize a frequency table, reserving byte 0 for the final-byte marker.
pub fn write_metadata(table: &FrequencyTable) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + 2 + table.distinct_symbols());
    out.push(0);
    table.write_ranges(&mut out);
    out
}

/// Parse a metadata block into its final-byte marker and frequency table.
pub fn read_metadata(metadata: &[u8]) -> Result<(u8, FrequencyTable)> {
    let (&final_bits, ranges) = metadata
        .split_first()
        .ok_or_else(|| BytePressError::corrupt_metadata("metadata block is empty"))?;

    if final_bits > 8 {
        return Err(BytePressError::corrupt_metadata(format!(
            "final byte declares {} bits",
            final_bits
        )));
    }

    let table = FrequencyTable::read_ranges(ranges)?;
    if table.distinct_symbols() == 0 {
        return Err(BytePressError::corrupt_metadata(
            "frequency table has no symbols",
        ));
    }

    Ok((final_bits, table))
}
