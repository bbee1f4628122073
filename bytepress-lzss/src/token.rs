//! LZSS tokens and the packed offset/length field.

use crate::{INDEX_BIT_COUNT, LENGTH_BIT_COUNT, MAX_MATCH_LENGTH, MIN_MATCH_LENGTH, WINDOW_SIZE};
use bytepress_core::bitstream::{BitSink, BitSource, ScalarBitReader, ScalarBitWriter};
use bytepress_core::error::{BytePressError, Result};

/// LZSS token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LzssToken {
    /// A literal byte.
    Literal(u8),
    /// A copy of earlier output.
    Match {
        /// Distance back from the current output position (1-4096).
        offset: u16,
        /// Number of bytes to copy (3-15).
        length: u8,
    },
}

impl LzssToken {
    /// Number of output bytes this token produces.
    pub fn output_len(&self) -> usize {
        match self {
            Self::Literal(_) => 1,
            Self::Match { length, .. } => *length as usize,
        }
    }
}

/// Pack a match into its 16-bit field: offset in the high 12 bits, length
/// in the low 4. An offset of 4096 is stored as 0.
pub fn pack_match(offset: u16, length: u8) -> Result<u16> {
    if offset == 0 || offset as usize > WINDOW_SIZE {
        return Err(BytePressError::invalid_format(
            0,
            format!("match offset {} outside 1..={}", offset, WINDOW_SIZE),
        ));
    }
    if (length as usize) < MIN_MATCH_LENGTH || length as usize > MAX_MATCH_LENGTH {
        return Err(BytePressError::invalid_format(
            0,
            format!(
                "match length {} outside {}..={}",
                length, MIN_MATCH_LENGTH, MAX_MATCH_LENGTH
            ),
        ));
    }

    let stored = u32::from(offset) % WINDOW_SIZE as u32;
    let mut field = ScalarBitWriter::<2>::new();
    field.write_bits(stored, INDEX_BIT_COUNT)?;
    field.write_bits(u32::from(length), LENGTH_BIT_COUNT)?;
    Ok(u16::from_be_bytes(field.into_bytes()))
}

/// Split a 16-bit field into `(offset, length)`.
///
/// The length is returned as stored; callers validate it.
pub fn unpack_match(field: u16) -> Result<(u16, u8)> {
    let mut reader = ScalarBitReader::new(field);
    let stored = reader.read_bits(INDEX_BIT_COUNT)? as u16;
    let length = reader.read_bits(LENGTH_BIT_COUNT)? as u8;
    let offset = if stored == 0 { WINDOW_SIZE as u16 } else { stored };
    Ok((offset, length))
}
