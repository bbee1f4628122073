//! LZSS match finder and token serialization.

use crate::token::{LzssToken, pack_match};
use crate::{LOOK_AHEAD_BUFFER_SIZE, MAX_MATCH_LENGTH, MIN_MATCH_LENGTH, WINDOW_SIZE};
use bytepress_core::bitstream::{BitSink, BitWriter};
use bytepress_core::error::Result;

/// Longest earlier match for `data[pos..]`, as `(offset, length)`.
///
/// Offsets are scanned upward from 1, and only a strictly longer match
/// replaces the best so far, so ties go to the nearest source. The source
/// may run into the bytes being matched.
pub fn find_longest_match(data: &[u8], pos: usize) -> (usize, usize) {
    let max_len = MAX_MATCH_LENGTH
        .min(LOOK_AHEAD_BUFFER_SIZE)
        .min(data.len().saturating_sub(pos));

    let mut best = (0, 0);
    for offset in 1..=WINDOW_SIZE.min(pos) {
        let start = pos - offset;
        let mut len = 0;
        while len < max_len && data[start + len] == data[pos + len] {
            len += 1;
        }

        if len > best.1 {
            best = (offset, len);
            if len == max_len {
                break;
            }
        }
    }
    best
}

/// Split `data` into literal and match tokens.
pub fn tokenize(data: &[u8]) -> Vec<LzssToken> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < data.len() {
        let (offset, length) = find_longest_match(data, pos);
        if length >= MIN_MATCH_LENGTH {
            tokens.push(LzssToken::Match {
                offset: offset as u16,
                length: length as u8,
            });
            pos += length;
        } else {
            tokens.push(LzssToken::Literal(data[pos]));
            pos += 1;
        }
    }

    tokens
}

/// Serialize tokens into a self-delimiting buffer.
///
/// Byte 0 holds the number of meaningful bits in the final byte. Each token
/// follows as a flag bit (1 = literal, 0 = match) and then either the 8-bit
/// literal or the 16-bit packed match field.
pub fn serialize_tokens(tokens: &[LzssToken]) -> Result<Vec<u8>> {
    let mut writer = BitWriter::with_capacity(1 + tokens.len() * 2);
    writer.write_bits(0, 8)?;

    for token in tokens {
        match *token {
            LzssToken::Literal(byte) => {
                writer.write_bit(true)?;
                writer.write_bits(u32::from(byte), 8)?;
            }
            LzssToken::Match { offset, length } => {
                writer.write_bit(false)?;
                writer.write_bits(u32::from(pack_match(offset, length)?), 16)?;
            }
        }
    }

    let final_bits = writer.bits_in_current_byte();
    writer.bytes_mut()[0] = final_bits;
    Ok(writer.into_inner())
}

/// Compress `data`.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let tokens = tokenize(data);
    let output = serialize_tokens(&tokens)?;

    log::debug!(
        "lzss: compressed {} bytes into {} bytes ({} tokens)",
        data.len(),
        output.len(),
        tokens.len()
    );

    Ok(output)
}
