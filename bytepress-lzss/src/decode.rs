//! LZSS token parsing and expansion.

use crate::MIN_MATCH_LENGTH;
use crate::token::{LzssToken, unpack_match};
use bytepress_core::bitstream::{BitReader, BitSource};
use bytepress_core::error::{BytePressError, Result};

/// Parse a buffer produced by [`serialize_tokens`](crate::serialize_tokens).
pub fn parse_tokens(data: &[u8]) -> Result<Vec<LzssToken>> {
    let Some(&final_bits) = data.first() else {
        return Err(BytePressError::invalid_format(0, "missing LZSS header byte"));
    };

    let mut reader = BitReader::with_final_byte_bits(data, final_bits)?;
    reader.read_bits(8)?;

    let mut tokens = Vec::new();
    while !reader.is_exhausted() {
        if reader.read_bit()? {
            tokens.push(LzssToken::Literal(reader.read_bits(8)? as u8));
        } else {
            let (offset, length) = unpack_match(reader.read_bits(16)? as u16)?;
            tokens.push(LzssToken::Match { offset, length });
        }
    }

    Ok(tokens)
}

/// Replay tokens into the bytes they describe.
///
/// Matches are copied one byte at a time, since a source closer than the
/// match length overlaps the bytes being produced.
pub fn expand_tokens(tokens: &[LzssToken]) -> Result<Vec<u8>> {
    let mut output: Vec<u8> = Vec::with_capacity(tokens.len() * 2);

    for token in tokens {
        match *token {
            LzssToken::Literal(byte) => output.push(byte),
            LzssToken::Match { offset, length } => {
                let offset = offset as usize;
                if offset == 0 || offset > output.len() {
                    return Err(BytePressError::invalid_format(
                        output.len() as u64,
                        format!(
                            "match offset {} reaches before the start of {} decoded bytes",
                            offset,
                            output.len()
                        ),
                    ));
                }
                if (length as usize) < MIN_MATCH_LENGTH {
                    return Err(BytePressError::invalid_format(
                        output.len() as u64,
                        format!("match length {} below minimum", length),
                    ));
                }

                for _ in 0..length {
                    let byte = output[output.len() - offset];
                    output.push(byte);
                }
            }
        }
    }

    Ok(output)
}

/// Decompress a buffer produced by [`compress`](crate::compress).
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let tokens = parse_tokens(data)?;
    let output = expand_tokens(&tokens)?;

    log::debug!(
        "lzss: decompressed {} bytes into {} bytes ({} tokens)",
        data.len(),
        output.len(),
        tokens.len()
    );

    Ok(output)
}
