//! # BytePress RLE
//!
//! PackBits run-length encoding.
//!
//! Each span starts with a signed control byte:
//!
//! - `0..=127`: copy the next `n + 1` bytes literally
//! - `-127..=-1`: repeat the next byte `1 - n` times
//! - `-128`: repeat the next byte 129 times (accepted, never produced)
//!
//! Runs of two or more identical bytes become run spans; everything else is
//! gathered into literal spans. Both span kinds cover at most 128 bytes.
//!
//! ```rust
//! use bytepress_rle::{compress, decompress};
//!
//! assert_eq!(compress(b"AAAAA"), vec![0xFC, b'A']);
//! assert_eq!(decompress(&[0xFC, b'A']).unwrap(), b"AAAAA");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

use bytepress_core::error::{BytePressError, Result};
use bytepress_core::traits::BlockCodec;

/// Longest span a single control byte describes on output.
pub const MAX_SPAN: usize = 128;

/// Encode `data` with PackBits.
pub fn compress(data: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len() + data.len() / MAX_SPAN + 1);
    let mut i = 0;

    while i < data.len() {
        let byte = data[i];
        let mut run_len = 1;

        // Count consecutive identical bytes
        while i + run_len < data.len() && data[i + run_len] == byte && run_len < MAX_SPAN {
            run_len += 1;
        }

        if run_len >= 2 {
            result.push((1 - run_len as i16) as i8 as u8);
            result.push(byte);
            i += run_len;
        } else {
            // Gather bytes until the next pair repeats
            let start = i;
            while i < data.len() && i - start < MAX_SPAN {
                if i + 1 < data.len() && data[i + 1] == data[i] {
                    break;
                }
                i += 1;
            }
            result.push((i - start - 1) as u8);
            result.extend_from_slice(&data[start..i]);
        }
    }

    log::debug!(
        "rle: compressed {} bytes into {} bytes",
        data.len(),
        result.len()
    );

    result
}

/// Decode a PackBits buffer.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut result = Vec::with_capacity(data.len() * 2);
    let mut i = 0;

    while i < data.len() {
        let control = data[i] as i8;
        i += 1;

        if control >= 0 {
            let len = control as usize + 1;
            let span = data.get(i..i + len).ok_or_else(|| {
                BytePressError::invalid_format(
                    i as u64 - 1,
                    format!(
                        "literal span of {} bytes truncated to {}",
                        len,
                        data.len() - i
                    ),
                )
            })?;
            result.extend_from_slice(span);
            i += len;
        } else {
            let count = 1 + control.unsigned_abs() as usize;
            let &byte = data.get(i).ok_or_else(|| {
                BytePressError::invalid_format(i as u64 - 1, "run missing its byte")
            })?;
            result.resize(result.len() + count, byte);
            i += 1;
        }
    }

    log::debug!(
        "rle: decompressed {} bytes into {} bytes",
        data.len(),
        result.len()
    );

    Ok(result)
}

/// Stateless PackBits codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct RleCodec;

impl RleCodec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self
    }
}

impl BlockCodec for RleCodec {
    fn name(&self) -> &'static str {
        "rle"
    }

    fn compress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(compress(input))
    }

    fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        decompress(input)
    }
}
