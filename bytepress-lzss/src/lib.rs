//! # BytePress LZSS
//!
//! LZSS (Lempel-Ziv-Storer-Szymanski) compression over a 4 KiB window.
//!
//! ## Format
//!
//! ```text
//! [final_byte_bits: u8][token bits ...]
//!
//! literal: 1 bbbbbbbb
//! match:   0 oooooooooooo llll    offset 1-4095 raw, 4096 stored as 0
//! ```
//!
//! All fields are written MSB-first. The header byte counts the meaningful
//! bits of the last byte so trailing padding is never read as a token.
//!
//! ## Example
//!
//! ```rust
//! use bytepress_lzss::{compress, decompress};
//!
//! let original = b"abcabcabcabcabcabc";
//! let packed = compress(original).unwrap();
//! assert!(packed.len() < original.len());
//! assert_eq!(decompress(&packed).unwrap(), original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod decode;
pub mod encode;
pub mod token;

pub use decode::{decompress, expand_tokens, parse_tokens};
pub use encode::{compress, find_longest_match, serialize_tokens, tokenize};
pub use token::{LzssToken, pack_match, unpack_match};

use bytepress_core::error::Result;
use bytepress_core::traits::BlockCodec;

/// Size of the sliding window in bytes.
pub const WINDOW_SIZE: usize = 4096;
/// Bytes examined ahead of the current position.
pub const LOOK_AHEAD_BUFFER_SIZE: usize = 18;
/// Bits in the stored offset.
pub const INDEX_BIT_COUNT: u8 = 12;
/// Bits in the stored length.
pub const LENGTH_BIT_COUNT: u8 = 4;
/// Shortest match worth a token.
pub const MIN_MATCH_LENGTH: usize = 3;
/// Longest match the length field can carry.
pub const MAX_MATCH_LENGTH: usize = (1 << LENGTH_BIT_COUNT) - 1;

/// Stateless LZSS codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct LzssCodec;

impl LzssCodec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self
    }
}

impl BlockCodec for LzssCodec {
    fn name(&self) -> &'static str {
        "lzss"
    }

    fn compress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        compress(input)
    }

    fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        decompress(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(MAX_MATCH_LENGTH, 15);
        assert_eq!(1 << INDEX_BIT_COUNT, WINDOW_SIZE);
    }

    #[test]
    fn test_codec_roundtrip() {
        let mut codec = LzssCodec::new();
        let original = b"This is a test of compression! ".repeat(10);
        let packed = codec.compress(&original).unwrap();
        assert!(packed.len() < original.len());
        assert_eq!(codec.decompress(&packed).unwrap(), original);
        assert_eq!(codec.roundtrip(b"").unwrap(), b"");
    }
}
