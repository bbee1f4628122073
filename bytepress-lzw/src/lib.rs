//! # BytePress LZW
//!
//! LZW (Lempel-Ziv-Welch) compression with a dictionary that lives as long
//! as the codec instance.
//!
//! ## Format
//!
//! - Codes 0-255 are the single bytes; learned sequences get 256 and up
//! - Codes are plain `u32` values, serialized as 32-bit big-endian integers
//!   by [`codes_to_bytes`]
//! - No clear or end-of-information codes; the code count is the stream length
//!
//! ## Persistent state
//!
//! Entries learned by one call stay available to the next, so a stream split
//! into chunks compresses better than each chunk alone. Both sides must see
//! the same chunks in the same order. [`LzwCodec::reset`] returns the
//! dictionary to the 256 single-byte entries.
//!
//! A codec is `Send` but mutated by every call; share it behind a `Mutex`.
//!
//! ## Example
//!
//! ```rust
//! use bytepress_lzw::LzwCodec;
//!
//! let mut codec = LzwCodec::new();
//! let codes = codec.encode(b"TOBEORNOTTOBEORTOBEORNOT");
//! assert_eq!(codes.len(), 16);
//! assert_eq!(codec.decode(&codes).unwrap(), b"TOBEORNOTTOBEORTOBEORNOT");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod codes;
mod config;
mod decoder;
mod dictionary;
mod encoder;

pub use codes::{CODE_BYTES, bytes_to_codes, codes_to_bytes};
pub use config::{LITERAL_CODES, LzwConfig};
pub use decoder::LzwDecoder;
pub use dictionary::{DecodeDictionary, EncodeDictionary};
pub use encoder::LzwEncoder;

use bytepress_core::error::Result;
use bytepress_core::traits::BlockCodec;

/// LZW codec owning one encoder and one decoder dictionary.
#[derive(Debug, Clone)]
pub struct LzwCodec {
    encoder: LzwEncoder,
    decoder: LzwDecoder,
}

impl LzwCodec {
    /// Create a codec using the full 32-bit code space.
    pub fn new() -> Self {
        Self {
            encoder: LzwEncoder::default(),
            decoder: LzwDecoder::default(),
        }
    }

    /// Create a codec with a custom code capacity.
    pub fn with_config(config: LzwConfig) -> Result<Self> {
        Ok(Self {
            encoder: LzwEncoder::new(config)?,
            decoder: LzwDecoder::new(config)?,
        })
    }

    /// Compress `data` into codes, learning from it.
    pub fn encode(&mut self, data: &[u8]) -> Vec<u32> {
        self.encoder.encode(data)
    }

    /// Decompress codes, learning from them.
    pub fn decode(&mut self, codes: &[u32]) -> Result<Vec<u8>> {
        self.decoder.decode(codes)
    }

    /// Return both dictionaries to the single-byte entries.
    pub fn reset_state(&mut self) {
        self.encoder.reset();
        self.decoder.reset();
    }

    /// Number of codes in the encoder dictionary.
    pub fn dictionary_len(&self) -> u64 {
        self.encoder.dictionary().len()
    }

    /// Next code the encoder will assign.
    pub fn next_code(&self) -> u64 {
        self.encoder.dictionary().next_code()
    }

    /// The encoder half.
    pub fn encoder(&self) -> &LzwEncoder {
        &self.encoder
    }

    /// The decoder half.
    pub fn decoder(&self) -> &LzwDecoder {
        &self.decoder
    }
}

impl Default for LzwCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockCodec for LzwCodec {
    fn name(&self) -> &'static str {
        "lzw"
    }

    fn compress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(codes_to_bytes(&self.encode(input)))
    }

    fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let codes = bytes_to_codes(input)?;
        self.decode(&codes)
    }

    fn reset(&mut self) {
        self.reset_state();
    }
}

/// Compress `data` with a fresh dictionary.
pub fn compress(data: &[u8]) -> Vec<u32> {
    LzwCodec::new().encode(data)
}

/// Decompress `codes` with a fresh dictionary.
pub fn decompress(codes: &[u32]) -> Result<Vec<u8>> {
    LzwCodec::new().decode(codes)
}
