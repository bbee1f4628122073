//! # BytePress Core
//!
//! Core components shared by the BytePress codecs.
//!
//! - [`bitstream`]: MSB-first bit cursors over slices, words, scalars and growable buffers
//! - [`frequency`]: Scaled byte frequency tables and their range-triple wire format
//! - [`hash`]: djb2 rolling hash used as a lookup accelerator
//! - [`traits`]: The [`BlockCodec`] trait implemented by every codec
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Codecs                                                  │
//! │     Huffman, LZSS, LZW, RLE, Arithmetic                 │
//! ├─────────────────────────────────────────────────────────┤
//! │ Models (this crate)                                     │
//! │     FrequencyTable, Djb2                                │
//! ├─────────────────────────────────────────────────────────┤
//! │ Bits (this crate)                                       │
//! │     BitReader/BitWriter, word and scalar cursors        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use bytepress_core::bitstream::{BitReader, BitSink, BitSource, BitWriter};
//! use bytepress_core::frequency::FrequencyTable;
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b1011, 4).unwrap();
//! let used = writer.bits_in_current_byte();
//! let bytes = writer.into_inner();
//!
//! let mut reader = BitReader::with_final_byte_bits(&bytes, used).unwrap();
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1011);
//!
//! let table = FrequencyTable::from_data(b"hello");
//! assert_eq!(table.weight(b'l'), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod frequency;
pub mod hash;
pub mod traits;

// Re-exports for convenience
pub use bitstream::{
    BitReader, BitSink, BitSource, BitWord, BitWriter, ScalarBitReader, ScalarBitWriter,
    WordBitReader,
};
pub use error::{BytePressError, Result};
pub use frequency::{FrequencyTable, SYMBOL_COUNT};
pub use hash::Djb2;
pub use traits::BlockCodec;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitSink, BitSource, BitWriter};
    pub use crate::error::{BytePressError, Result};
    pub use crate::frequency::FrequencyTable;
    pub use crate::traits::BlockCodec;
}
