//! # BytePress Huffman
//!
//! Static Huffman coding with a compact range-based side table.
//!
//! ## Format
//!
//! Encoding produces two buffers:
//!
//! - **metadata**: `[final_byte_bits][start][end][weights...]...`, one triple per
//!   contiguous run of used byte values, weights scaled into 1-255
//! - **payload**: concatenated MSB-first code words
//!
//! The decoder rebuilds the identical tree from the metadata. Tree
//! construction breaks weight ties by insertion order, so the same table
//! always yields the same codes.
//!
//! ## Example
//!
//! ```rust
//! use bytepress_huffman::{compress, decompress};
//!
//! let original = b"abracadabra";
//! let block = compress(original).unwrap();
//! let restored = decompress(&block.metadata, &block.payload).unwrap();
//! assert_eq!(restored, original);
//! ```
//!
//! ## Async dispatch
//!
//! With the `async` feature, [`compress_async`] and [`decompress_async`] run
//! a call on the tokio blocking pool and return an awaitable handle.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod code;
pub mod decode;
#[cfg(feature = "async")]
pub mod dispatch;
pub mod encode;
pub mod metadata;
pub mod tree;

pub use code::{Code, CodeLookup, CodeTable};
pub use decode::{decode, decode_block};
#[cfg(feature = "async")]
pub use dispatch::{HuffmanTask, compress_async, decompress_async};
pub use encode::{code_table_for, encode};
pub use metadata::HuffmanBlock;
pub use tree::{HuffmanTree, Node};

use bytepress_core::error::Result;
use bytepress_core::traits::BlockCodec;

/// Compress `data` into a metadata block and payload.
pub fn compress(data: &[u8]) -> Result<HuffmanBlock> {
    encode(data)
}

/// Decompress a metadata block and payload.
pub fn decompress(metadata: &[u8], payload: &[u8]) -> Result<Vec<u8>> {
    decode(metadata, payload)
}

/// Huffman codec producing single framed buffers.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCodec;

impl HuffmanCodec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self
    }
}

impl BlockCodec for HuffmanCodec {
    fn name(&self) -> &'static str {
        "huffman"
    }

    fn compress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(encode(input)?.to_bytes())
    }

    fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        decode_block(&HuffmanBlock::from_bytes(input)?)
    }
}
