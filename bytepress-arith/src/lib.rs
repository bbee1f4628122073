//! # BytePress Arithmetic
//!
//! Semi-static arithmetic coding with 16-bit `low`/`high` registers and an
//! explicit end-of-stream symbol.
//!
//! ## Format
//!
//! ```text
//! [range_count: u8][range triples ...][coded bits ...]
//! ```
//!
//! The range triples are the scaled byte weights in the same layout as the
//! Huffman metadata. The decoder rebuilds the cumulative model from them and
//! decodes until it reaches the end-of-stream symbol, so no length is stored.
//!
//! ## Example
//!
//! ```rust
//! use bytepress_arith::{compress, decompress};
//!
//! let data = b"abracadabra";
//! let packed = compress(data).unwrap();
//! assert_eq!(decompress(&packed).unwrap(), data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
pub mod model;

pub use decoder::ArithmeticDecoder;
pub use encoder::ArithmeticEncoder;
pub use model::{EOF_SYMBOL, FrequencyModel, MAX_SCALE, Symbol};

use bytepress_core::error::{BytePressError, Result};
use bytepress_core::frequency::FrequencyTable;
use bytepress_core::traits::BlockCodec;

/// Compress `data` into a self-describing block.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let model = FrequencyModel::from_data(data);

    let mut output = vec![0u8];
    let ranges = model.table().write_ranges(&mut output);
    output[0] = ranges as u8;
    let header_len = output.len();

    let mut encoder = ArithmeticEncoder::new();
    encoder.encode_all(&model, data)?;
    output.extend_from_slice(&encoder.finish()?);

    log::debug!(
        "arith: compressed {} bytes into {} bytes ({} distinct symbols, {} header bytes, scale {})",
        data.len(),
        output.len(),
        model.table().distinct_symbols(),
        header_len,
        model.scale()
    );

    Ok(output)
}

/// Decompress a block produced by [`compress`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let Some(&range_count) = data.first() else {
        return Err(BytePressError::corrupt_metadata("missing range count"));
    };

    let (table, used) = FrequencyTable::read_range_count(&data[1..], range_count as usize)?;
    if table.distinct_symbols() == 0 {
        return Err(BytePressError::corrupt_metadata("model has no symbols"));
    }

    let model = FrequencyModel::from_scaled(&table);
    let mut decoder = ArithmeticDecoder::new(&data[1 + used..])?;
    let output = decoder.decode_all(&model)?;

    log::debug!(
        "arith: decompressed {} bytes into {} bytes",
        data.len(),
        output.len()
    );

    Ok(output)
}

/// Stateless arithmetic codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArithmeticCodec;

impl ArithmeticCodec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self
    }
}

impl BlockCodec for ArithmeticCodec {
    fn name(&self) -> &'static str {
        "arith"
    }

    fn compress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        compress(input)
    }

    fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        decompress(input)
    }
}
