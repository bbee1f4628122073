//! Huffman decoder.
//!
//! Bits are accumulated into both an exact [`Code`] and a djb2 hash of its
//! `'0'`/`'1'` string. Each time the hash hits a bucket of the inverted code
//! table and the exact code matches, the symbol is emitted and both
//! accumulators restart.

use crate::code::{Code, CodeLookup, CodeTable};
use crate::metadata::{HuffmanBlock, read_metadata};
use crate::tree::HuffmanTree;
use bytepress_core::bitstream::{BitReader, BitSource};
use bytepress_core::error::{BytePressError, Result};
use bytepress_core::hash::Djb2;

/// Decode a metadata block and payload back into the original bytes.
pub fn decode(metadata: &[u8], payload: &[u8]) -> Result<Vec<u8>> {
    let (final_bits, table) = read_metadata(metadata)?;

    let tree = HuffmanTree::build(&table)
        .ok_or_else(|| BytePressError::corrupt_metadata("frequency table has no symbols"))?;
    let codes = CodeTable::from_tree(&tree)?;
    let max_length = codes.max_length();
    let lookup = CodeLookup::new(&codes);

    let mut reader = BitReader::with_final_byte_bits(payload, final_bits)?;
    let mut output = Vec::with_capacity(payload.len() + payload.len() / 3);

    let mut hasher = Djb2::new();
    let mut current = Code::EMPTY;

    while !reader.is_exhausted() {
        let bit = reader.read_bit()?;
        hasher.push(if bit { b'1' } else { b'0' });
        current.push(bit);

        if let Some(byte) = lookup.find(hasher.value(), &current) {
            output.push(byte);
            hasher.reset();
            current = Code::EMPTY;
        } else if current.len() >= max_length {
            return Err(BytePressError::corrupt_metadata(format!(
                "no code matches bits {} at bit {}",
                current,
                reader.bits_read()
            )));
        }
    }

    if !current.is_empty() {
        return Err(BytePressError::corrupt_metadata(format!(
            "payload ends inside a code ({} dangling bits)",
            current.len()
        )));
    }

    log::debug!(
        "huffman: decoded {} payload bytes into {} bytes",
        payload.len(),
        output.len()
    );

    Ok(output)
}

/// Decode a [`HuffmanBlock`].
pub fn decode_block(block: &HuffmanBlock) -> Result<Vec<u8>> {
    decode(&block.metadata, &block.payload)
}
