//! Huffman encoder.

use crate::code::CodeTable;
use crate::metadata::{HuffmanBlock, write_metadata};
use crate::tree::HuffmanTree;
use bytepress_core::bitstream::{BitSink, BitWriter};
use bytepress_core::error::{BytePressError, Result};
use bytepress_core::frequency::FrequencyTable;

/// Build the code table that [`encode`] would use for `data`.
pub fn code_table_for(data: &[u8]) -> Result<CodeTable> {
    let table = FrequencyTable::from_data(data);
    let tree = HuffmanTree::build(&table)
        .ok_or_else(|| BytePressError::corrupt_metadata("frequency table has no symbols"))?;
    CodeTable::from_tree(&tree)
}

/// Encode `data` into a metadata block and a bit-packed payload.
///
/// # Algorithm
///
/// 1. Scale byte counts into a 0-255 frequency table
/// 2. Serialize the used ranges into the metadata block
/// 3. Build the tree and derive the code table
/// 4. Write each byte's code through a bit writer
/// 5. Patch `metadata[0]` with the bits used in the final payload byte
pub fn encode(data: &[u8]) -> Result<HuffmanBlock> {
    let table = FrequencyTable::from_data(data);
    let mut metadata = write_metadata(&table);

    let tree = HuffmanTree::build(&table)
        .ok_or_else(|| BytePressError::corrupt_metadata("frequency table has no symbols"))?;
    let codes = CodeTable::from_tree(&tree)?;

    let mut writer = BitWriter::with_capacity(data.len());
    for &byte in data {
        let code = codes.get(byte).ok_or_else(|| {
            BytePressError::corrupt_metadata(format!("no code for byte {:#04x}", byte))
        })?;
        for bit in code.iter() {
            writer.write_bit(bit)?;
        }
    }

    metadata[0] = writer.bits_in_current_byte();
    let payload = writer.into_inner();

    log::debug!(
        "huffman: encoded {} bytes ({} symbols, max code {} bits) into {} + {} bytes",
        data.len(),
        table.distinct_symbols(),
        codes.max_length(),
        metadata.len(),
        payload.len()
    );

    Ok(HuffmanBlock { metadata, payload })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty() {
        let block = encode(&[]).unwrap();
        // Byte 0 gets a placeholder weight so the table is never empty.
        assert_eq!(block.metadata, vec![0, 0, 0, 1]);
        assert!(block.payload.is_empty());
    }

    #[test]
    fn test_encode_single_symbol() {
        let block = encode(b"AAAAAAAAA").unwrap();
        // Nine one-bit "0" codes: one full byte and one bit.
        assert_eq!(block.payload, vec![0x00, 0x00]);
        assert_eq!(block.metadata[0], 1);
        assert_eq!(&block.metadata[1..], &[b'A', b'A', 9]);
    }

    #[test]
    fn test_encode_known_bits() {
        // a -> 0, b -> 10, c -> 11 ; "aabc" -> 0 0 10 11 = 0b001011
        let block = encode(b"aabc").unwrap();
        assert_eq!(block.payload, vec![0b0010_1100]);
        assert_eq!(block.metadata[0], 6);
    }

    #[test]
    fn test_code_table_for_matches_encoder() {
        let data = b"mississippi";
        let codes = code_table_for(data).unwrap();
        let block = encode(data).unwrap();

        let bits: u64 = data.iter().map(|&b| codes.get(b).unwrap().len() as u64).sum();
        let expected_bytes = bits.div_ceil(8) as usize;
        assert_eq!(block.payload.len(), expected_bytes);
    }
}
