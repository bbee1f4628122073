//! Prefix code tables derived from a [`HuffmanTree`].

use crate::tree::HuffmanTree;
use bytepress_core::error::{BytePressError, Result};
use bytepress_core::frequency::SYMBOL_COUNT;
use bytepress_core::hash::Djb2;
use std::collections::HashMap;
use std::fmt;

/// Longest code the 64-bit [`Code`] representation can hold.
pub const MAX_CODE_LENGTH: u8 = 64;

/// A variable-length code word, stored MSB-first in the low `len` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Code {
    bits: u64,
    len: u8,
}

impl Code {
    /// The empty code.
    pub const EMPTY: Self = Self { bits: 0, len: 0 };

    /// Append one bit.
    #[inline]
    pub fn push(&mut self, bit: bool) {
        self.bits = (self.bits << 1) | bit as u64;
        self.len += 1;
    }

    /// This code extended by one bit.
    pub fn with(mut self, bit: bool) -> Self {
        self.push(bit);
        self
    }

    /// Number of bits.
    pub fn len(&self) -> u8 {
        self.len
    }

    /// Whether the code has no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The code bits, right-aligned.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Bits from first to last.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).rev().map(move |shift| (self.bits >> shift) & 1 == 1)
    }

    /// Whether `self` is a proper or equal prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len == 0 {
            return true;
        }
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }

    /// djb2 hash of the code written as a string of `'0'` and `'1'`.
    pub fn string_hash(&self) -> u64 {
        let mut hasher = Djb2::new();
        for bit in self.iter() {
            hasher.push(if bit { b'1' } else { b'0' });
        }
        hasher.value()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Byte value → code word.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: [Option<Code>; SYMBOL_COUNT],
}

impl CodeTable {
    /// Derive codes from root-to-leaf paths; left edges append `0`, right
    /// edges `1`. A tree made of a single leaf gets the one-bit code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut codes = [None; SYMBOL_COUNT];
        let mut stack = vec![(tree.root(), Code::EMPTY)];

        while let Some((index, code)) = stack.pop() {
            let node = tree.node(index);
            match (node.left, node.right) {
                (Some(left), Some(right)) => {
                    if code.len() >= MAX_CODE_LENGTH {
                        return Err(BytePressError::corrupt_metadata(
                            "Huffman tree deeper than the longest supported code",
                        ));
                    }
                    stack.push((right, code.with(true)));
                    stack.push((left, code.with(false)));
                }
                _ => {
                    let code = if code.is_empty() {
                        Code::EMPTY.with(false)
                    } else {
                        code
                    };
                    codes[index] = Some(code);
                }
            }
        }

        Ok(Self { codes })
    }

    /// Code for a byte, if the byte is in the table.
    #[inline]
    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codes[byte as usize].as_ref()
    }

    /// `(byte, code)` pairs in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(byte, code)| code.as_ref().map(|c| (byte as u8, c)))
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the longest code.
    pub fn max_length(&self) -> u8 {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Whether no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.iter().map(|(_, c)| c).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }

    /// Average number of bits per input byte when `data` is encoded with
    /// this table. Bytes without a code are ignored.
    pub fn average_code_length(&self, data: &[u8]) -> f64 {
        if data.is_empty() {
            return 0.0;
        }
        let total: u64 = data
            .iter()
            .filter_map(|&b| self.get(b))
            .map(|c| c.len() as u64)
            .sum();
        total as f64 / data.len() as f64
    }
}

/// Inverse code table keyed by the rolling hash of the code string.
///
/// The hash only selects a bucket; a symbol is returned only when the
/// accumulated code matches a stored code exactly.
#[derive(Debug, Clone)]
pub struct CodeLookup {
    buckets: HashMap<u64, Vec<(Code, u8)>>,
}

impl CodeLookup {
    /// Invert a code table.
    pub fn new(table: &CodeTable) -> Self {
        let mut buckets: HashMap<u64, Vec<(Code, u8)>> = HashMap::with_capacity(table.len());
        for (byte, code) in table.iter() {
            buckets
                .entry(code.string_hash())
                .or_default()
                .push((*code, byte));
        }
        Self { buckets }
    }

    /// Symbol for `code`, given its precomputed string hash.
    #[inline]
    pub fn find(&self, hash: u64, code: &Code) -> Option<u8> {
        self.buckets
            .get(&hash)?
            .iter()
            .find(|(candidate, _)| candidate == code)
            .map(|&(_, byte)| byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytepress_core::frequency::FrequencyTable;

    fn table_for(data: &[u8]) -> CodeTable {
        let tree = HuffmanTree::build(&FrequencyTable::from_data(data)).unwrap();
        CodeTable::from_tree(&tree).unwrap()
    }

    #[test]
    fn test_code_bits() {
        let code = Code::EMPTY.with(true).with(false).with(true);
        assert_eq!(code.len(), 3);
        assert_eq!(code.bits(), 0b101);
        assert_eq!(code.to_string(), "101");
        assert_eq!(code.iter().collect::<Vec<_>>(), vec![true, false, true]);
    }

    #[test]
    fn test_prefix_relation() {
        let short = Code::EMPTY.with(true);
        let long = short.with(false);
        assert!(short.is_prefix_of(&long));
        assert!(!long.is_prefix_of(&short));
        assert!(!Code::EMPTY.with(false).is_prefix_of(&long));
    }

    #[test]
    fn test_single_symbol_code_is_zero() {
        let table = table_for(b"zzzz");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b'z').unwrap().to_string(), "0");
    }

    #[test]
    fn test_known_codes() {
        // a:2 b:1 c:1 -> b,c pair first (lowest index), then a + (b,c)
        let table = table_for(b"aabc");
        assert_eq!(table.get(b'a').unwrap().to_string(), "0");
        assert_eq!(table.get(b'b').unwrap().to_string(), "10");
        assert_eq!(table.get(b'c').unwrap().to_string(), "11");
    }

    #[test]
    fn test_prefix_free() {
        let table = table_for(b"the quick brown fox jumps over the lazy dog");
        assert!(table.is_prefix_free());
        assert!(table.max_length() > 1);
    }

    #[test]
    fn test_frequent_symbols_get_shorter_codes() {
        let mut data = vec![b'e'; 200];
        data.extend_from_slice(b"qxzj");
        let table = table_for(&data);
        let e = table.get(b'e').unwrap().len();
        assert!(table.iter().all(|(_, c)| c.len() >= e));
    }

    #[test]
    fn test_lookup_exact_match() {
        let table = table_for(b"aabc");
        let lookup = CodeLookup::new(&table);

        for (byte, code) in table.iter() {
            assert_eq!(lookup.find(code.string_hash(), code), Some(byte));
        }

        // Right hash bucket, wrong code bits
        let b = *table.get(b'b').unwrap();
        let other = Code::EMPTY.with(false).with(false);
        assert_eq!(lookup.find(b.string_hash(), &other), None);
    }
}
