//! LZW dictionaries.
//!
//! The two directions keep different tables. The encoder maps
//! `(prefix_code, next_byte)` to the code of the extended sequence, which
//! identifies every sequence exactly. The decoder maps codes to their
//! expanded byte sequences.
//!
//! Both start with codes 0-255 bound to the single bytes, assign new codes
//! in increasing order from 256, and stop growing once the configured
//! capacity is reached.

use crate::config::{LITERAL_CODES, LzwConfig};
use std::collections::HashMap;

/// Encoder-side dictionary.
#[derive(Debug, Clone)]
pub struct EncodeDictionary {
    entries: HashMap<(u32, u8), u32>,
    next: u64,
    config: LzwConfig,
}

impl EncodeDictionary {
    /// Create a dictionary holding only the single-byte codes.
    pub fn new(config: LzwConfig) -> Self {
        Self {
            entries: HashMap::new(),
            next: u64::from(LITERAL_CODES),
            config,
        }
    }

    /// Drop every learned entry.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.next = u64::from(LITERAL_CODES);
    }

    /// Code of `prefix` extended by `byte`, if memorized.
    pub fn find(&self, prefix: u32, byte: u8) -> Option<u32> {
        self.entries.get(&(prefix, byte)).copied()
    }

    /// Memorize `prefix + byte` under the next code.
    ///
    /// Returns the assigned code, or `None` once the dictionary is full.
    pub fn insert(&mut self, prefix: u32, byte: u8) -> Option<u32> {
        if self.is_full() {
            return None;
        }
        let code = u32::try_from(self.next).ok()?;
        self.entries.insert((prefix, byte), code);
        self.next += 1;
        if self.is_full() {
            log::trace!("lzw: encoder dictionary reached capacity at code {}", code);
        }
        Some(code)
    }

    /// Number of codes in use, single bytes included.
    pub fn len(&self) -> u64 {
        self.next
    }

    /// Always false; the single-byte codes are permanent.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Next code to be assigned.
    pub fn next_code(&self) -> u64 {
        self.next
    }

    /// Whether no further codes can be assigned.
    pub fn is_full(&self) -> bool {
        self.next >= self.config.capacity()
    }
}

/// Decoder-side dictionary.
#[derive(Debug, Clone)]
pub struct DecodeDictionary {
    table: Vec<Vec<u8>>,
    config: LzwConfig,
}

impl DecodeDictionary {
    /// Create a dictionary holding only the single-byte codes.
    pub fn new(config: LzwConfig) -> Self {
        let mut dict = Self {
            table: Vec::with_capacity(LITERAL_CODES as usize * 2),
            config,
        };
        dict.reset();
        dict
    }

    /// Drop every learned entry.
    pub fn reset(&mut self) {
        self.table.clear();
        self.table.extend((0..=u8::MAX).map(|b| vec![b]));
    }

    /// Byte sequence for `code`.
    pub fn get(&self, code: u32) -> Option<&[u8]> {
        self.table.get(code as usize).map(Vec::as_slice)
    }

    /// Memorize `sequence` under the next code.
    pub fn insert(&mut self, sequence: Vec<u8>) -> Option<u32> {
        if self.is_full() {
            return None;
        }
        let code = u32::try_from(self.table.len()).ok()?;
        self.table.push(sequence);
        if self.is_full() {
            log::trace!("lzw: decoder dictionary reached capacity at code {}", code);
        }
        Some(code)
    }

    /// Number of codes in use.
    pub fn len(&self) -> u64 {
        self.table.len() as u64
    }

    /// Always false; the single-byte codes are permanent.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Next code to be assigned.
    pub fn next_code(&self) -> u64 {
        self.len()
    }

    /// Whether no further codes can be assigned.
    pub fn is_full(&self) -> bool {
        self.len() >= self.config.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_init() {
        let enc = EncodeDictionary::new(LzwConfig::DEFAULT);
        assert_eq!(enc.len(), 256);
        assert_eq!(enc.find(b'A' as u32, b'B'), None);

        let dec = DecodeDictionary::new(LzwConfig::DEFAULT);
        for i in 0..256u32 {
            assert_eq!(dec.get(i).unwrap(), &[i as u8]);
        }
        assert!(dec.get(256).is_none());
        assert_eq!(dec.next_code(), 256);
    }

    #[test]
    fn test_insert_and_find() {
        let mut enc = EncodeDictionary::new(LzwConfig::DEFAULT);
        assert_eq!(enc.insert(b'A' as u32, b'B'), Some(256));
        assert_eq!(enc.insert(256, b'C'), Some(257));
        assert_eq!(enc.find(b'A' as u32, b'B'), Some(256));
        assert_eq!(enc.find(256, b'C'), Some(257));

        let mut dec = DecodeDictionary::new(LzwConfig::DEFAULT);
        assert_eq!(dec.insert(b"AB".to_vec()), Some(256));
        assert_eq!(dec.get(256).unwrap(), b"AB");
    }

    #[test]
    fn test_capacity_stops_growth() {
        let config = LzwConfig::new(257);
        let mut enc = EncodeDictionary::new(config);
        assert_eq!(enc.insert(1, 2), Some(256));
        assert_eq!(enc.insert(2, 3), Some(257));
        assert!(enc.is_full());
        assert_eq!(enc.insert(3, 4), None);
        assert_eq!(enc.len(), 258);

        let mut dec = DecodeDictionary::new(config);
        dec.insert(vec![1, 2]);
        dec.insert(vec![2, 3]);
        assert_eq!(dec.insert(vec![3, 4]), None);
        assert_eq!(dec.len(), 258);
    }

    #[test]
    fn test_reset() {
        let mut enc = EncodeDictionary::new(LzwConfig::DEFAULT);
        enc.insert(0, 0);
        enc.reset();
        assert_eq!(enc.len(), 256);
        assert_eq!(enc.find(0, 0), None);

        let mut dec = DecodeDictionary::new(LzwConfig::DEFAULT);
        dec.insert(vec![0, 0]);
        dec.reset();
        assert_eq!(dec.len(), 256);
    }
}
