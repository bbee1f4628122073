//! LZW encoder (compression).

use crate::config::LzwConfig;
use crate::dictionary::EncodeDictionary;
use bytepress_core::error::Result;

/// LZW encoder with a dictionary that persists across calls.
#[derive(Debug, Clone)]
pub struct LzwEncoder {
    dict: EncodeDictionary,
}

impl LzwEncoder {
    /// Create a new LZW encoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dict: EncodeDictionary::new(config),
        })
    }

    /// Encode `input` into a sequence of codes.
    ///
    /// The current sequence grows one byte at a time while the extension is
    /// already memorized. When it is not, the code for the current sequence
    /// is emitted, the extension is memorized under the next code, and the
    /// sequence restarts from the rejected byte.
    ///
    /// Entries learned here remain available to later calls until
    /// [`LzwEncoder::reset`].
    pub fn encode(&mut self, input: &[u8]) -> Vec<u32> {
        let mut output = Vec::with_capacity(input.len() / 2 + 1);

        let Some((&first, rest)) = input.split_first() else {
            return output;
        };

        let mut current = u32::from(first);
        for &byte in rest {
            match self.dict.find(current, byte) {
                Some(code) => current = code,
                None => {
                    output.push(current);
                    self.dict.insert(current, byte);
                    current = u32::from(byte);
                }
            }
        }
        output.push(current);

        log::debug!(
            "lzw: encoded {} bytes into {} codes (dictionary size {})",
            input.len(),
            output.len(),
            self.dict.len()
        );

        output
    }

    /// Forget every learned entry.
    pub fn reset(&mut self) {
        self.dict.reset();
    }

    /// The encoder's dictionary.
    pub fn dictionary(&self) -> &EncodeDictionary {
        &self.dict
    }
}

impl Default for LzwEncoder {
    fn default() -> Self {
        Self {
            dict: EncodeDictionary::new(LzwConfig::DEFAULT),
        }
    }
}
