//! LZW decoder (decompression).
//!
//! The decoder learns one step behind the encoder: after expanding a code it
//! memorizes the previous sequence extended by the first byte of the current
//! one. The only code it may receive before learning it is the next code to
//! be assigned, which always expands to `previous + previous[0]`.

use crate::config::LzwConfig;
use crate::dictionary::DecodeDictionary;
use bytepress_core::error::{BytePressError, Result};

/// LZW decoder with a dictionary that persists across calls.
#[derive(Debug, Clone)]
pub struct LzwDecoder {
    dict: DecodeDictionary,
}

impl LzwDecoder {
    /// Create a new LZW decoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dict: DecodeDictionary::new(config),
        })
    }

    /// Decode a sequence of codes.
    ///
    /// Fails with [`BytePressError::UnknownCode`] on a code that is neither
    /// memorized nor the next assignable code. The dictionary keeps whatever
    /// it learned before the failure.
    pub fn decode(&mut self, codes: &[u32]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(codes.len() * 2);
        let mut prev: Option<Vec<u8>> = None;

        for &code in codes {
            let current = match (self.dict.get(code), &prev) {
                (Some(entry), _) => entry.to_vec(),
                (None, Some(p)) if u64::from(code) == self.dict.next_code() && !self.dict.is_full() => {
                    let mut entry = p.clone();
                    entry.push(p[0]);
                    entry
                }
                _ => return Err(self.unknown(code)),
            };

            output.extend_from_slice(&current);

            if let Some(mut entry) = prev.take() {
                entry.push(current[0]);
                self.dict.insert(entry);
            }
            prev = Some(current);
        }

        log::debug!(
            "lzw: decoded {} codes into {} bytes (dictionary size {})",
            codes.len(),
            output.len(),
            self.dict.len()
        );

        Ok(output)
    }

    fn unknown(&self, code: u32) -> BytePressError {
        let next = u32::try_from(self.dict.next_code()).unwrap_or(u32::MAX);
        BytePressError::unknown_code(code, next)
    }

    /// Forget every learned entry.
    pub fn reset(&mut self) {
        self.dict.reset();
    }

    /// The decoder's dictionary.
    pub fn dictionary(&self) -> &DecodeDictionary {
        &self.dict
    }
}

impl Default for LzwDecoder {
    fn default() -> Self {
        Self {
            dict: DecodeDictionary::new(LzwConfig::DEFAULT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::LzwEncoder;

    #[test]
    fn test_decode_classic() {
        let mut decoder = LzwDecoder::new(LzwConfig::DEFAULT).unwrap();
        let codes = [
            84, 79, 66, 69, 79, 82, 78, 79, 84, 256, 258, 260, 265, 259, 261, 263,
        ];
        assert_eq!(decoder.decode(&codes).unwrap(), b"TOBEORNOTTOBEORTOBEORNOT");
    }

    #[test]
    fn test_decode_code_not_yet_learned() {
        // "aaaa" encodes to a, 256 ("aa"), a; 256 arrives before the decoder
        // has memorized it.
        let mut decoder = LzwDecoder::new(LzwConfig::DEFAULT).unwrap();
        assert_eq!(decoder.decode(&[97, 256, 97]).unwrap(), b"aaaa");
    }

    #[test]
    fn test_decode_unknown_code() {
        let mut decoder = LzwDecoder::new(LzwConfig::DEFAULT).unwrap();
        let err = decoder.decode(&[97, 300]).unwrap_err();
        assert!(matches!(
            err,
            BytePressError::UnknownCode {
                code: 300,
                next_code: 256
            }
        ));
    }

    #[test]
    fn test_decode_first_code_must_be_known() {
        let mut decoder = LzwDecoder::new(LzwConfig::DEFAULT).unwrap();
        assert!(matches!(
            decoder.decode(&[256]),
            Err(BytePressError::UnknownCode { code: 256, .. })
        ));
    }

    #[test]
    fn test_decode_next_code_rejected_when_full() {
        let mut decoder = LzwDecoder::new(LzwConfig::new(255)).unwrap();
        assert!(matches!(
            decoder.decode(&[97, 256]),
            Err(BytePressError::UnknownCode { .. })
        ));
    }

    #[test]
    fn test_roundtrip_across_calls() {
        let mut encoder = LzwEncoder::new(LzwConfig::DEFAULT).unwrap();
        let mut decoder = LzwDecoder::new(LzwConfig::DEFAULT).unwrap();

        for chunk in [&b"hello hello "[..], b"hello world", b"world hello"] {
            let codes = encoder.encode(chunk);
            assert_eq!(decoder.decode(&codes).unwrap(), chunk);
        }
        assert_eq!(encoder.dictionary().len(), decoder.dictionary().len());
    }

    #[test]
    fn test_small_capacity_roundtrip() {
        let config = LzwConfig::new(260);
        let mut encoder = LzwEncoder::new(config).unwrap();
        let mut decoder = LzwDecoder::new(config).unwrap();

        let data = b"abcabcabcabcabcabcabcabc".repeat(4);
        let codes = encoder.encode(&data);
        assert!(codes.iter().all(|&c| c <= 260));
        assert_eq!(decoder.decode(&codes).unwrap(), data);
        assert_eq!(decoder.dictionary().len(), 261);
    }
}
