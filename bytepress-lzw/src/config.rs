//! LZW configuration.

use bytepress_core::error::{BytePressError, Result};

/// Number of codes pre-assigned to single bytes.
pub const LITERAL_CODES: u32 = 256;

/// LZW configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Highest code the dictionary may assign.
    ///
    /// Codes 0-255 are the single bytes, so `max_code` must be at least 255.
    /// With `max_code == 255` nothing is ever memorized.
    pub max_code: u32,
}

impl LzwConfig {
    /// Full 32-bit code space.
    pub const DEFAULT: Self = Self { max_code: u32::MAX };

    /// Create a configuration with the given highest code.
    pub fn new(max_code: u32) -> Self {
        Self { max_code }
    }

    /// Check that the single-byte codes fit.
    pub fn validate(&self) -> Result<()> {
        if self.max_code < LITERAL_CODES - 1 {
            return Err(BytePressError::invalid_format(
                0,
                format!(
                    "LZW code capacity {} cannot hold the {} single-byte codes",
                    self.max_code, LITERAL_CODES
                ),
            ));
        }
        Ok(())
    }

    /// Total number of codes the dictionary can hold.
    pub fn capacity(&self) -> u64 {
        u64::from(self.max_code) + 1
    }
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
