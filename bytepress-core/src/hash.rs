//! djb2 rolling string hash.
//!
//! A lookup accelerator, not an integrity check. The hash can be extended
//! one byte at a time in O(1), which lets a decoder hash a growing code
//! string without rehashing its prefix. Distinct strings can collide, so
//! callers must confirm a hit against the exact key.

/// djb2 seed value.
pub const DJB2_SEED: u64 = 5381;

/// Incremental djb2 hasher (`hash = hash * 33 + byte`, wrapping).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Djb2(u64);

impl Djb2 {
    /// Start a new hash of the empty string.
    pub const fn new() -> Self {
        Self(DJB2_SEED)
    }

    /// Extend the hashed string by one byte.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.0 = (self.0 << 5).wrapping_add(self.0).wrapping_add(byte as u64);
    }

    /// Hash of a whole string.
    pub fn hash_bytes(bytes: &[u8]) -> u64 {
        let mut hasher = Self::new();
        for &byte in bytes {
            hasher.push(byte);
        }
        hasher.value()
    }

    /// Current hash value.
    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Return to the empty-string state.
    #[inline]
    pub fn reset(&mut self) {
        self.0 = DJB2_SEED;
    }
}

impl Default for Djb2 {
    fn default() -> Self {
        Self::new()
    }
}
