//! Core traits shared by all codecs.

use crate::error::Result;

/// A buffer-to-buffer codec.
///
/// Each call transforms one fully materialized input buffer into one output
/// buffer. Implementations that keep state between calls (LZW) clear it in
/// [`BlockCodec::reset`].
pub trait BlockCodec {
    /// Short, stable name of the codec.
    fn name(&self) -> &'static str;

    /// Compress `input` into a self-contained buffer.
    fn compress(&mut self, input: &[u8]) -> Result<Vec<u8>>;

    /// Decompress a buffer produced by [`BlockCodec::compress`].
    fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>>;

    /// Reset any state carried between calls.
    fn reset(&mut self) {}

    /// Compress and immediately decompress, returning the recovered data.
    fn roundtrip(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let compressed = self.compress(input)?;
        self.decompress(&compressed)
    }
}
