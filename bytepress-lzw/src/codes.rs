//! Conversion between code sequences and 32-bit big-endian byte buffers.

use bytepress_core::error::{BytePressError, Result};

/// Bytes per serialized code.
pub const CODE_BYTES: usize = 4;

/// Serialize codes as consecutive 32-bit big-endian integers.
pub fn codes_to_bytes(codes: &[u32]) -> Vec<u8> {
    codes.iter().flat_map(|code| code.to_be_bytes()).collect()
}

/// Parse a buffer produced by [`codes_to_bytes`].
pub fn bytes_to_codes(bytes: &[u8]) -> Result<Vec<u32>> {
    if bytes.len() % CODE_BYTES != 0 {
        let whole = bytes.len() - bytes.len() % CODE_BYTES;
        return Err(BytePressError::invalid_format(
            whole as u64,
            format!(
                "code buffer length {} is not a multiple of {}",
                bytes.len(),
                CODE_BYTES
            ),
        ));
    }

    Ok(bytes
        .chunks_exact(CODE_BYTES)
        .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}
