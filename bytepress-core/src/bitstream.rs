//! Bit-level cursors shared by every codec.
//!
//! All cursors in this module are MSB-first: the first bit read from (or
//! written to) a byte is its most significant bit. Multi-byte values are
//! walked in big-endian byte order.
//!
//! Readers implement [`BitSource`], writers implement [`BitSink`]. Each
//! cursor is owned by the call that created it and is never shared.
//!
//! # Example
//!
//! ```
//! use bytepress_core::bitstream::{BitReader, BitSink, BitSource, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b1100, 4).unwrap();
//! assert_eq!(writer.bits_in_current_byte(), 7);
//!
//! let bytes = writer.into_inner();
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{BytePressError, Result};

/// A source of bits.
pub trait BitSource {
    /// Read the next bit.
    fn read_bit(&mut self) -> Result<bool>;

    /// Read up to 32 bits, MSB-first. The first bit read lands in the
    /// highest position of the result.
    fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        let mut value = 0u32;
        for _ in 0..count {
            value = (value << 1) | self.read_bit()? as u32;
        }
        Ok(value)
    }
}

/// A destination for bits.
pub trait BitSink {
    /// Write the next bit.
    fn write_bit(&mut self, bit: bool) -> Result<()>;

    /// Write the low `count` bits of `value`, MSB-first.
    fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 == 1)?;
        }
        Ok(())
    }
}

/// Total number of meaningful bits in a buffer whose final byte holds
/// `final_byte_bits` meaningful bits.
///
/// An empty buffer must declare zero bits; a non-empty buffer must declare
/// between 1 and 8.
pub fn bit_length(byte_len: usize, final_byte_bits: u8) -> Result<u64> {
    if final_byte_bits > 8 {
        return Err(BytePressError::corrupt_metadata(format!(
            "final byte declares {} bits",
            final_byte_bits
        )));
    }

    match (byte_len, final_byte_bits) {
        (0, 0) => Ok(0),
        (0, _) => Err(BytePressError::invalid_format(
            0,
            "bits declared for an empty buffer",
        )),
        (len, 0) => Err(BytePressError::invalid_format(
            len as u64 - 1,
            "final byte declares no bits",
        )),
        (len, bits) => Ok((len as u64 - 1) * 8 + bits as u64),
    }
}

/// Bit reader over a byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Current byte index.
    byte_pos: usize,
    /// Mask of the next bit within the current byte.
    mask: u8,
    /// Number of readable bits.
    limit: u64,
    /// Bits consumed so far.
    bits_read: u64,
}

impl<'a> BitReader<'a> {
    /// Create a reader over every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_bit_limit(data, data.len() as u64 * 8)
    }

    /// Create a reader that stops after `limit` bits (capped at the data size).
    pub fn with_bit_limit(data: &'a [u8], limit: u64) -> Self {
        Self {
            data,
            byte_pos: 0,
            mask: 0x80,
            limit: limit.min(data.len() as u64 * 8),
            bits_read: 0,
        }
    }

    /// Create a reader whose final byte holds only `final_byte_bits` bits.
    pub fn with_final_byte_bits(data: &'a [u8], final_byte_bits: u8) -> Result<Self> {
        Ok(Self::with_bit_limit(
            data,
            bit_length(data.len(), final_byte_bits)?,
        ))
    }

    /// Restrict the reader so that it stops after `limit` bits in total.
    pub fn set_bit_limit(&mut self, limit: u64) {
        self.limit = limit.min(self.data.len() as u64 * 8);
    }

    /// Number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Number of bits still available.
    pub fn remaining_bits(&self) -> u64 {
        self.limit - self.bits_read
    }

    /// Whether every available bit has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.bits_read >= self.limit
    }

    /// Whether the cursor is positioned inside the final byte of the data.
    pub fn is_last_byte(&self) -> bool {
        self.byte_pos + 1 >= self.data.len()
    }
}

impl BitSource for BitReader<'_> {
    #[inline]
    fn read_bit(&mut self) -> Result<bool> {
        if self.bits_read >= self.limit {
            return Err(BytePressError::stream_exhausted(self.bits_read));
        }

        let bit = self.data[self.byte_pos] & self.mask != 0;
        self.mask >>= 1;
        if self.mask == 0 {
            self.mask = 0x80;
            self.byte_pos += 1;
        }
        self.bits_read += 1;

        Ok(bit)
    }
}

/// Bit writer into a growable byte buffer.
///
/// A new byte is allocated on the first bit after the previous byte filled,
/// so the buffer never carries an untouched trailing byte.
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Output buffer.
    buffer: Vec<u8>,
    /// Mask of the next bit within the last byte; 0 when a new byte is needed.
    mask: u8,
    /// Total bits written.
    bits_written: u64,
}

impl BitWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty writer with room for `bytes` bytes.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(bytes),
            mask: 0,
            bits_written: 0,
        }
    }

    /// Total number of bits written.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Number of meaningful bits in the final byte (0 if nothing was written).
    pub fn bits_in_current_byte(&self) -> u8 {
        if self.buffer.is_empty() {
            0
        } else if self.mask == 0 {
            8
        } else {
            self.mask.leading_zeros() as u8
        }
    }

    /// The bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Mutable access to the written bytes, for patching headers in place.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Consume the writer and return the buffer. Unused low bits of the
    /// final byte are zero.
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

impl BitSink for BitWriter {
    #[inline]
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        if self.mask == 0 {
            self.buffer.push(0);
            self.mask = 0x80;
        }

        if bit {
            let last = self.buffer.len() - 1;
            self.buffer[last] |= self.mask;
        }
        self.mask >>= 1;
        self.bits_written += 1;

        Ok(())
    }
}

/// Fixed-width integers that can be walked bit by bit.
pub trait BitWord: Copy {
    /// Width of the value in bytes.
    const BYTES: usize;

    /// Byte `index` of the big-endian representation.
    fn byte_at(self, index: usize) -> u8;
}

macro_rules! impl_bit_word {
    ($($ty:ty),*) => {
        $(
            impl BitWord for $ty {
                const BYTES: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn byte_at(self, index: usize) -> u8 {
                    self.to_be_bytes()[index]
                }
            }
        )*
    };
}

impl_bit_word!(u8, u16, u32, u64);

/// Bit reader over a slice of multi-byte values.
#[derive(Debug, Clone)]
pub struct WordBitReader<'a, W: BitWord> {
    words: &'a [W],
    word_pos: usize,
    byte_index: usize,
    mask: u8,
    bits_read: u64,
}

impl<'a, W: BitWord> WordBitReader<'a, W> {
    /// Create a reader over `words`.
    pub fn new(words: &'a [W]) -> Self {
        Self {
            words,
            word_pos: 0,
            byte_index: 0,
            mask: 0x80,
            bits_read: 0,
        }
    }

    /// Number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Whether every word has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.word_pos >= self.words.len()
    }
}

impl<W: BitWord> BitSource for WordBitReader<'_, W> {
    fn read_bit(&mut self) -> Result<bool> {
        let word = self
            .words
            .get(self.word_pos)
            .copied()
            .ok_or_else(|| BytePressError::stream_exhausted(self.bits_read))?;

        let bit = word.byte_at(self.byte_index) & self.mask != 0;
        self.mask >>= 1;
        if self.mask == 0 {
            self.mask = 0x80;
            self.byte_index += 1;
            if self.byte_index == W::BYTES {
                self.byte_index = 0;
                self.word_pos += 1;
            }
        }
        self.bits_read += 1;

        Ok(bit)
    }
}

/// Bit reader over the bytes of a single value.
#[derive(Debug, Clone)]
pub struct ScalarBitReader {
    bytes: [u8; 8],
    len: usize,
    inner_pos: u64,
}

impl ScalarBitReader {
    /// Create a reader over the big-endian bytes of `value`.
    pub fn new<W: BitWord>(value: W) -> Self {
        let mut bytes = [0u8; 8];
        for (index, byte) in bytes.iter_mut().enumerate().take(W::BYTES) {
            *byte = value.byte_at(index);
        }
        Self {
            bytes,
            len: W::BYTES,
            inner_pos: 0,
        }
    }
}

impl BitSource for ScalarBitReader {
    fn read_bit(&mut self) -> Result<bool> {
        if self.inner_pos >= self.len as u64 * 8 {
            return Err(BytePressError::stream_exhausted(self.inner_pos));
        }

        let byte = self.bytes[(self.inner_pos / 8) as usize];
        let bit = byte & (0x80 >> (self.inner_pos % 8)) != 0;
        self.inner_pos += 1;
        Ok(bit)
    }
}

/// Bit writer into a fixed-size byte array.
#[derive(Debug, Clone)]
pub struct ScalarBitWriter<const N: usize> {
    bytes: [u8; N],
    pos: usize,
}

impl<const N: usize> ScalarBitWriter<N> {
    /// Create a zeroed writer.
    pub fn new() -> Self {
        Self {
            bytes: [0u8; N],
            pos: 0,
        }
    }

    /// Number of bits written so far.
    pub fn bits_written(&self) -> usize {
        self.pos
    }

    /// Consume the writer and return its bytes. Unwritten bits are zero.
    pub fn into_bytes(self) -> [u8; N] {
        self.bytes
    }
}

impl<const N: usize> Default for ScalarBitWriter<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> BitSink for ScalarBitWriter<N> {
    fn write_bit(&mut self, bit: bool) -> Result<()> {
        if self.pos >= N * 8 {
            return Err(BytePressError::buffer_overrun(N));
        }

        if bit {
            self.bytes[self.pos / 8] |= 0x80 >> (self.pos % 8);
        }
        self.pos += 1;
        Ok(())
    }
}
