//! Error types for BytePress operations.
//!
//! Every codec in the workspace reports failures through [`BytePressError`].
//! All failures are deterministic functions of the input: nothing is retried
//! and no partial output is returned alongside an error.

use thiserror::Error;

/// The main error type for BytePress operations.
#[derive(Debug, Error)]
pub enum BytePressError {
    /// A bit reader was asked for a bit past the end of its data.
    #[error("Bit stream exhausted at bit position {bit_position}")]
    StreamExhausted {
        /// Number of bits successfully read before the failure.
        bit_position: u64,
    },

    /// A fixed-capacity bit writer ran out of room.
    #[error("Bit buffer overrun: capacity is {capacity} bytes")]
    BufferOverrun {
        /// Capacity of the target in bytes.
        capacity: usize,
    },

    /// Encoded data is malformed.
    #[error("Invalid format at offset {offset}: {message}")]
    InvalidFormat {
        /// Byte offset where the problem was detected.
        offset: u64,
        /// Description of the problem.
        message: String,
    },

    /// A serialized side table (frequency ranges, model) is malformed.
    #[error("Corrupt metadata: {message}")]
    CorruptMetadata {
        /// Description of the problem.
        message: String,
    },

    /// An LZW code that the dictionary cannot resolve.
    #[error("Unknown LZW code {code} (next assignable code is {next_code})")]
    UnknownCode {
        /// The offending code.
        code: u32,
        /// The code the dictionary would assign next.
        next_code: u32,
    },

    /// A dispatched background task did not complete.
    #[error("Background task failed: {message}")]
    TaskFailed {
        /// Description reported by the runtime.
        message: String,
    },
}

/// Result type alias for BytePress operations.
pub type Result<T> = std::result::Result<T, BytePressError>;

impl BytePressError {
    /// Create a stream exhausted error.
    pub fn stream_exhausted(bit_position: u64) -> Self {
        Self::StreamExhausted { bit_position }
    }

    /// Create a buffer overrun error.
    pub fn buffer_overrun(capacity: usize) -> Self {
        Self::BufferOverrun { capacity }
    }

    /// Create an invalid format error.
    pub fn invalid_format(offset: u64, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            offset,
            message: message.into(),
        }
    }

    /// Create a corrupt metadata error.
    pub fn corrupt_metadata(message: impl Into<String>) -> Self {
        Self::CorruptMetadata {
            message: message.into(),
        }
    }

    /// Create an unknown code error.
    pub fn unknown_code(code: u32, next_code: u32) -> Self {
        Self::UnknownCode { code, next_code }
    }

    /// Create a task failure error.
    pub fn task_failed(message: impl Into<String>) -> Self {
        Self::TaskFailed {
            message: message.into(),
        }
    }
}
