//! CDR stream error types

use thiserror::Error;

/// Result type for CDR operations
pub type Result<T> = std::result::Result<T, CdrError>;

/// CDR encoding/decoding errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CdrError {
    /// Buffer underflow - not enough data
    #[error("buffer underflow: needed {needed} bytes, have {have}")]
    BufferUnderflow { needed: usize, have: usize },

    /// Invalid string - missing terminator or invalid encoding
    #[error("invalid string: {0}")]
    InvalidString(String),

    /// reset() called without a prior mark()
    #[error("reset without mark")]
    NoMark,

    /// A length prefix exceeds what the stream can hold
    #[error("length out of range: {0}")]
    LengthOutOfRange(u64),
}
