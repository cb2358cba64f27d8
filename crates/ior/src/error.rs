//! IOR codec error types

use corba_cdr::CdrError;
use thiserror::Error;

/// Result type for IOR operations
pub type Result<T> = std::result::Result<T, IorError>;

/// IOR codec errors.
///
/// Unknown profile or component tags are deliberately absent: those are
/// resolved through the generic fallback and never surface as errors.
#[derive(Debug, Error)]
pub enum IorError {
    /// Underlying CDR stream error
    #[error("CDR stream error: {0}")]
    Cdr(#[from] CdrError),

    /// Encapsulation framing inconsistent (length or endian flag)
    #[error("malformed encapsulation: {0}")]
    MalformedEncapsulation(String),

    /// Object key bytes too short or corrupt for the dispatched format
    #[error("invalid object key: {0}")]
    InvalidObjectKey(String),

    /// Legacy patch-level byte outside the valid range
    #[error("invalid patch level: {0}")]
    InvalidPatchLevel(u8),

    /// Attempt to mutate a frozen container or template
    #[error("attempt to mutate frozen {0}")]
    ImmutableMutation(&'static str),

    /// Object id list does not match the number of profile templates
    #[error("object id count mismatch: {actual} object ids for {expected} profile templates ({which})")]
    ArgumentCountMismatch {
        expected: usize,
        actual: usize,
        which: &'static str,
    },

    /// Port outside 0..=65535 at address construction
    #[error("port out of range: {0}")]
    PortOutOfRange(i32),

    /// Adapter identity is undefined for wire-format (foreign) object keys
    #[error("adapter id unavailable for wire-format object keys")]
    AdapterIdUnavailable,

    /// Malformed `IOR:` text form
    #[error("invalid stringified IOR: {0}")]
    InvalidStringifiedIor(String),
}

impl IorError {
    /// Build the count-mismatch error, naming the direction of the mismatch
    pub(crate) fn count_mismatch(expected: usize, actual: usize) -> Self {
        IorError::ArgumentCountMismatch {
            expected,
            actual,
            which: if actual < expected { "too few" } else { "too many" },
        }
    }
}
