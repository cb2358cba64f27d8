//! CDR (Common Data Representation) stream primitives
//!
//! This crate provides the binary cursor used by the GIOP/IIOP reference
//! codec, implementing the CDR transfer syntax from CORBA 2.x chapter 15:
//!
//! - Primitives align to their natural size (1, 2, or 4 bytes), measured
//!   from the origin of the enclosing stream
//! - Both byte orders are supported; each encapsulated stream carries its
//!   own byte-order flag
//! - Strings are length-prefixed and NUL-terminated, with the terminator
//!   counted in the length
//! - Sub-streams (encapsulations) restart the alignment origin at zero

mod byte_order;
mod error;
mod input;
mod output;

pub use byte_order::ByteOrder;
pub use error::{CdrError, Result};
pub use input::CdrInput;
pub use output::CdrOutput;

/// Re-export bytes for convenience
pub use bytes::{Buf, BufMut, Bytes, BytesMut};
