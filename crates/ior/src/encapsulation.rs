//! Encapsulation framing (CORBA 15.3.3)
//!
//! An encapsulation wraps a value as a self-contained, byte-order-tagged
//! blob: `[u32 length][u8 endian flag][contents]`. The outer length prefix
//! lets a reader skip an encapsulated value it does not understand; the
//! inner flag lets the producer pick its own byte order independently of the
//! enclosing stream.

use crate::{IorError, Result};
use bytes::Bytes;
use corba_cdr::{ByteOrder, CdrError, CdrInput, CdrOutput};

/// Produce an encapsulation payload: `[endian flag][contents]`.
///
/// The caller frames the result with a length prefix, normally via
/// [`write_to`].
pub fn seal<F>(order: ByteOrder, f: F) -> Result<Bytes>
where
    F: FnOnce(&mut CdrOutput) -> Result<()>,
{
    let mut out = CdrOutput::new(order);
    out.write_u8(order.flag());
    f(&mut out)?;
    Ok(out.into_bytes())
}

/// Open an encapsulation payload produced by [`seal`].
///
/// Consumes the endian flag and returns a cursor positioned at the start of
/// the contents, with the byte order the producer chose.
pub fn open(payload: Bytes) -> Result<CdrInput> {
    if payload.is_empty() {
        return Err(IorError::MalformedEncapsulation(
            "empty encapsulation".into(),
        ));
    }
    let mut input = CdrInput::new(payload, ByteOrder::BigEndian);
    let flag = input.read_u8()?;
    let order = ByteOrder::from_flag(flag).ok_or_else(|| {
        IorError::MalformedEncapsulation(format!("unknown endian flag 0x{flag:02x}"))
    })?;
    input.set_byte_order(order);
    Ok(input)
}

/// Read a length-prefixed encapsulation payload without opening it.
///
/// Used for the generic fallback, which must preserve unrecognized contents
/// byte-exact.
pub fn read_raw_from(input: &mut CdrInput) -> Result<Bytes> {
    input.read_octet_seq().map_err(|e| match e {
        CdrError::LengthOutOfRange(len) => IorError::MalformedEncapsulation(format!(
            "encapsulation length {len} exceeds remaining buffer"
        )),
        other => IorError::Cdr(other),
    })
}

/// Read and open a length-prefixed encapsulation
pub fn read_from(input: &mut CdrInput) -> Result<CdrInput> {
    open(read_raw_from(input)?)
}

/// Frame a payload with its length prefix
pub fn write_to(out: &mut CdrOutput, payload: &[u8]) {
    out.write_octet_seq(payload);
}
