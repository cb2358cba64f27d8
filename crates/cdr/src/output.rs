//! CDR output stream

use crate::{ByteOrder, Result};
use bytes::{BufMut, Bytes, BytesMut};

/// A CDR output stream accumulating into a [`BytesMut`].
///
/// Mirrors [`CdrInput`](crate::CdrInput): multi-byte primitives are padded to
/// their natural alignment, measured from the start of the buffer. A nested
/// encapsulation is produced by writing into a fresh `CdrOutput` and
/// appending the finished bytes with [`write_octet_seq`].
///
/// [`write_octet_seq`]: CdrOutput::write_octet_seq
#[derive(Debug)]
pub struct CdrOutput {
    buf: BytesMut,
    order: ByteOrder,
}

impl CdrOutput {
    /// Create an output stream with the given byte order
    pub fn new(order: ByteOrder) -> Self {
        Self {
            buf: BytesMut::new(),
            order,
        }
    }

    /// Current byte order
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Bytes written so far
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// Finish the stream and take the accumulated bytes
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }

    fn align(&mut self, alignment: usize) {
        let rem = self.buf.len() % alignment;
        if rem != 0 {
            for _ in 0..(alignment - rem) {
                self.buf.put_u8(0);
            }
        }
    }

    /// Write an octet
    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    /// Write a signed octet
    pub fn write_i8(&mut self, value: i8) {
        self.buf.put_i8(value);
    }

    /// Write an unsigned short (aligned to 2)
    pub fn write_u16(&mut self, value: u16) {
        self.align(2);
        match self.order {
            ByteOrder::BigEndian => self.buf.put_u16(value),
            ByteOrder::LittleEndian => self.buf.put_u16_le(value),
        }
    }

    /// Write a signed short (aligned to 2)
    pub fn write_i16(&mut self, value: i16) {
        self.write_u16(value as u16);
    }

    /// Write an unsigned long (aligned to 4)
    pub fn write_u32(&mut self, value: u32) {
        self.align(4);
        match self.order {
            ByteOrder::BigEndian => self.buf.put_u32(value),
            ByteOrder::LittleEndian => self.buf.put_u32_le(value),
        }
    }

    /// Write a signed long (aligned to 4)
    pub fn write_i32(&mut self, value: i32) {
        self.write_u32(value as u32);
    }

    /// Write raw octets with no framing
    pub fn write_octets(&mut self, octets: &[u8]) {
        self.buf.put_slice(octets);
    }

    /// Write an octet sequence: `[u32 length][octets]`
    pub fn write_octet_seq(&mut self, octets: &[u8]) {
        self.write_u32(octets.len() as u32);
        self.buf.put_slice(octets);
    }

    /// Write a CDR string: `[u32 length][UTF-8 bytes][NUL]`, terminator
    /// counted in the length
    pub fn write_string(&mut self, value: &str) {
        self.write_u32(value.len() as u32 + 1);
        self.buf.put_slice(value.as_bytes());
        self.buf.put_u8(0);
    }

    /// Append a nested stream produced by `f` as an octet sequence.
    ///
    /// The nested stream keeps this stream's byte order but has its own
    /// alignment origin.
    pub fn write_nested<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut CdrOutput) -> Result<()>,
    {
        let mut nested = CdrOutput::new(self.order);
        f(&mut nested)?;
        self.write_octet_seq(&nested.into_bytes());
        Ok(())
    }
}
