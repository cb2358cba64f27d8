//! CDR input stream

use crate::{ByteOrder, CdrError, Result};
use bytes::Bytes;

/// A CDR input stream over an owned byte buffer.
///
/// The cursor position is absolute from the stream origin; alignment of
/// multi-byte primitives is computed against that origin, which is what the
/// CDR rules require. An encapsulated value is read through [`sub_input`],
/// which yields a fresh stream whose origin (and therefore alignment) starts
/// at zero.
///
/// [`sub_input`]: CdrInput::sub_input
#[derive(Debug, Clone)]
pub struct CdrInput {
    data: Bytes,
    pos: usize,
    order: ByteOrder,
    mark: Option<usize>,
}

impl CdrInput {
    /// Create an input stream with the given byte order
    pub fn new(data: Bytes, order: ByteOrder) -> Self {
        Self {
            data,
            pos: 0,
            order,
            mark: None,
        }
    }

    /// Current byte order
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Change the byte order for subsequent reads
    pub fn set_byte_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Absolute cursor position from the stream origin
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total stream length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the stream is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Record the current position for a later [`reset`](CdrInput::reset)
    pub fn mark(&mut self) {
        self.mark = Some(self.pos);
    }

    /// Rewind to the most recent [`mark`](CdrInput::mark)
    pub fn reset(&mut self) -> Result<()> {
        match self.mark.take() {
            Some(pos) => {
                self.pos = pos;
                Ok(())
            }
            None => Err(CdrError::NoMark),
        }
    }

    fn require(&self, needed: usize) -> Result<()> {
        if self.remaining() < needed {
            return Err(CdrError::BufferUnderflow {
                needed,
                have: self.remaining(),
            });
        }
        Ok(())
    }

    /// Skip padding so the next read starts on an `alignment` boundary
    fn align(&mut self, alignment: usize) -> Result<()> {
        let rem = self.pos % alignment;
        if rem != 0 {
            let padding = alignment - rem;
            self.require(padding)?;
            self.pos += padding;
        }
        Ok(())
    }

    /// Read an octet
    pub fn read_u8(&mut self) -> Result<u8> {
        self.require(1)?;
        let val = self.data[self.pos];
        self.pos += 1;
        Ok(val)
    }

    /// Read a signed octet
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Read an unsigned short (aligned to 2)
    pub fn read_u16(&mut self) -> Result<u16> {
        self.align(2)?;
        self.require(2)?;
        let raw = [self.data[self.pos], self.data[self.pos + 1]];
        self.pos += 2;
        Ok(match self.order {
            ByteOrder::BigEndian => u16::from_be_bytes(raw),
            ByteOrder::LittleEndian => u16::from_le_bytes(raw),
        })
    }

    /// Read a signed short (aligned to 2)
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    /// Read an unsigned long (aligned to 4)
    pub fn read_u32(&mut self) -> Result<u32> {
        self.align(4)?;
        self.require(4)?;
        let raw = [
            self.data[self.pos],
            self.data[self.pos + 1],
            self.data[self.pos + 2],
            self.data[self.pos + 3],
        ];
        self.pos += 4;
        Ok(match self.order {
            ByteOrder::BigEndian => u32::from_be_bytes(raw),
            ByteOrder::LittleEndian => u32::from_le_bytes(raw),
        })
    }

    /// Read a signed long (aligned to 4)
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// Read `n` raw octets
    pub fn read_octets(&mut self, n: usize) -> Result<Bytes> {
        self.require(n)?;
        let out = self.data.slice(self.pos..self.pos + n);
        self.pos += n;
        Ok(out)
    }

    /// Read an octet sequence: `[u32 length][octets]`
    pub fn read_octet_seq(&mut self) -> Result<Bytes> {
        let len = self.read_u32()? as usize;
        if len > self.remaining() {
            return Err(CdrError::LengthOutOfRange(len as u64));
        }
        self.read_octets(len)
    }

    /// Read a CDR string: `[u32 length][UTF-8 bytes][NUL]`, the terminator
    /// counted in the length.
    ///
    /// A zero length is tolerated as the empty string; some ORBs emit it
    /// even though CDR defines a minimum length of 1.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u32()? as usize;
        if len == 0 {
            return Ok(String::new());
        }
        if len > self.remaining() {
            return Err(CdrError::LengthOutOfRange(len as u64));
        }
        let raw = self.read_octets(len)?;
        if raw[len - 1] != 0 {
            return Err(CdrError::InvalidString("missing NUL terminator".into()));
        }
        std::str::from_utf8(&raw[..len - 1])
            .map(str::to_owned)
            .map_err(|_| CdrError::InvalidString("invalid UTF-8".into()))
    }

    /// Split off a sub-stream over the next `len` bytes.
    ///
    /// The sub-stream inherits the current byte order but has its own
    /// alignment origin, which is the CDR rule for encapsulations.
    pub fn sub_input(&mut self, len: usize) -> Result<CdrInput> {
        let body = self.read_octets(len)?;
        Ok(CdrInput::new(body, self.order))
    }

    /// Consume the rest of the stream as raw octets
    pub fn read_remaining(&mut self) -> Bytes {
        let out = self.data.slice(self.pos..);
        self.pos = self.data.len();
        out
    }
}
