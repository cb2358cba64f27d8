//! GIOP byte-order flag

/// Byte order of a CDR stream.
///
/// GIOP marks each message and each encapsulation with a one-octet flag:
/// `0x00` for big-endian, `0x01` for little-endian.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    /// Network byte order (flag octet 0)
    BigEndian,
    /// Little-endian (flag octet 1)
    LittleEndian,
}

impl ByteOrder {
    /// The one-octet wire flag for this byte order
    pub fn flag(self) -> u8 {
        match self {
            ByteOrder::BigEndian => 0,
            ByteOrder::LittleEndian => 1,
        }
    }

    /// Interpret a wire flag octet
    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0 => Some(ByteOrder::BigEndian),
            1 => Some(ByteOrder::LittleEndian),
            _ => None,
        }
    }

    /// Whether this is little-endian
    pub fn is_little(self) -> bool {
        matches!(self, ByteOrder::LittleEndian)
    }
}

impl Default for ByteOrder {
    fn default() -> Self {
        ByteOrder::BigEndian
    }
}
