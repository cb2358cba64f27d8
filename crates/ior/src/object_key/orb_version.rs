//! ORB version marker carried by current-format object keys

use crate::Result;
use corba_cdr::{CdrInput, CdrOutput};

/// Patch-level byte value identifying the 1.3.1_01 point release
pub const JDK_1_3_1_01_PATCH_LEVEL: u8 = 1;

/// The ORB generation that minted an object key.
///
/// Current-format keys carry this as a one-octet trailer; legacy keys derive
/// it from their magic number (and, for 1.3.1, an optional patch byte).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum OrbVersion {
    /// Not one of ours - a foreign ORB's key
    Foreign,
    /// JDK 1.2 / 1.3 era
    Old,
    /// JDK 1.3.1 before the _01 patch
    New,
    /// JDK 1.3.1_01 patch release
    Jdk1_3_1_01,
    /// JDK 1.4+ (or anything from the future)
    Newer,
    /// PE ORB (application server line)
    Peorb,
}

impl OrbVersion {
    /// The one-octet wire value
    pub fn as_byte(self) -> u8 {
        match self {
            OrbVersion::Foreign => 0,
            OrbVersion::Old => 1,
            OrbVersion::New => 2,
            OrbVersion::Jdk1_3_1_01 => 3,
            OrbVersion::Newer => 4,
            OrbVersion::Peorb => 5,
        }
    }

    /// Interpret a wire octet. Values from the future decode as `Newer`
    /// rather than failing - a newer ORB's keys must stay addressable.
    pub fn from_byte(value: u8) -> Self {
        match value {
            0 => OrbVersion::Foreign,
            1 => OrbVersion::Old,
            2 => OrbVersion::New,
            3 => OrbVersion::Jdk1_3_1_01,
            4 => OrbVersion::Newer,
            5 => OrbVersion::Peorb,
            _ => OrbVersion::Newer,
        }
    }

    /// Whether this version is strictly newer than `other`
    pub fn is_newer_than(self, other: OrbVersion) -> bool {
        self > other
    }

    /// Write the one-octet trailer
    pub fn write(self, out: &mut CdrOutput) {
        out.write_u8(self.as_byte());
    }

    /// Read the one-octet trailer
    pub fn read(input: &mut CdrInput) -> Result<Self> {
        Ok(Self::from_byte(input.read_u8()?))
    }
}
