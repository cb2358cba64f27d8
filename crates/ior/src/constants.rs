//! Wire constants: profile tags, component tags, object key magics, and the
//! subcontract id ranges used for object key dispatch.

/// IOP profile tag ids (CORBA 13.6.2)
pub mod profile_tag {
    /// IIOP profile - the only tag every ORB must understand
    pub const TAG_INTERNET_IOP: u32 = 0;
    /// Multiple-components profile
    pub const TAG_MULTIPLE_COMPONENTS: u32 = 1;
}

/// IOP component tag ids (CORBA 13.6.3)
pub mod component_tag {
    /// ORB type component
    pub const TAG_ORB_TYPE: u32 = 0;
    /// Code sets component
    pub const TAG_CODE_SETS: u32 = 1;
    /// Policies component
    pub const TAG_POLICIES: u32 = 2;
    /// Alternate IIOP address component
    pub const TAG_ALTERNATE_IIOP_ADDRESS: u32 = 3;
    /// Java codebase component (RMI-IIOP)
    pub const TAG_JAVA_CODEBASE: u32 = 25;
}

/// Object key magic numbers.
///
/// Three consecutive magics distinguish the key-encoding generations:
/// JDK 1.2/1.3, JDK 1.3.1, and JDK 1.4+. Anything else means the key was
/// minted by a foreign ORB and is treated as opaque.
pub mod magic {
    /// Base of the valid magic range
    pub const MAGIC_BASE: u32 = 0xAFAB_CAFE;
    /// JDK 1.2 / 1.3 era keys
    pub const JAVAMAGIC_OLD: u32 = MAGIC_BASE;
    /// JDK 1.3.1 keys (may carry a trailing patch byte)
    pub const JAVAMAGIC_NEW: u32 = MAGIC_BASE + 1;
    /// JDK 1.4+ keys (carry an ORB version trailer)
    pub const JAVAMAGIC_NEWER: u32 = MAGIC_BASE + 2;
    /// Top of the valid magic range
    pub const MAX_MAGIC: u32 = JAVAMAGIC_NEWER;
}

/// Subcontract id reported by wire-format (foreign) keys, which carry no
/// subcontract field of their own
pub const DEFAULT_WIRE_SCID: i32 = 2;

/// Subcontract id ranges separating POA-addressed keys from plain (JIDL)
/// keys.
///
/// These are deployment constants: interoperability depends on matching the
/// peer ORB's configured values, so they are injected rather than hardcoded.
/// The defaults are the values shipped by the reference ORB.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubcontractRanges {
    /// First subcontract id assigned to POA object adapters
    pub first_poa_scid: i32,
    /// Last subcontract id assigned to POA object adapters (inclusive)
    pub max_poa_scid: i32,
}

impl SubcontractRanges {
    /// Whether `scid` addresses a POA object adapter
    pub fn is_poa(&self, scid: i32) -> bool {
        scid >= self.first_poa_scid && scid <= self.max_poa_scid
    }

    /// Whether `scid` addresses a plain (JIDL) server
    pub fn is_jidl(&self, scid: i32) -> bool {
        scid >= 0 && scid < self.first_poa_scid
    }
}

impl Default for SubcontractRanges {
    fn default() -> Self {
        Self {
            first_poa_scid: 32,
            max_poa_scid: 63,
        }
    }
}
