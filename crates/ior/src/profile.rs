//! Tagged profiles: the per-protocol entries of an IOR.

use crate::components::TaggedComponent;
use crate::constants::profile_tag;
use crate::identifiable::{GenericIdEncapsulation, TaggedEntry};
use crate::iiop::IiopProfile;
use crate::Result;
use corba_cdr::CdrOutput;

/// One profile entry in an IOR.
///
/// IIOP is decoded structurally; every other tag (including
/// TAG_MULTIPLE_COMPONENTS, which this ORB never mints) is preserved as an
/// opaque generic entry that reserializes byte-exact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaggedProfile {
    /// TAG_INTERNET_IOP
    Iiop(IiopProfile),
    /// Any other tag, byte-exact passthrough
    Generic(GenericIdEncapsulation),
}

impl TaggedEntry for TaggedProfile {
    fn tag(&self) -> u32 {
        match self {
            TaggedProfile::Iiop(_) => profile_tag::TAG_INTERNET_IOP,
            TaggedProfile::Generic(g) => g.id,
        }
    }
}

impl TaggedProfile {
    /// Write `[tag][encapsulated body]` into the enclosing stream
    pub fn write(&self, out: &mut CdrOutput) -> Result<()> {
        match self {
            TaggedProfile::Iiop(p) => p.write(out),
            TaggedProfile::Generic(g) => {
                g.write(out);
                Ok(())
            }
        }
    }

    /// The IIOP profile, if this entry is one
    pub fn as_iiop(&self) -> Option<&IiopProfile> {
        match self {
            TaggedProfile::Iiop(p) => Some(p),
            TaggedProfile::Generic(_) => None,
        }
    }

    /// Components filed under `tag`, empty for profiles that carry none
    pub fn components_by_tag(&self, tag: u32) -> Vec<&TaggedComponent> {
        match self {
            TaggedProfile::Iiop(p) => p.template.components_by_tag(tag).collect(),
            TaggedProfile::Generic(_) => Vec::new(),
        }
    }
}
