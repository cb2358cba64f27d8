//! IOP tagged components attached to IIOP profiles.
//!
//! Each component is a tagged record whose contents travel inside an
//! encapsulation, so an ORB that does not understand a tag can skip or
//! forward it untouched (the `Generic` variant preserves those byte-exact).

use crate::constants::component_tag;
use crate::iiop::IiopAddress;
use crate::identifiable::{GenericIdEncapsulation, TaggedEntry};
use crate::{encapsulation, Result};
use bytes::Bytes;
use corba_cdr::{CdrInput, CdrOutput};

/// One half of the code sets component: the native code set plus the
/// conversion code sets the server can accept
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CodeSetComponent {
    /// OSF registry id of the native code set
    pub native_code_set: u32,
    /// OSF registry ids of supported conversion code sets
    pub conversion_code_sets: Vec<u32>,
}

impl CodeSetComponent {
    /// Write `[u32 native][u32 count][u32 ...]`
    pub fn write(&self, out: &mut CdrOutput) {
        out.write_u32(self.native_code_set);
        out.write_u32(self.conversion_code_sets.len() as u32);
        for cs in &self.conversion_code_sets {
            out.write_u32(*cs);
        }
    }

    /// Read the mirrored layout
    pub fn read(input: &mut CdrInput) -> Result<Self> {
        let native_code_set = input.read_u32()?;
        let count = input.read_u32()? as usize;
        let mut conversion_code_sets = Vec::with_capacity(count.min(16));
        for _ in 0..count {
            conversion_code_sets.push(input.read_u32()?);
        }
        Ok(Self {
            native_code_set,
            conversion_code_sets,
        })
    }
}

/// TAG_CODE_SETS: char and wchar code set information
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CodeSetsComponent {
    /// Code sets for char data
    pub char_data: CodeSetComponent,
    /// Code sets for wchar data
    pub wchar_data: CodeSetComponent,
}

/// TAG_ALTERNATE_IIOP_ADDRESS: an additional endpoint for the same object
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlternateIiopAddressComponent {
    /// The alternate endpoint
    pub address: IiopAddress,
}

/// TAG_JAVA_CODEBASE: space-separated URLs for downloading stubs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JavaCodebaseComponent {
    /// Space-separated URL list
    pub urls: String,
}

/// TAG_ORB_TYPE: registered id of the ORB that minted the reference
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrbTypeComponent {
    /// OMG-registered ORB type id
    pub orb_type: u32,
}

/// TAG_POLICIES: policy export component.
///
/// Kept as an opaque passthrough - the policy value encoding is not
/// interpreted here, but the contents round-trip byte-exact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoliciesComponent {
    /// Raw encapsulated payload, byte-exact
    pub data: Bytes,
}

/// A tagged component attached to an IIOP profile
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaggedComponent {
    /// TAG_ALTERNATE_IIOP_ADDRESS
    AlternateIiopAddress(AlternateIiopAddressComponent),
    /// TAG_CODE_SETS
    CodeSets(CodeSetsComponent),
    /// TAG_JAVA_CODEBASE
    JavaCodebase(JavaCodebaseComponent),
    /// TAG_ORB_TYPE
    OrbType(OrbTypeComponent),
    /// TAG_POLICIES (opaque passthrough)
    Policies(PoliciesComponent),
    /// Any tag the registry does not recognize
    Generic(GenericIdEncapsulation),
}

impl TaggedEntry for TaggedComponent {
    fn tag(&self) -> u32 {
        match self {
            TaggedComponent::AlternateIiopAddress(_) => {
                component_tag::TAG_ALTERNATE_IIOP_ADDRESS
            }
            TaggedComponent::CodeSets(_) => component_tag::TAG_CODE_SETS,
            TaggedComponent::JavaCodebase(_) => component_tag::TAG_JAVA_CODEBASE,
            TaggedComponent::OrbType(_) => component_tag::TAG_ORB_TYPE,
            TaggedComponent::Policies(_) => component_tag::TAG_POLICIES,
            TaggedComponent::Generic(g) => g.id,
        }
    }
}

impl TaggedComponent {
    /// Write `[tag][encapsulated contents]` into the enclosing stream.
    ///
    /// Opaque variants replay their stored payload byte-exact; structured
    /// variants seal a fresh encapsulation in the enclosing byte order.
    pub fn write(&self, out: &mut CdrOutput) -> Result<()> {
        out.write_u32(self.tag());
        match self {
            TaggedComponent::Generic(g) => out.write_octet_seq(&g.data),
            TaggedComponent::Policies(p) => out.write_octet_seq(&p.data),
            structured => {
                let payload = encapsulation::seal(out.byte_order(), |inner| {
                    structured.write_contents(inner)
                })?;
                encapsulation::write_to(out, &payload);
            }
        }
        Ok(())
    }

    /// Write the contents of a structured variant (no tag, no framing)
    fn write_contents(&self, out: &mut CdrOutput) -> Result<()> {
        match self {
            TaggedComponent::AlternateIiopAddress(c) => c.address.write(out),
            TaggedComponent::CodeSets(c) => {
                c.char_data.write(out);
                c.wchar_data.write(out);
            }
            TaggedComponent::JavaCodebase(c) => out.write_string(&c.urls),
            TaggedComponent::OrbType(c) => out.write_u32(c.orb_type),
            // Opaque variants are framed in write().
            TaggedComponent::Policies(_) | TaggedComponent::Generic(_) => unreachable!(),
        }
        Ok(())
    }

    /// Decode the contents of a recognized structured tag from its opened
    /// encapsulation
    pub(crate) fn read_contents(tag: u32, input: &mut CdrInput) -> Result<Option<Self>> {
        Ok(match tag {
            component_tag::TAG_ALTERNATE_IIOP_ADDRESS => {
                Some(TaggedComponent::AlternateIiopAddress(
                    AlternateIiopAddressComponent {
                        address: IiopAddress::read(input)?,
                    },
                ))
            }
            component_tag::TAG_CODE_SETS => Some(TaggedComponent::CodeSets(CodeSetsComponent {
                char_data: CodeSetComponent::read(input)?,
                wchar_data: CodeSetComponent::read(input)?,
            })),
            component_tag::TAG_JAVA_CODEBASE => {
                Some(TaggedComponent::JavaCodebase(JavaCodebaseComponent {
                    urls: input.read_string()?,
                }))
            }
            component_tag::TAG_ORB_TYPE => Some(TaggedComponent::OrbType(OrbTypeComponent {
                orb_type: input.read_u32()?,
            })),
            _ => None,
        })
    }
}
