//! Codec registry: tag-to-decoder dispatch for profiles and components.
//!
//! Decoding an IOR means repeatedly looking at a `[u32 tag][encapsulation]`
//! pair and deciding how to interpret the body. The registry holds that
//! mapping, pre-populated with the standard tags, and falls back to the
//! byte-exact generic representation for anything unregistered - an unknown
//! tag is never an error.

use crate::components::TaggedComponent;
use crate::constants::{component_tag, profile_tag, SubcontractRanges};
use crate::encapsulation;
use crate::identifiable::GenericIdEncapsulation;
use crate::iiop::IiopProfile;
use crate::profile::TaggedProfile;
use crate::Result;
use bytes::Bytes;
use std::collections::HashMap;
use tracing::trace;

/// Decoder for one component tag: receives the raw encapsulated body
pub type ComponentDecoder =
    Box<dyn Fn(&CodecRegistry, u32, Bytes) -> Result<TaggedComponent> + Send + Sync>;

/// Decoder for one profile tag: receives the raw encapsulated body
pub type ProfileDecoder =
    Box<dyn Fn(&CodecRegistry, u32, Bytes) -> Result<TaggedProfile> + Send + Sync>;

/// Tag dispatch table plus the deployment constants decoding depends on
pub struct CodecRegistry {
    ranges: SubcontractRanges,
    components: HashMap<u32, ComponentDecoder>,
    profiles: HashMap<u32, ProfileDecoder>,
}

impl CodecRegistry {
    /// Registry with the standard tags and default subcontract ranges
    pub fn new() -> Self {
        Self::with_ranges(SubcontractRanges::default())
    }

    /// Registry with the standard tags and the given subcontract ranges
    pub fn with_ranges(ranges: SubcontractRanges) -> Self {
        let mut registry = Self {
            ranges,
            components: HashMap::new(),
            profiles: HashMap::new(),
        };
        registry.install_defaults();
        registry
    }

    fn install_defaults(&mut self) {
        self.register_profile(
            profile_tag::TAG_INTERNET_IOP,
            Box::new(|registry, _tag, body| {
                Ok(TaggedProfile::Iiop(IiopProfile::read_contents(
                    registry, body,
                )?))
            }),
        );

        for tag in [
            component_tag::TAG_ORB_TYPE,
            component_tag::TAG_CODE_SETS,
            component_tag::TAG_ALTERNATE_IIOP_ADDRESS,
            component_tag::TAG_JAVA_CODEBASE,
        ] {
            self.register_component(
                tag,
                Box::new(|_registry, tag, body| {
                    let mut input = encapsulation::open(body)?;
                    match TaggedComponent::read_contents(tag, &mut input)? {
                        Some(component) => Ok(component),
                        // Unreachable for the tags installed here.
                        None => Ok(TaggedComponent::Generic(GenericIdEncapsulation::new(
                            tag,
                            input.read_remaining(),
                        ))),
                    }
                }),
            );
        }

        // Policies stay opaque but keep their own variant, so callers can
        // find them without knowing the tag number.
        self.register_component(
            component_tag::TAG_POLICIES,
            Box::new(|_registry, _tag, body| {
                Ok(TaggedComponent::Policies(crate::components::PoliciesComponent {
                    data: body,
                }))
            }),
        );
    }

    /// The subcontract ranges used for object key dispatch
    pub fn ranges(&self) -> &SubcontractRanges {
        &self.ranges
    }

    /// Install (or replace) the decoder for a component tag
    pub fn register_component(&mut self, tag: u32, decoder: ComponentDecoder) {
        self.components.insert(tag, decoder);
    }

    /// Install (or replace) the decoder for a profile tag
    pub fn register_profile(&mut self, tag: u32, decoder: ProfileDecoder) {
        self.profiles.insert(tag, decoder);
    }

    /// Decode one component body; unregistered tags fall back to the
    /// byte-exact generic representation
    pub fn decode_component(&self, tag: u32, body: Bytes) -> Result<TaggedComponent> {
        match self.components.get(&tag) {
            Some(decoder) => decoder(self, tag, body),
            None => {
                trace!(tag, "unregistered component tag, keeping raw");
                Ok(TaggedComponent::Generic(GenericIdEncapsulation::new(
                    tag, body,
                )))
            }
        }
    }

    /// Decode one profile body; unregistered tags fall back to the
    /// byte-exact generic representation
    pub fn decode_profile(&self, tag: u32, body: Bytes) -> Result<TaggedProfile> {
        match self.profiles.get(&tag) {
            Some(decoder) => decoder(self, tag, body),
            None => {
                trace!(tag, "unregistered profile tag, keeping raw");
                Ok(TaggedProfile::Generic(GenericIdEncapsulation::new(
                    tag, body,
                )))
            }
        }
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}
