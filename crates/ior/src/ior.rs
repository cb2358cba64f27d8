//! The IOR itself: a repository type id plus a sequence of tagged profiles,
//! with the `IOR:` stringified form layered on top.

use crate::constants::profile_tag;
use crate::identifiable::TaggedSeq;
use crate::iiop::{IiopProfile, IiopProfileTemplate};
use crate::object_key::ObjectId;
use crate::profile::TaggedProfile;
use crate::registry::CodecRegistry;
use crate::{encapsulation, IorError, Result};
use corba_cdr::{ByteOrder, CdrInput, CdrOutput};

/// An interoperable object reference
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ior {
    type_id: String,
    profiles: TaggedSeq<TaggedProfile>,
}

impl Ior {
    /// The nil reference: empty type id, no profiles
    pub fn null() -> Self {
        Self {
            type_id: String::new(),
            profiles: TaggedSeq::new("IOR profiles"),
        }
    }

    /// Whether this is the nil reference
    pub fn is_null(&self) -> bool {
        self.type_id.is_empty() && self.profiles.is_empty()
    }

    /// Reference with a single IIOP profile stamped from `template` for the
    /// object identified by `id`
    pub fn new(
        type_id: impl Into<String>,
        template: IiopProfileTemplate,
        id: ObjectId,
    ) -> Result<Self> {
        let mut ior = Self {
            type_id: type_id.into(),
            profiles: TaggedSeq::new("IOR profiles"),
        };
        ior.profiles
            .push(TaggedProfile::Iiop(IiopProfile::new(id, template)))?;
        Ok(ior)
    }

    /// Reference with one IIOP profile per template, all addressing the same
    /// object id
    pub fn from_template(
        type_id: impl Into<String>,
        templates: &IorTemplate,
        id: &ObjectId,
    ) -> Result<Self> {
        let mut ior = Self {
            type_id: type_id.into(),
            profiles: TaggedSeq::new("IOR profiles"),
        };
        for template in templates.iter() {
            ior.profiles.push(TaggedProfile::Iiop(IiopProfile::new(
                id.clone(),
                template.clone(),
            )))?;
        }
        Ok(ior)
    }

    /// Reference with one IIOP profile per template, pairing the templates
    /// with per-profile object ids positionally.
    ///
    /// Fails before building any profile if the counts differ.
    pub fn from_template_with_ids(
        type_id: impl Into<String>,
        templates: &IorTemplate,
        ids: &[ObjectId],
    ) -> Result<Self> {
        if ids.len() != templates.len() {
            return Err(IorError::count_mismatch(templates.len(), ids.len()));
        }
        let mut ior = Self {
            type_id: type_id.into(),
            profiles: TaggedSeq::new("IOR profiles"),
        };
        for (template, id) in templates.iter().zip(ids) {
            ior.profiles.push(TaggedProfile::Iiop(IiopProfile::new(
                id.clone(),
                template.clone(),
            )))?;
        }
        Ok(ior)
    }

    /// Append a profile, failing once the reference is frozen
    pub fn add_profile(&mut self, profile: TaggedProfile) -> Result<()> {
        self.profiles.push(profile)
    }

    /// Repository type id
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// Number of profiles
    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    /// All profiles, in order
    pub fn profiles(&self) -> &TaggedSeq<TaggedProfile> {
        &self.profiles
    }

    /// Profiles filed under `tag`, in order
    pub fn profiles_by_tag(&self, tag: u32) -> impl Iterator<Item = &TaggedProfile> + '_ {
        self.profiles.iter_by_tag(tag)
    }

    /// The decoded IIOP profiles, in order
    pub fn iiop_profiles(&self) -> impl Iterator<Item = &IiopProfile> + '_ {
        self.profiles
            .iter_by_tag(profile_tag::TAG_INTERNET_IOP)
            .filter_map(TaggedProfile::as_iiop)
    }

    /// Freeze the reference, deeply: every contained IIOP profile template
    /// is frozen first, then the profile list itself. Idempotent.
    pub fn make_immutable(&mut self) {
        for profile in self.profiles.items_mut() {
            if let TaggedProfile::Iiop(p) = profile {
                p.template.make_immutable();
            }
        }
        self.profiles.make_immutable();
    }

    /// Whether the reference has been frozen
    pub fn is_immutable(&self) -> bool {
        self.profiles.is_frozen()
    }

    /// Whether two references address the same object.
    ///
    /// Type ids are documentation, not identity; two references are
    /// equivalent when any IIOP profile of one is endpoint-and-key
    /// equivalent to any IIOP profile of the other.
    pub fn is_equivalent(&self, other: &Ior) -> bool {
        self.iiop_profiles()
            .any(|mine| other.iiop_profiles().any(|theirs| mine.is_equivalent(theirs)))
    }

    /// Write `[string type_id][u32 count][profiles...]`
    pub fn write(&self, out: &mut CdrOutput) -> Result<()> {
        out.write_string(&self.type_id);
        out.write_u32(self.profiles.len() as u32);
        for profile in self.profiles.iter() {
            profile.write(out)?;
        }
        Ok(())
    }

    /// Read the mirrored layout, dispatching profile bodies through the
    /// registry
    pub fn read(registry: &CodecRegistry, input: &mut CdrInput) -> Result<Self> {
        let type_id = input.read_string()?;
        let count = input.read_u32()? as usize;
        let mut profiles = TaggedSeq::new("IOR profiles");
        for _ in 0..count {
            let tag = input.read_u32()?;
            let body = encapsulation::read_raw_from(input)?;
            profiles.push(registry.decode_profile(tag, body)?)?;
        }
        Ok(Self { type_id, profiles })
    }

    /// Produce the `IOR:` stringified form.
    ///
    /// The reference is sealed in a big-endian encapsulation and hex-encoded
    /// lowercase. Decoders accept either case and either byte order.
    pub fn stringify(&self) -> Result<String> {
        let payload = encapsulation::seal(ByteOrder::BigEndian, |out| self.write(out))?;
        Ok(format!("IOR:{}", hex::encode(payload)))
    }

    /// Parse an `IOR:` string produced by [`stringify`] (or any conforming
    /// ORB).
    ///
    /// [`stringify`]: Ior::stringify
    pub fn destringify(registry: &CodecRegistry, s: &str) -> Result<Self> {
        let hex_part = s.strip_prefix("IOR:").ok_or_else(|| {
            IorError::InvalidStringifiedIor("missing IOR: prefix".into())
        })?;
        let payload = hex::decode(hex_part)
            .map_err(|e| IorError::InvalidStringifiedIor(format!("bad hex: {e}")))?;
        let mut input = encapsulation::open(payload.into())?;
        Self::read(registry, &mut input)
    }
}

/// An ordered collection of IIOP profile templates, ready to stamp out
/// references for any number of objects
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct IorTemplate {
    templates: Vec<IiopProfileTemplate>,
}

impl IorTemplate {
    /// An empty template collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a profile template
    pub fn add(&mut self, template: IiopProfileTemplate) {
        self.templates.push(template);
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over the templates in order
    pub fn iter(&self) -> std::slice::Iter<'_, IiopProfileTemplate> {
        self.templates.iter()
    }

    /// Freeze every contained template
    pub fn make_immutable(&mut self) {
        for template in &mut self.templates {
            template.make_immutable();
        }
    }
}
