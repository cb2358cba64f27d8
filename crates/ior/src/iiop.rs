//! IIOP profile: the TCP endpoint profile every ORB must understand.
//!
//! A profile body is an encapsulation holding the IIOP version, the primary
//! host/port address, the object key, and (from IIOP 1.1 on) a sequence of
//! tagged components.

use crate::components::TaggedComponent;
use crate::identifiable::TaggedSeq;
use crate::object_key::{ObjectId, ObjectKey, ObjectKeyTemplate};
use crate::registry::CodecRegistry;
use crate::{encapsulation, IorError, Result};
use bytes::Bytes;
use corba_cdr::{CdrInput, CdrOutput};
use std::fmt;

/// Fold a logical port (0..=65535) into the signed 16-bit wire field.
///
/// IDL has no unsigned short mapping in some language bindings, so ports
/// above 32767 travel as negative values.
pub fn fold_port(port: i32) -> i16 {
    if port >= 32768 {
        (port - 65536) as i16
    } else {
        port as i16
    }
}

/// Unfold the signed wire field back to the logical port
pub fn unfold_port(wire: i16) -> i32 {
    if wire < 0 {
        wire as i32 + 65536
    } else {
        wire as i32
    }
}

/// A host/port endpoint as carried in an IIOP profile
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IiopAddress {
    host: String,
    port: i32,
}

impl IiopAddress {
    /// Build an address, validating the port range
    pub fn new(host: impl Into<String>, port: i32) -> Result<Self> {
        if !(0..=65535).contains(&port) {
            return Err(IorError::PortOutOfRange(port));
        }
        Ok(Self {
            host: host.into(),
            port,
        })
    }

    /// Host name or dotted address
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Logical port, 0..=65535
    pub fn port(&self) -> i32 {
        self.port
    }

    /// Write `[string host][i16 folded port]`
    pub fn write(&self, out: &mut CdrOutput) {
        out.write_string(&self.host);
        out.write_i16(fold_port(self.port));
    }

    /// Read the mirrored layout
    pub fn read(input: &mut CdrInput) -> Result<Self> {
        let host = input.read_string()?;
        let port = unfold_port(input.read_i16()?);
        Ok(Self { host, port })
    }
}

impl fmt::Display for IiopAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// The object-id-independent part of an IIOP profile: version, endpoint,
/// key template, and tagged components.
///
/// One template can stamp out profiles for many objects; only the object id
/// differs between them. IIOP 1.0 bodies have no component sequence, so a
/// 1.0 template is frozen at construction - there is nowhere for added
/// components to go on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IiopProfileTemplate {
    major: u8,
    minor: u8,
    primary: IiopAddress,
    key_template: ObjectKeyTemplate,
    components: TaggedSeq<TaggedComponent>,
}

impl IiopProfileTemplate {
    /// Build a template for the given IIOP version, endpoint, and key layout
    pub fn new(
        major: u8,
        minor: u8,
        primary: IiopAddress,
        key_template: ObjectKeyTemplate,
    ) -> Self {
        let mut components = TaggedSeq::new("IIOP profile components");
        if minor == 0 {
            components.make_immutable();
        }
        Self {
            major,
            minor,
            primary,
            key_template,
            components,
        }
    }

    /// IIOP major version
    pub fn major(&self) -> u8 {
        self.major
    }

    /// IIOP minor version
    pub fn minor(&self) -> u8 {
        self.minor
    }

    /// Primary endpoint
    pub fn primary(&self) -> &IiopAddress {
        &self.primary
    }

    /// Object key template
    pub fn key_template(&self) -> &ObjectKeyTemplate {
        &self.key_template
    }

    /// Attach a tagged component.
    ///
    /// Fails with [`IorError::ImmutableMutation`] once the template is
    /// frozen, which for IIOP 1.0 is from birth.
    pub fn add_component(&mut self, component: TaggedComponent) -> Result<()> {
        self.components.push(component)
    }

    /// All components, in attachment order
    pub fn components(&self) -> &TaggedSeq<TaggedComponent> {
        &self.components
    }

    /// Components filed under `tag`, in attachment order
    pub fn components_by_tag(&self, tag: u32) -> impl Iterator<Item = &TaggedComponent> + '_ {
        self.components.iter_by_tag(tag)
    }

    /// Freeze the component list; idempotent
    pub fn make_immutable(&mut self) {
        self.components.make_immutable();
    }

    /// Whether the component list is frozen
    pub fn is_immutable(&self) -> bool {
        self.components.is_frozen()
    }

    /// Write the profile body contents (no tag, no encapsulation framing)
    /// for the object identified by `id`
    pub fn write_contents(&self, id: &ObjectId, out: &mut CdrOutput) -> Result<()> {
        out.write_u8(self.major);
        out.write_u8(self.minor);
        self.primary.write(out);

        // The key is itself CDR in the profile body's byte order, framed as
        // an octet sequence.
        let key = ObjectKey::new(self.key_template.clone(), id.clone());
        let key_bytes = key.to_bytes(out.byte_order())?;
        out.write_octet_seq(&key_bytes);

        if self.minor > 0 {
            out.write_u32(self.components.len() as u32);
            for component in self.components.iter() {
                component.write(out)?;
            }
        }
        Ok(())
    }
}

/// A decoded IIOP profile: a template plus the object id it addresses
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IiopProfile {
    /// The object this profile addresses
    pub object_id: ObjectId,
    /// Version, endpoint, key layout, components
    pub template: IiopProfileTemplate,
}

impl IiopProfile {
    /// Pair a template with an object id
    pub fn new(object_id: ObjectId, template: IiopProfileTemplate) -> Self {
        Self {
            object_id,
            template,
        }
    }

    /// Whether two profiles address the same object through the same
    /// endpoint.
    ///
    /// Compares the primary address and the key template; components and
    /// version are transport hints, not identity.
    pub fn is_equivalent(&self, other: &IiopProfile) -> bool {
        self.template.primary == other.template.primary
            && self.template.key_template == other.template.key_template
    }

    /// Write `[tag][encapsulated body]` into the enclosing stream
    pub fn write(&self, out: &mut CdrOutput) -> Result<()> {
        out.write_u32(crate::constants::profile_tag::TAG_INTERNET_IOP);
        let payload = encapsulation::seal(out.byte_order(), |inner| {
            self.template.write_contents(&self.object_id, inner)
        })?;
        encapsulation::write_to(out, &payload);
        Ok(())
    }

    /// Decode a profile from its raw encapsulated body.
    ///
    /// IIOP 1.0 bodies end at the object key; any trailing bytes are
    /// ignored, since some 1.0 producers padded their encapsulations.
    pub fn read_contents(registry: &CodecRegistry, payload: Bytes) -> Result<Self> {
        let mut input = encapsulation::open(payload)?;
        let major = input.read_u8()?;
        let minor = input.read_u8()?;
        let primary = IiopAddress::read(&mut input)?;

        let key_bytes = input.read_octet_seq()?;
        let key = ObjectKey::decode(registry.ranges(), &key_bytes, input.byte_order())?;

        let mut template = IiopProfileTemplate::new(major, minor, primary, key.template);
        if minor > 0 {
            let count = input.read_u32()? as usize;
            for _ in 0..count {
                let tag = input.read_u32()?;
                let body = encapsulation::read_raw_from(&mut input)?;
                let component = registry.decode_component(tag, body)?;
                template.components.push(component)?;
            }
        }

        Ok(Self {
            object_id: key.id,
            template,
        })
    }
}
