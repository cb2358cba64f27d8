//! Object key template variants.
//!
//! Five key-encoding generations coexist on the wire. The template is the
//! codec half of an object key: it knows the layout of everything in the key
//! except the object id proper, which it frames as a length-prefixed blob
//! (except for the wire format, where the whole buffer is the id).

use crate::constants::{magic, DEFAULT_WIRE_SCID};
use crate::object_key::{ObjectId, OrbVersion};
use crate::{IorError, Result};
use bytes::Bytes;
use corba_cdr::{ByteOrder, CdrOutput};

/// Derive the adapter identity blob from server id, ORB id, and POA path.
///
/// The blob stands in for "which object adapter minted this key" and lets
/// adapter-identity comparisons run without a live adapter hierarchy. The
/// encoding is fixed big-endian so equal identities compare byte-equal
/// regardless of the enclosing stream's order.
pub fn compute_adapter_id(server_id: i32, orb_id: &str, poa_path: &[String]) -> Bytes {
    let mut out = CdrOutput::new(ByteOrder::BigEndian);
    out.write_i32(server_id);
    out.write_string(orb_id);
    out.write_u32(poa_path.len() as u32);
    for segment in poa_path {
        out.write_string(segment);
    }
    out.into_bytes()
}

/// Fallback for keys that carry no recognized magic: the entire buffer is
/// the opaque object id, and no structure can be assumed.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct WireObjectKeyTemplate;

/// Legacy (pre-1.4) plain-server keys, magics JAVAMAGIC_OLD and
/// JAVAMAGIC_NEW.
///
/// JAVAMAGIC_NEW keys may carry a trailing patch byte; see
/// [`ObjectKey::decode`](crate::object_key::ObjectKey::decode).
///
/// The patch byte can only express {absent, 1, >1}, so the wire form
/// distinguishes exactly `Old`, `New`, `Jdk1_3_1_01`, and `Newer`. Later
/// versions are collapsed to `Newer` on the wire and come back as such.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OldJidlObjectKeyTemplate {
    /// JAVAMAGIC_OLD or JAVAMAGIC_NEW
    pub magic: u32,
    /// Subcontract id
    pub scid: i32,
    /// Server id
    pub server_id: i32,
    /// Derived from the magic and the sniffed patch byte
    pub orb_version: OrbVersion,
}

/// Legacy POA-addressed keys, magics JAVAMAGIC_OLD and JAVAMAGIC_NEW
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OldPoaObjectKeyTemplate {
    /// JAVAMAGIC_OLD or JAVAMAGIC_NEW
    pub magic: u32,
    /// Subcontract id
    pub scid: i32,
    /// Server id
    pub server_id: i32,
    /// ORB id
    pub orb_id: String,
    /// Flat POA id - the old format predates hierarchical POA names
    pub poa_id: i32,
}

impl OldPoaObjectKeyTemplate {
    /// ORB version implied by the magic
    pub fn orb_version(&self) -> OrbVersion {
        if self.magic == magic::JAVAMAGIC_OLD {
            OrbVersion::Old
        } else {
            OrbVersion::New
        }
    }
}

/// Current (1.4+) plain-server keys, magic JAVAMAGIC_NEWER
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JidlObjectKeyTemplate {
    /// Subcontract id
    pub scid: i32,
    /// Server id
    pub server_id: i32,
    /// ORB version trailer
    pub orb_version: OrbVersion,
}

/// Current (1.4+) POA-addressed keys, magic JAVAMAGIC_NEWER.
///
/// Carries the full hierarchical POA name path and caches the derived
/// adapter identity blob.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoaObjectKeyTemplate {
    scid: i32,
    server_id: i32,
    orb_id: String,
    poa_path: Vec<String>,
    orb_version: OrbVersion,
    adapter_id: Bytes,
}

impl PoaObjectKeyTemplate {
    /// Build a POA key template; the adapter id is derived once here
    pub fn new(
        scid: i32,
        server_id: i32,
        orb_id: impl Into<String>,
        poa_path: Vec<String>,
        orb_version: OrbVersion,
    ) -> Self {
        let orb_id = orb_id.into();
        let adapter_id = compute_adapter_id(server_id, &orb_id, &poa_path);
        Self {
            scid,
            server_id,
            orb_id,
            poa_path,
            orb_version,
            adapter_id,
        }
    }

    /// Subcontract id
    pub fn scid(&self) -> i32 {
        self.scid
    }

    /// Server id
    pub fn server_id(&self) -> i32 {
        self.server_id
    }

    /// ORB id
    pub fn orb_id(&self) -> &str {
        &self.orb_id
    }

    /// Hierarchical POA name path, outermost first
    pub fn poa_path(&self) -> &[String] {
        &self.poa_path
    }

    /// ORB version trailer
    pub fn orb_version(&self) -> OrbVersion {
        self.orb_version
    }

    /// The cached adapter identity blob
    pub fn adapter_id(&self) -> &Bytes {
        &self.adapter_id
    }
}

/// The closed object key template family.
///
/// A closed enum rather than open subclassing: the decode decision table is
/// total by construction, with every byte sequence landing in exactly one
/// variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjectKeyTemplate {
    /// Foreign/unrecognized key, whole buffer opaque
    Wire(WireObjectKeyTemplate),
    /// Legacy plain-server key
    OldJidl(OldJidlObjectKeyTemplate),
    /// Legacy POA-addressed key
    OldPoa(OldPoaObjectKeyTemplate),
    /// Current plain-server key
    Jidl(JidlObjectKeyTemplate),
    /// Current POA-addressed key
    Poa(PoaObjectKeyTemplate),
}

impl ObjectKeyTemplate {
    /// Subcontract id; wire-format keys report the fixed default
    pub fn subcontract_id(&self) -> i32 {
        match self {
            ObjectKeyTemplate::Wire(_) => DEFAULT_WIRE_SCID,
            ObjectKeyTemplate::OldJidl(t) => t.scid,
            ObjectKeyTemplate::OldPoa(t) => t.scid,
            ObjectKeyTemplate::Jidl(t) => t.scid,
            ObjectKeyTemplate::Poa(t) => t.scid,
        }
    }

    /// Server id; −1 sentinel for wire-format keys, which have none
    pub fn server_id(&self) -> i32 {
        match self {
            ObjectKeyTemplate::Wire(_) => -1,
            ObjectKeyTemplate::OldJidl(t) => t.server_id,
            ObjectKeyTemplate::OldPoa(t) => t.server_id,
            ObjectKeyTemplate::Jidl(t) => t.server_id,
            ObjectKeyTemplate::Poa(t) => t.server_id,
        }
    }

    /// ORB id; empty for formats that never carried one
    pub fn orb_id(&self) -> &str {
        match self {
            ObjectKeyTemplate::OldPoa(t) => &t.orb_id,
            ObjectKeyTemplate::Poa(t) => &t.orb_id,
            _ => "",
        }
    }

    /// The ORB generation that minted the key
    pub fn orb_version(&self) -> OrbVersion {
        match self {
            ObjectKeyTemplate::Wire(_) => OrbVersion::Foreign,
            ObjectKeyTemplate::OldJidl(t) => t.orb_version,
            ObjectKeyTemplate::OldPoa(t) => t.orb_version(),
            ObjectKeyTemplate::Jidl(t) => t.orb_version,
            ObjectKeyTemplate::Poa(t) => t.orb_version,
        }
    }

    /// The derived adapter identity blob.
    ///
    /// Unavailable for wire-format keys, where no adapter structure can be
    /// assumed.
    pub fn adapter_id(&self) -> Result<Bytes> {
        match self {
            ObjectKeyTemplate::Wire(_) => Err(IorError::AdapterIdUnavailable),
            ObjectKeyTemplate::OldJidl(t) => {
                Ok(compute_adapter_id(t.server_id, "", &[]))
            }
            ObjectKeyTemplate::OldPoa(t) => Ok(compute_adapter_id(
                t.server_id,
                &t.orb_id,
                &[t.poa_id.to_string()],
            )),
            ObjectKeyTemplate::Jidl(t) => Ok(compute_adapter_id(t.server_id, "", &[])),
            ObjectKeyTemplate::Poa(t) => Ok(t.adapter_id.clone()),
        }
    }

    /// Write the template together with its object id.
    ///
    /// Structured formats frame the id as `[u32 len][bytes]`; the wire
    /// format emits the id bytes bare, since the id is the whole key.
    pub fn write(&self, id: &ObjectId, out: &mut CdrOutput) -> Result<()> {
        match self {
            ObjectKeyTemplate::Wire(_) => {
                out.write_octets(id.as_bytes());
            }
            ObjectKeyTemplate::OldJidl(t) => {
                out.write_u32(t.magic);
                out.write_i32(t.scid);
                out.write_i32(t.server_id);
                out.write_octet_seq(id.as_bytes());
                if t.magic == magic::JAVAMAGIC_NEW {
                    // The patch byte appeared mid-stream in 1.3.1_01; its
                    // absence is itself meaningful, so only the patched
                    // generations emit one.
                    match t.orb_version {
                        OrbVersion::Jdk1_3_1_01 => out.write_u8(1),
                        OrbVersion::Newer | OrbVersion::Peorb => out.write_u8(2),
                        _ => {}
                    }
                }
            }
            ObjectKeyTemplate::OldPoa(t) => {
                out.write_u32(t.magic);
                out.write_i32(t.scid);
                out.write_i32(t.server_id);
                out.write_string(&t.orb_id);
                out.write_i32(t.poa_id);
                out.write_octet_seq(id.as_bytes());
            }
            ObjectKeyTemplate::Jidl(t) => {
                out.write_u32(magic::JAVAMAGIC_NEWER);
                out.write_i32(t.scid);
                out.write_i32(t.server_id);
                out.write_octet_seq(id.as_bytes());
                t.orb_version.write(out);
            }
            ObjectKeyTemplate::Poa(t) => {
                out.write_u32(magic::JAVAMAGIC_NEWER);
                out.write_i32(t.scid);
                out.write_i32(t.server_id);
                out.write_string(&t.orb_id);
                out.write_u32(t.poa_path.len() as u32);
                for segment in &t.poa_path {
                    out.write_string(segment);
                }
                out.write_octet_seq(id.as_bytes());
                t.orb_version.write(out);
            }
        }
        Ok(())
    }
}
