//! Object key codec: the versioned, magic-dispatched encoding of the opaque
//! key blob embedded in every IIOP profile.
//!
//! Legacy key formats reserved no type discriminator, so decode is a layered
//! sniff: peek a magic, check the buffer length, read a subcontract id, and
//! only then commit to a variant - falling back to the opaque wire format
//! whenever the heuristics fail. The function is total: every byte sequence
//! produces some template, degrading gracefully to [`WireObjectKeyTemplate`].

mod orb_version;
mod template;

pub use orb_version::{OrbVersion, JDK_1_3_1_01_PATCH_LEVEL};
pub use template::{
    compute_adapter_id, JidlObjectKeyTemplate, ObjectKeyTemplate, OldJidlObjectKeyTemplate,
    OldPoaObjectKeyTemplate, PoaObjectKeyTemplate, WireObjectKeyTemplate,
};

use crate::constants::{magic, SubcontractRanges};
use crate::{IorError, Result};
use bytes::Bytes;
use corba_cdr::{ByteOrder, CdrInput, CdrOutput};
use std::fmt;
use tracing::trace;

/// Object identity within an adapter: an opaque byte blob with byte-exact
/// equality
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ObjectId(Bytes);

impl ObjectId {
    /// Wrap raw id bytes
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// The raw id bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the id is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for ObjectId {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

impl From<&[u8]> for ObjectId {
    fn from(bytes: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(bytes))
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", hex::encode(&self.0))
    }
}

/// An object key: the pairing of a template with an object id
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectKey {
    /// The key's codec half
    pub template: ObjectKeyTemplate,
    /// The object identity within the adapter
    pub id: ObjectId,
}

impl ObjectKey {
    /// Create a key from its parts
    pub fn new(template: ObjectKeyTemplate, id: ObjectId) -> Self {
        Self { template, id }
    }

    /// Serialize into a fresh key stream with the given byte order.
    ///
    /// The result is the raw key blob a profile frames with a length prefix.
    pub fn to_bytes(&self, order: ByteOrder) -> Result<Bytes> {
        let mut out = CdrOutput::new(order);
        self.template.write(&self.id, &mut out)?;
        Ok(out.into_bytes())
    }

    /// Decode a key blob, dispatching on the sniffed magic number.
    ///
    /// `order` is the byte order of the enclosing profile stream; the key
    /// blob is a byte-order-matched sub-stream, not an endian-tagged
    /// encapsulation. The decision table:
    ///
    /// 1. Fewer than 4 bytes: the whole buffer is an opaque wire key.
    /// 2. Peek a 4-byte magic without committing.
    /// 3. Magic outside the valid range, or fewer than 8 bytes total:
    ///    rewind, opaque wire key.
    /// 4. Commit; read the subcontract id. POA range picks the POA variant,
    ///    the plain range picks the JIDL variant (old or new per the magic);
    ///    anything else rewinds fully to the wire fallback.
    ///
    /// After commitment, truncated or corrupt data fails with
    /// [`IorError::InvalidObjectKey`]; a sniffed patch byte of zero fails
    /// with [`IorError::InvalidPatchLevel`].
    pub fn decode(ranges: &SubcontractRanges, key_bytes: &[u8], order: ByteOrder) -> Result<Self> {
        let data = Bytes::copy_from_slice(key_bytes);
        let mut input = CdrInput::new(data, order);
        if input.len() >= 4 {
            input.mark();
            let magic_value = input.read_u32()?;
            if (magic::MAGIC_BASE..=magic::MAX_MAGIC).contains(&magic_value) && input.len() >= 8 {
                let scid = input.read_i32()?;
                if ranges.is_poa(scid) {
                    return if magic_value == magic::JAVAMAGIC_NEWER {
                        decode_poa(scid, &mut input)
                    } else {
                        decode_old_poa(magic_value, scid, &mut input)
                    };
                }
                if ranges.is_jidl(scid) {
                    return if magic_value == magic::JAVAMAGIC_NEWER {
                        decode_jidl(scid, &mut input)
                    } else {
                        decode_old_jidl(magic_value, scid, &mut input)
                    };
                }
                trace!(scid, "subcontract id outside all known ranges, falling back to wire key");
            } else {
                trace!(magic = magic_value, len = input.len(), "no recognized key magic");
            }
            input.reset()?;
        }
        // Wire fallback: the entire buffer is the opaque object id.
        Ok(ObjectKey {
            template: ObjectKeyTemplate::Wire(WireObjectKeyTemplate),
            id: ObjectId(input.read_remaining()),
        })
    }
}

/// Wrap post-commitment stream errors: at this point the magic promised a
/// structured key, so truncation is corruption, not a foreign format.
fn corrupt(err: IorError) -> IorError {
    match err {
        IorError::Cdr(e) => IorError::InvalidObjectKey(e.to_string()),
        other => other,
    }
}

fn decode_old_jidl(magic_value: u32, scid: i32, input: &mut CdrInput) -> Result<ObjectKey> {
    let inner = |input: &mut CdrInput| -> Result<ObjectKey> {
        let server_id = input.read_i32()?;
        let id = ObjectId(input.read_octet_seq()?);
        let orb_version = if magic_value == magic::JAVAMAGIC_NEW {
            sniff_patch_version(input)?
        } else {
            OrbVersion::Old
        };
        Ok(ObjectKey {
            template: ObjectKeyTemplate::OldJidl(OldJidlObjectKeyTemplate {
                magic: magic_value,
                scid,
                server_id,
                orb_version,
            }),
            id,
        })
    };
    inner(input).map_err(corrupt)
}

/// Sniff the trailing patch byte introduced by JDK 1.3.1_01.
///
/// Absence means the pre-patch 1.3.1 release; a value of 1 means 1.3.1_01;
/// anything greater means a newer ORB. A literal zero is invalid - zero is
/// not "no patch", absence is.
fn sniff_patch_version(input: &mut CdrInput) -> Result<OrbVersion> {
    if input.remaining() == 0 {
        return Ok(OrbVersion::New);
    }
    let patch = input.read_u8()?;
    if patch == 0 {
        return Err(IorError::InvalidPatchLevel(0));
    }
    if patch == JDK_1_3_1_01_PATCH_LEVEL {
        Ok(OrbVersion::Jdk1_3_1_01)
    } else {
        Ok(OrbVersion::Newer)
    }
}

fn decode_old_poa(magic_value: u32, scid: i32, input: &mut CdrInput) -> Result<ObjectKey> {
    let inner = |input: &mut CdrInput| -> Result<ObjectKey> {
        let server_id = input.read_i32()?;
        let orb_id = input.read_string()?;
        let poa_id = input.read_i32()?;
        let id = ObjectId(input.read_octet_seq()?);
        Ok(ObjectKey {
            template: ObjectKeyTemplate::OldPoa(OldPoaObjectKeyTemplate {
                magic: magic_value,
                scid,
                server_id,
                orb_id,
                poa_id,
            }),
            id,
        })
    };
    inner(input).map_err(corrupt)
}

fn decode_jidl(scid: i32, input: &mut CdrInput) -> Result<ObjectKey> {
    let inner = |input: &mut CdrInput| -> Result<ObjectKey> {
        let server_id = input.read_i32()?;
        let id = ObjectId(input.read_octet_seq()?);
        let orb_version = OrbVersion::read(input)?;
        Ok(ObjectKey {
            template: ObjectKeyTemplate::Jidl(JidlObjectKeyTemplate {
                scid,
                server_id,
                orb_version,
            }),
            id,
        })
    };
    inner(input).map_err(corrupt)
}

fn decode_poa(scid: i32, input: &mut CdrInput) -> Result<ObjectKey> {
    let inner = |input: &mut CdrInput| -> Result<ObjectKey> {
        let server_id = input.read_i32()?;
        let orb_id = input.read_string()?;
        let segments = input.read_u32()? as usize;
        let mut poa_path = Vec::with_capacity(segments.min(64));
        for _ in 0..segments {
            poa_path.push(input.read_string()?);
        }
        let id = ObjectId(input.read_octet_seq()?);
        let orb_version = OrbVersion::read(input)?;
        Ok(ObjectKey {
            template: ObjectKeyTemplate::Poa(PoaObjectKeyTemplate::new(
                scid,
                server_id,
                orb_id,
                poa_path,
                orb_version,
            )),
            id,
        })
    };
    inner(input).map_err(corrupt)
}
