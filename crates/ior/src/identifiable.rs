//! Identifiable record family: tagged entries, the generic (unknown-tag)
//! encapsulation, and the freezable tagged sequence.

use crate::{IorError, Result};
use bytes::Bytes;
use corba_cdr::CdrOutput;

/// A record keyed by a numeric IOP tag id
pub trait TaggedEntry {
    /// The tag id this record is filed under
    fn tag(&self) -> u32;
}

/// Catch-all representation for any tagged id the registry does not
/// recognize.
///
/// `data` is the complete encapsulated payload as read off the wire,
/// including its endian flag, so an ORB that does not understand the tag can
/// still copy, forward, and reserialize the record losing nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericIdEncapsulation {
    /// The unrecognized tag id
    pub id: u32,
    /// The raw encapsulated payload, byte-exact
    pub data: Bytes,
}

impl GenericIdEncapsulation {
    /// Wrap a raw encapsulated payload under a tag id
    pub fn new(id: u32, data: Bytes) -> Self {
        Self { id, data }
    }

    /// Write `[tag][length][payload]`, byte-exact with the original input
    pub fn write(&self, out: &mut CdrOutput) {
        out.write_u32(self.id);
        out.write_octet_seq(&self.data);
    }
}

impl TaggedEntry for GenericIdEncapsulation {
    fn tag(&self) -> u32 {
        self.id
    }
}

/// An ordered, freezable sequence of records.
///
/// Freezing is monotonic and idempotent: once [`make_immutable`] has been
/// called, every mutating call fails with
/// [`IorError::ImmutableMutation`], and freezing again is a no-op. The flag
/// only ever moves from mutable to frozen, so no synchronization is needed.
///
/// [`make_immutable`]: TaggedSeq::make_immutable
#[derive(Clone, Debug)]
pub struct TaggedSeq<T> {
    items: Vec<T>,
    frozen: bool,
    label: &'static str,
}

impl<T> TaggedSeq<T> {
    /// Create an empty, mutable sequence; `label` names the container in
    /// mutation-after-freeze errors
    pub fn new(label: &'static str) -> Self {
        Self {
            items: Vec::new(),
            frozen: false,
            label,
        }
    }

    /// Append a record, failing if the sequence is frozen
    pub fn push(&mut self, item: T) -> Result<()> {
        if self.frozen {
            return Err(IorError::ImmutableMutation(self.label));
        }
        self.items.push(item);
        Ok(())
    }

    /// Freeze the sequence. Shallow: contained records are not frozen here;
    /// callers that own freezable sub-parts freeze those first.
    pub fn make_immutable(&mut self) {
        self.frozen = true;
    }

    /// Whether the sequence has been frozen
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the records in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Record at position `index`
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Mutable view for recursive freezing; bypasses the frozen check and is
    /// therefore crate-internal
    pub(crate) fn items_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T: TaggedEntry> TaggedSeq<T> {
    /// Iterate over records filed under `tag`.
    ///
    /// Each call produces an independent traversal; the iterator is finite
    /// and not restartable.
    pub fn iter_by_tag(&self, tag: u32) -> impl Iterator<Item = &T> + '_ {
        self.items.iter().filter(move |item| item.tag() == tag)
    }
}

// Equality is structural over the records; the frozen flag is a lifecycle
// property, not part of the value.
impl<T: PartialEq> PartialEq for TaggedSeq<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for TaggedSeq<T> {}
