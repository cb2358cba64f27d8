//! Interoperable Object Reference (IOR) codec.
//!
//! Implements the GIOP/IIOP object reference wire format: encapsulation
//! framing, tagged profiles and components, the IIOP profile, the versioned
//! object key family, and the `IOR:` stringified form.
//!
//! Decoding is driven by a [`CodecRegistry`] mapping profile and component
//! tags to decoders; anything unregistered survives as a byte-exact
//! [`GenericIdEncapsulation`] so references can be forwarded without loss.
//!
//! ```
//! use corba_ior::object_key::{ObjectId, ObjectKeyTemplate, WireObjectKeyTemplate};
//! use corba_ior::{CodecRegistry, IiopAddress, IiopProfileTemplate, Ior};
//!
//! # fn main() -> corba_ior::Result<()> {
//! let template = IiopProfileTemplate::new(
//!     1,
//!     2,
//!     IiopAddress::new("host.example.com", 2809)?,
//!     ObjectKeyTemplate::Wire(WireObjectKeyTemplate),
//! );
//! let ior = Ior::new("IDL:Foo:1.0", template, ObjectId::from(&b"key"[..]))?;
//!
//! let s = ior.stringify()?;
//! let registry = CodecRegistry::new();
//! assert_eq!(Ior::destringify(&registry, &s)?, ior);
//! # Ok(())
//! # }
//! ```

pub mod components;
pub mod constants;
pub mod encapsulation;
pub mod error;
pub mod identifiable;
pub mod iiop;
pub mod ior;
pub mod object_key;
pub mod profile;
pub mod registry;

pub use components::TaggedComponent;
pub use constants::SubcontractRanges;
pub use error::{IorError, Result};
pub use identifiable::{GenericIdEncapsulation, TaggedEntry, TaggedSeq};
pub use iiop::{IiopAddress, IiopProfile, IiopProfileTemplate};
pub use ior::{Ior, IorTemplate};
pub use object_key::{ObjectId, ObjectKey, ObjectKeyTemplate};
pub use profile::TaggedProfile;
pub use registry::CodecRegistry;
