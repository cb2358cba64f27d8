//! Fixed wire images and foreign-ORB inputs: these tests pin the exact byte
//! layout rather than relying on encode-then-decode symmetry.

mod common;

use bytes::Bytes;
use common::*;
use corba_ior::identifiable::GenericIdEncapsulation;
use corba_ior::object_key::ObjectId;
use corba_ior::{CodecRegistry, Ior, TaggedComponent, TaggedProfile};

/// The canonical stringified nil reference, as minted by every major ORB
const NIL_IOR: &str = "IOR:00000000000000010000000000000000";

#[test]
fn test_nil_reference_stringifies_to_the_canonical_form() {
    init_tracing();
    assert_eq!(Ior::null().stringify().expect("stringify"), NIL_IOR);
}

#[test]
fn test_canonical_nil_string_decodes_to_the_nil_reference() {
    init_tracing();
    let registry = CodecRegistry::new();
    let ior = Ior::destringify(&registry, NIL_IOR).expect("destringify");
    assert!(ior.is_null());
}

/// Hand-assembled big-endian reference with one unrecognized profile tag
/// (0xEF). Layout, with CDR alignment pads shown:
///
/// ```text
/// 00                  endian flag (big)
/// 00 00 00            pad to 4
/// 00 00 00 0D         type id length (13, includes NUL)
/// "IDL:Echo:1.0\0"
/// 00 00 00            pad to 24
/// 00 00 00 01         profile count
/// 00 00 00 EF         profile tag
/// 00 00 00 03         encapsulation length
/// 01 02 03            opaque profile body
/// ```
fn foreign_profile_image() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.push(0x00);
    bytes.extend_from_slice(&[0x00, 0x00, 0x00]);
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x0D]);
    bytes.extend_from_slice(b"IDL:Echo:1.0\0");
    bytes.extend_from_slice(&[0x00, 0x00, 0x00]);
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x01]);
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0xEF]);
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x03]);
    bytes.extend_from_slice(&[0x01, 0x02, 0x03]);
    bytes
}

#[test]
fn test_unknown_profile_tag_decodes_and_reserializes_byte_exact() {
    init_tracing();
    let registry = CodecRegistry::new();
    let image = foreign_profile_image();
    let s = format!("IOR:{}", hex::encode(&image));

    let ior = Ior::destringify(&registry, &s).expect("destringify");
    assert_eq!(ior.type_id(), "IDL:Echo:1.0");
    assert_eq!(ior.profile_count(), 1);

    let profile = ior.profiles().get(0).expect("one profile");
    match profile {
        TaggedProfile::Generic(g) => {
            assert_eq!(g.id, 0xEF);
            assert_eq!(g.data.as_ref(), &[0x01, 0x02, 0x03]);
        }
        other => panic!("expected generic passthrough, got {other:?}"),
    }

    // Reserialization reproduces the input image exactly.
    assert_eq!(ior.stringify().expect("stringify"), s);
}

#[test]
fn test_little_endian_image_decodes_to_the_same_reference() {
    init_tracing();
    let registry = CodecRegistry::new();

    // The same reference as foreign_profile_image(), produced by a
    // little-endian peer.
    let mut image = Vec::new();
    image.push(0x01);
    image.extend_from_slice(&[0x00, 0x00, 0x00]);
    image.extend_from_slice(&[0x0D, 0x00, 0x00, 0x00]);
    image.extend_from_slice(b"IDL:Echo:1.0\0");
    image.extend_from_slice(&[0x00, 0x00, 0x00]);
    image.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]);
    image.extend_from_slice(&[0xEF, 0x00, 0x00, 0x00]);
    image.extend_from_slice(&[0x03, 0x00, 0x00, 0x00]);
    image.extend_from_slice(&[0x01, 0x02, 0x03]);

    let from_le = Ior::destringify(&registry, &format!("IOR:{}", hex::encode(&image)))
        .expect("destringify");
    let from_be = Ior::destringify(
        &registry,
        &format!("IOR:{}", hex::encode(foreign_profile_image())),
    )
    .expect("destringify");

    // Byte order is a transport detail; the decoded values are equal.
    assert_eq!(from_le, from_be);
}

#[test]
fn test_unknown_component_survives_inside_an_iiop_profile() {
    init_tracing();
    let registry = CodecRegistry::new();

    let mut template = poa_template("host-a.example.com", 2809);
    // A vendor component this ORB has no decoder for; data is a complete
    // encapsulation (endian flag + contents) kept byte-exact.
    template
        .add_component(TaggedComponent::Generic(GenericIdEncapsulation::new(
            0x4145_0001,
            Bytes::from_static(&[0x00, 0xAA, 0xBB]),
        )))
        .expect("mutable template");

    let ior = Ior::new("IDL:Foo:1.0", template, ObjectId::from(&b"k"[..])).expect("new IOR");
    let s = ior.stringify().expect("stringify");
    let decoded = Ior::destringify(&registry, &s).expect("destringify");
    assert_eq!(decoded, ior);

    let profile = decoded.iiop_profiles().next().expect("one profile");
    let vendor: Vec<_> = profile.template.components_by_tag(0x4145_0001).collect();
    assert_eq!(vendor.len(), 1);
    match vendor[0] {
        TaggedComponent::Generic(g) => {
            assert_eq!(g.data.as_ref(), &[0x00, 0xAA, 0xBB]);
        }
        other => panic!("expected generic component, got {other:?}"),
    }

    // A second trip through the codec is stable.
    assert_eq!(decoded.stringify().expect("stringify"), s);
}
