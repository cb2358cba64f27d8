//! Object key dispatch across every key generation, exercised through the
//! full profile codec rather than the key codec alone.

mod common;

use common::*;
use corba_cdr::ByteOrder;
use corba_ior::object_key::{
    JidlObjectKeyTemplate, ObjectId, ObjectKey, ObjectKeyTemplate, OldJidlObjectKeyTemplate,
    OldPoaObjectKeyTemplate, OrbVersion, PoaObjectKeyTemplate, WireObjectKeyTemplate,
};
use corba_ior::constants::magic::{JAVAMAGIC_NEW, JAVAMAGIC_OLD};
use corba_ior::{CodecRegistry, IiopAddress, IiopProfileTemplate, Ior, SubcontractRanges};

fn every_template() -> Vec<ObjectKeyTemplate> {
    vec![
        ObjectKeyTemplate::Wire(WireObjectKeyTemplate),
        ObjectKeyTemplate::OldJidl(OldJidlObjectKeyTemplate {
            magic: JAVAMAGIC_OLD,
            scid: 2,
            server_id: 17,
            orb_version: OrbVersion::Old,
        }),
        ObjectKeyTemplate::OldJidl(OldJidlObjectKeyTemplate {
            magic: JAVAMAGIC_NEW,
            scid: 2,
            server_id: 17,
            orb_version: OrbVersion::Jdk1_3_1_01,
        }),
        ObjectKeyTemplate::OldPoa(OldPoaObjectKeyTemplate {
            magic: JAVAMAGIC_NEW,
            scid: 40,
            server_id: 21,
            orb_id: "legacy-orb".to_string(),
            poa_id: 3,
        }),
        ObjectKeyTemplate::Jidl(JidlObjectKeyTemplate {
            scid: 5,
            server_id: 99,
            orb_version: OrbVersion::Newer,
        }),
        ObjectKeyTemplate::Poa(PoaObjectKeyTemplate::new(
            36,
            12345,
            "orb-main",
            vec!["RootPOA".to_string(), "Billing".to_string()],
            OrbVersion::Peorb,
        )),
    ]
}

fn profile_with_key(key_template: ObjectKeyTemplate) -> IiopProfileTemplate {
    IiopProfileTemplate::new(
        1,
        2,
        IiopAddress::new("host.example.com", 2809).expect("valid port"),
        key_template,
    )
}

#[test]
fn test_every_key_generation_survives_the_profile_codec() {
    init_tracing();
    let registry = CodecRegistry::new();
    let id = ObjectId::from(&b"the-object"[..]);

    for template in every_template() {
        let ior = Ior::new("IDL:Foo:1.0", profile_with_key(template.clone()), id.clone())
            .expect("new IOR");
        let decoded = Ior::destringify(&registry, &ior.stringify().expect("stringify"))
            .expect("destringify");

        let profile = decoded.iiop_profiles().next().expect("one profile");
        assert_eq!(
            profile.template.key_template(),
            &template,
            "key generation lost in transit"
        );
        assert_eq!(profile.object_id, id);
    }
}

#[test]
fn test_key_roundtrips_in_both_byte_orders() {
    init_tracing();
    let ranges = SubcontractRanges::default();
    let id = ObjectId::from(&b"xyz"[..]);

    for template in every_template() {
        for order in [ByteOrder::BigEndian, ByteOrder::LittleEndian] {
            let key = ObjectKey::new(template.clone(), id.clone());
            let bytes = key.to_bytes(order).expect("encode");
            let decoded = ObjectKey::decode(&ranges, &bytes, order).expect("decode");
            assert_eq!(decoded.template, template);
            assert_eq!(decoded.id, id);
        }
    }
}

#[test]
fn test_foreign_keys_pass_through_byte_exact() {
    init_tracing();
    let ranges = SubcontractRanges::default();

    // Assorted shapes a foreign ORB might produce: short, text-like, and
    // binary with no recognizable magic.
    let foreign: &[&[u8]] = &[
        b"",
        b"abc",
        b"NameService",
        &[0x00, 0x00, 0x00, 0x01, 0xFF, 0xFE],
        &[0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x01, 0x02, 0x03],
    ];

    for key_bytes in foreign {
        let decoded =
            ObjectKey::decode(&ranges, key_bytes, ByteOrder::BigEndian).expect("total decode");
        assert!(matches!(decoded.template, ObjectKeyTemplate::Wire(_)));
        assert_eq!(decoded.id.as_bytes(), *key_bytes);

        let reencoded = decoded.to_bytes(ByteOrder::BigEndian).expect("encode");
        assert_eq!(reencoded.as_ref(), *key_bytes);
    }
}

#[test]
fn test_wire_key_sentinels_after_decode() {
    init_tracing();
    let ranges = SubcontractRanges::default();
    let decoded =
        ObjectKey::decode(&ranges, b"NameService", ByteOrder::BigEndian).expect("decode");
    assert_eq!(decoded.template.server_id(), -1);
    assert_eq!(decoded.template.subcontract_id(), 2);
    assert_eq!(decoded.template.orb_version(), OrbVersion::Foreign);
}

#[test]
fn test_custom_subcontract_ranges_through_registry() {
    init_tracing();
    // With the POA range moved to 100..=120, scid 36 reads as a plain key.
    let registry = CodecRegistry::with_ranges(SubcontractRanges {
        first_poa_scid: 100,
        max_poa_scid: 120,
    });

    let poa = ObjectKeyTemplate::Poa(PoaObjectKeyTemplate::new(
        36,
        7,
        "orb",
        vec![],
        OrbVersion::Newer,
    ));
    let ior = Ior::new(
        "IDL:Foo:1.0",
        profile_with_key(poa),
        ObjectId::from(&b"k"[..]),
    )
    .expect("new IOR");

    let decoded = Ior::destringify(&registry, &ior.stringify().expect("stringify"))
        .expect("destringify");
    let profile = decoded.iiop_profiles().next().expect("one profile");
    match profile.template.key_template() {
        ObjectKeyTemplate::Jidl(t) => {
            assert_eq!(t.scid, 36);
            assert_eq!(t.server_id, 7);
        }
        other => panic!("expected plain key under shifted ranges, got {other:?}"),
    }
}

#[test]
fn test_adapter_id_stability_across_codec() {
    init_tracing();
    let registry = CodecRegistry::new();
    let ior = sample_ior();
    let original_adapter_id = ior
        .iiop_profiles()
        .next()
        .expect("one profile")
        .template
        .key_template()
        .adapter_id()
        .expect("POA keys have adapter ids");

    let decoded = Ior::destringify(&registry, &ior.stringify().expect("stringify"))
        .expect("destringify");
    let decoded_adapter_id = decoded
        .iiop_profiles()
        .next()
        .expect("one profile")
        .template
        .key_template()
        .adapter_id()
        .expect("POA keys have adapter ids");

    assert_eq!(original_adapter_id, decoded_adapter_id);
}
