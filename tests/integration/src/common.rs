//! Shared helpers for the integration test suite.

#![allow(dead_code)]

use std::sync::Once;

use corba_ior::object_key::{ObjectId, ObjectKeyTemplate, OrbVersion, PoaObjectKeyTemplate};
use corba_ior::{IiopAddress, IiopProfileTemplate, Ior};

static INIT: Once = Once::new();

/// Initialize tracing once per test binary; honors RUST_LOG
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A POA-keyed IIOP 1.2 profile template for `host:port`
pub fn poa_template(host: &str, port: i32) -> IiopProfileTemplate {
    let key = PoaObjectKeyTemplate::new(
        36,
        12345,
        "orb-main",
        vec!["RootPOA".to_string(), "Accounts".to_string()],
        OrbVersion::Newer,
    );
    IiopProfileTemplate::new(
        1,
        2,
        IiopAddress::new(host, port).expect("valid port"),
        ObjectKeyTemplate::Poa(key),
    )
}

/// A complete reference with one POA-keyed IIOP profile
pub fn sample_ior() -> Ior {
    Ior::new(
        "IDL:Foo:1.0",
        poa_template("host-a.example.com", 2809),
        ObjectId::from(&b"object-key-1"[..]),
    )
    .expect("fresh IOR accepts a profile")
}
