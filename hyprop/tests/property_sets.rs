use hyprop::{
    Properties,
    prelude::*,
    registry::{find_by_fingerprint, registered_kinds, verify_registry},
};

mod vendor_a {
    use hyprop::prelude::*;

    #[derive(PropertyKey)]
    #[property(name = "priority")]
    pub struct PriorityKey;

    #[derive(Payload)]
    #[payload(code = 1, accepts(PriorityKey))]
    pub struct Low;

    #[derive(Payload)]
    #[payload(code = 8, accepts(PriorityKey, super::vendor_b::PriorityKey))]
    pub struct Urgent;
}

mod vendor_b {
    use hyprop::prelude::*;

    // Same identifier and display name as vendor_a's key, different module.
    #[derive(PropertyKey)]
    #[property(name = "priority")]
    pub struct PriorityKey;

    #[derive(PropertyKey)]
    #[property(runtime)]
    pub struct TraceLabelKey;
}

use vendor_a::{Low, Urgent};

#[test]
fn independently_declared_keys_never_collide() {
    assert_ne!(vendor_a::PriorityKey::KIND, vendor_b::PriorityKey::KIND);
    assert_eq!(
        vendor_a::PriorityKey::KIND.name(),
        vendor_b::PriorityKey::KIND.name()
    );

    // Both may coexist in one set since their identities differ.
    let set = properties![
        vendor_a::PriorityKey::value::<Low>(),
        vendor_b::PriorityKey::value::<Urgent>(),
    ];
    assert_eq!(set.code_of::<vendor_a::PriorityKey>(), Some(1));
    assert_eq!(set.code_of::<vendor_b::PriorityKey>(), Some(8));
}

#[test]
fn absent_keys_are_reported_absent() {
    let set = properties![vendor_a::PriorityKey::value::<Urgent>()];
    assert!(!set.has::<vendor_b::PriorityKey>());
    assert!(!set.has::<vendor_b::TraceLabelKey>());
    assert_eq!(set.code_of::<vendor_b::PriorityKey>(), None);
}

#[test]
fn every_inserted_value_is_found() {
    let set = properties![
        vendor_a::PriorityKey::value::<Urgent>(),
        RuntimeValue::<vendor_b::TraceLabelKey, _>::new(String::from("inner loop")),
        vendor_b::PriorityKey::value::<Urgent>(),
    ];

    assert!(set.has::<vendor_a::PriorityKey>());
    assert!(set.has::<vendor_b::TraceLabelKey>());
    assert!(set.has::<vendor_b::PriorityKey>());

    let a: &Value<vendor_a::PriorityKey, Urgent> = set.get::<vendor_a::PriorityKey, _>();
    assert_eq!(*a, vendor_a::PriorityKey::value::<Urgent>());
    assert_eq!(set.get::<vendor_b::TraceLabelKey, _>().value(), "inner loop");
    assert_eq!(
        set.get::<vendor_b::PriorityKey, _>().descriptor().kind,
        vendor_b::PriorityKey::KIND
    );
}

#[test]
fn set_types_can_be_named() {
    type Hot = Properties![Value<vendor_a::PriorityKey, Urgent>];
    const HOT: Hot = properties![PropertyValue::new()];
    const HAS: bool = Hot::contains::<vendor_a::PriorityKey>();

    assert!(HAS);
    assert_eq!(HOT.to_string(), "{priority<urgent>}");
}

#[test]
fn runtime_label_is_described() {
    let set = properties![RuntimeValue::<vendor_b::TraceLabelKey, u16>::new(12)];
    let descriptors = set.descriptors();
    assert_eq!(descriptors.len(), 1);
    assert!(!descriptors[0].compile_time);
    assert_eq!(descriptors[0].code, None);
    assert_eq!(set.to_string(), "{trace_label_key(<runtime u16>)}");
}

#[test]
fn derived_keys_are_registered() {
    for kind in [
        vendor_a::PriorityKey::KIND,
        vendor_b::PriorityKey::KIND,
        vendor_b::TraceLabelKey::KIND,
    ] {
        let entry = find_by_fingerprint(kind.fingerprint()).expect("derived key registered");
        assert_eq!(entry.kind, kind);
    }

    let runtime = registered_kinds()
        .find(|entry| entry.kind == vendor_b::TraceLabelKey::KIND)
        .expect("runtime key registered");
    assert!(!runtime.compile_time);

    assert!(verify_registry().expect("no fingerprint collision") >= 3);
}
