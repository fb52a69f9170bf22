//! Link-time registry of every declared property kind.
//!
//! Keys are submitted with [`register_property_kind!`] (which
//! `#[derive(PropertyKey)]` emits). The registry is never consulted for
//! matching, which is purely structural; it exists so that tools and
//! backends can enumerate kinds, resolve a fingerprint back to a key, and
//! check that fingerprints are unambiguous.
use std::collections::BTreeMap;

use log::{debug, warn};

use crate::{
    error::{PropError, PropResult},
    key::PropertyKey,
    kind::KindId,
};

/// Inventory entry describing one registered kind.
#[derive(Debug, Clone, Copy)]
pub struct RegisteredKind {
    pub kind: KindId,
    pub compile_time: bool,
}

impl RegisteredKind {
    /// Entry for key `K`.
    pub const fn of<K: PropertyKey>() -> Self {
        Self {
            kind: K::KIND,
            compile_time: K::COMPILE_TIME,
        }
    }
}

inventory::collect!(RegisteredKind);

/// Register a property key type in the global registry.
#[macro_export]
macro_rules! register_property_kind {
    (
        $key:ty
    ) => {
        $crate::inventory::submit! {
            $crate::registry::RegisteredKind::of::<$key>()
        }
    };
    () => {};
}

/// Every registered kind, in link order.
pub fn registered_kinds() -> impl Iterator<Item = &'static RegisteredKind> {
    inventory::iter::<RegisteredKind>.into_iter()
}

/// Look a kind up by its fingerprint.
pub fn find_by_fingerprint(fingerprint: u64) -> Option<&'static RegisteredKind> {
    registered_kinds().find(|entry| entry.kind.fingerprint() == fingerprint)
}

/// Look a kind up by its short name.
///
/// Names are not unique across crates; the first match in link order is
/// returned.
pub fn find_by_name(name: &str) -> PropResult<&'static RegisteredKind> {
    registered_kinds()
        .find(|entry| entry.kind.name() == name)
        .ok_or_else(|| PropError::KindNotFound(name.to_string()))
}

/// Check that no two distinct kinds share a fingerprint.
///
/// Returns the number of distinct kinds. A key registered twice (same
/// path) is counted once.
pub fn verify_registry() -> PropResult<usize> {
    let mut by_fingerprint: BTreeMap<u64, KindId> = BTreeMap::new();

    for entry in registered_kinds() {
        let kind = entry.kind;
        match by_fingerprint.get(&kind.fingerprint()) {
            Some(existing) if existing.same_as(&kind) => {}
            Some(existing) => {
                warn!(
                    "property kinds {} and {} collide on fingerprint {:#018x}",
                    existing.path(),
                    kind.path(),
                    kind.fingerprint()
                );
                return Err(PropError::KindCollision {
                    first: existing.path(),
                    second: kind.path(),
                    fingerprint: kind.fingerprint(),
                });
            }
            None => {
                by_fingerprint.insert(kind.fingerprint(), kind);
            }
        }
    }

    debug!("verified {} property kinds", by_fingerprint.len());
    Ok(by_fingerprint.len())
}
