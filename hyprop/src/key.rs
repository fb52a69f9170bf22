//! Property keys and payloads.
//!
//! A key is a zero-sized tag naming one category of metadata (e.g.
//! "temporality"). A payload is a zero-sized tag carrying an opaque `u32`
//! code. The pair `(key, payload)` forms a [`PropertyValue`], and only
//! payloads that declare [`PayloadFor<K>`] may be paired with `K`.
//!
//! Both are usually declared through the derive macros:
//!
//! ```rust
//! use hyprop::prelude::*;
//!
//! #[derive(PropertyKey)]
//! #[property(name = "prefetch")]
//! pub struct PrefetchKey;
//!
//! #[derive(Payload)]
//! #[payload(code = 3, accepts(PrefetchKey))]
//! pub struct Aggressive;
//!
//! let value = PrefetchKey::value::<Aggressive>();
//! assert_eq!(value.descriptor().code, Some(3));
//! assert_eq!(PrefetchKey::KIND.name(), "prefetch");
//! ```
use crate::{kind::KindId, value::PropertyValue};

/// Identity of one category of metadata.
///
/// Implementors are expected to be zero-sized and to obtain their
/// [`KindId`] from their own path; `#[derive(PropertyKey)]` does both and
/// registers the key in [`crate::registry`].
pub trait PropertyKey: 'static {
    /// Structural identity of the key.
    const KIND: KindId;

    /// Whether values of this key are fully known at compile time.
    ///
    /// Runtime keys take [`crate::value::RuntimeValue`] instead of
    /// [`PropertyValue`].
    const COMPILE_TIME: bool = true;

    /// Form the value of this key bound to payload `P`.
    #[inline]
    fn value<P: PayloadFor<Self>>() -> PropertyValue<Self, P>
    where
        Self: Sized,
    {
        PropertyValue::new()
    }
}

/// A tag carrying the opaque code attached to a property value.
pub trait Payload: 'static {
    /// Name used in diagnostics (e.g. `nontemporal`).
    const NAME: &'static str;

    /// Opaque code interpreted only by consumers of the property set.
    const CODE: u32;
}

/// Marks payloads `Self` that may be bound to key `K`.
pub trait PayloadFor<K: PropertyKey>: Payload {}

/// Value former of key `K`: the property value bound to payload `P`.
pub type Value<K, P> = PropertyValue<K, P>;
