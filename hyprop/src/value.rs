//! Property values: a key bound to a payload.
use std::{fmt, hash::Hash, marker::PhantomData};

use crate::{
    key::{PayloadFor, PropertyKey},
    kind::KindId,
};

pub(crate) mod property_sealed {
    pub trait Sealed {}
}

/// Common interface of every entry that can be stored in a property set.
///
/// This trait is sealed; the two implementors are [`PropertyValue`]
/// (compile-time) and [`RuntimeValue`] (runtime data).
pub trait Property: property_sealed::Sealed + Sized {
    /// Key this entry is bound to.
    type Key: PropertyKey;

    /// Identity of [`Self::Key`].
    const KIND: KindId = <Self::Key as PropertyKey>::KIND;

    /// Payload code, for compile-time entries.
    const CODE: Option<u32>;

    /// Whether the entry is fully known at compile time.
    const COMPILE_TIME: bool;

    /// Runtime description of the entry, for diagnostics.
    fn descriptor(&self) -> PropertyDescriptor;
}

/// A compile-time property value: key `K` bound to payload `P`.
///
/// The type is zero-sized. It can only be formed for payloads accepted by
/// the key, and only for compile-time keys:
///
/// ```compile_fail
/// use hyprop::prelude::*;
///
/// #[derive(PropertyKey)]
/// pub struct KeyA;
/// #[derive(PropertyKey)]
/// pub struct KeyB;
///
/// #[derive(Payload)]
/// #[payload(code = 1, accepts(KeyA))]
/// pub struct OnlyForA;
///
/// let _ = PropertyValue::<KeyB, OnlyForA>::new();
/// ```
pub struct PropertyValue<K: PropertyKey, P: PayloadFor<K>> {
    _marker: PhantomData<fn() -> (K, P)>,
}

impl<K: PropertyKey, P: PayloadFor<K>> PropertyValue<K, P> {
    /// Form the value. Fails to compile for runtime keys.
    #[inline]
    pub const fn new() -> Self {
        const {
            assert!(
                K::COMPILE_TIME,
                "runtime property key cannot hold a compile-time payload"
            )
        };
        Self {
            _marker: PhantomData,
        }
    }

    /// Code carried by the payload.
    #[inline]
    pub const fn code() -> u32 {
        P::CODE
    }
}

impl<K: PropertyKey, P: PayloadFor<K>> property_sealed::Sealed for PropertyValue<K, P> {}

impl<K: PropertyKey, P: PayloadFor<K>> Property for PropertyValue<K, P> {
    type Key = K;
    const CODE: Option<u32> = Some(P::CODE);
    const COMPILE_TIME: bool = true;

    fn descriptor(&self) -> PropertyDescriptor {
        PropertyDescriptor {
            kind: K::KIND,
            payload: P::NAME,
            code: Some(P::CODE),
            compile_time: true,
        }
    }
}

impl<K: PropertyKey, P: PayloadFor<K>> Clone for PropertyValue<K, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: PropertyKey, P: PayloadFor<K>> Copy for PropertyValue<K, P> {}

impl<K: PropertyKey, P: PayloadFor<K>> Default for PropertyValue<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PropertyKey, P: PayloadFor<K>> PartialEq for PropertyValue<K, P> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<K: PropertyKey, P: PayloadFor<K>> Eq for PropertyValue<K, P> {}

impl<K: PropertyKey, P: PayloadFor<K>> Hash for PropertyValue<K, P> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        K::KIND.hash(state);
        P::CODE.hash(state);
    }
}

impl<K: PropertyKey, P: PayloadFor<K>> fmt::Debug for PropertyValue<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{}>", K::KIND.name(), P::NAME)
    }
}

/// A property value whose data is only known at run time.
///
/// Sets holding runtime values can be queried like any other set but are
/// refused by compile-time-only consumers.
pub struct RuntimeValue<K: PropertyKey, D> {
    data: D,
    _key: PhantomData<fn() -> K>,
}

impl<K: PropertyKey, D> RuntimeValue<K, D> {
    /// Bind `data` to the runtime key `K`. Fails to compile for compile-time keys.
    #[inline]
    pub const fn new(data: D) -> Self {
        const {
            assert!(
                !K::COMPILE_TIME,
                "compile-time property key cannot hold runtime data"
            )
        };
        Self {
            data,
            _key: PhantomData,
        }
    }

    /// Borrow the carried data.
    #[inline]
    pub fn value(&self) -> &D {
        &self.data
    }

    /// Take the carried data.
    #[inline]
    pub fn into_inner(self) -> D {
        self.data
    }
}

impl<K: PropertyKey, D> property_sealed::Sealed for RuntimeValue<K, D> {}

impl<K: PropertyKey, D> Property for RuntimeValue<K, D> {
    type Key = K;
    const CODE: Option<u32> = None;
    const COMPILE_TIME: bool = false;

    fn descriptor(&self) -> PropertyDescriptor {
        PropertyDescriptor {
            kind: K::KIND,
            payload: std::any::type_name::<D>(),
            code: None,
            compile_time: false,
        }
    }
}

impl<K: PropertyKey, D: Clone> Clone for RuntimeValue<K, D> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            _key: PhantomData,
        }
    }
}

impl<K: PropertyKey, D: Copy> Copy for RuntimeValue<K, D> {}

impl<K: PropertyKey, D: PartialEq> PartialEq for RuntimeValue<K, D> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<K: PropertyKey, D: fmt::Debug> fmt::Debug for RuntimeValue<K, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", K::KIND.name(), self.data)
    }
}

/// Runtime description of one entry of a property set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyDescriptor {
    pub kind: KindId,
    /// Payload name, or the data type name for runtime entries.
    pub payload: &'static str,
    pub code: Option<u32>,
    pub compile_time: bool,
}

impl fmt::Display for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.compile_time {
            write!(f, "{}<{}>", self.kind.name(), self.payload)
        } else {
            write!(f, "{}(<runtime {}>)", self.kind.name(), self.payload)
        }
    }
}
