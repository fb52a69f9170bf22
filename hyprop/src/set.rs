//! Property sets.
//!
//! A [`PropertySet`] wraps a type-level [`PropertyList`] and guarantees
//! that no two entries share a key. Sets are built once, at the call site,
//! and consumed by value:
//!
//! ```rust
//! use hyprop::prelude::*;
//!
//! #[derive(PropertyKey)]
//! pub struct ColorKey;
//! #[derive(PropertyKey)]
//! pub struct SizeKey;
//!
//! #[derive(Payload)]
//! #[payload(code = 2, accepts(ColorKey))]
//! pub struct Blue;
//!
//! let set = properties![ColorKey::value::<Blue>()];
//! assert!(set.has::<ColorKey>());
//! assert!(!set.has::<SizeKey>());
//! assert_eq!(set.get::<ColorKey, _>().descriptor().payload, "blue");
//! assert_eq!(set.code_of::<ColorKey>(), Some(2));
//! assert_eq!(set.to_string(), "{color_key<blue>}");
//! ```
//!
//! Two values bound to the same key are rejected before anything runs:
//!
//! ```compile_fail
//! use hyprop::prelude::*;
//!
//! #[derive(PropertyKey)]
//! pub struct ColorKey;
//! #[derive(Payload)]
//! #[payload(code = 1, accepts(ColorKey))]
//! pub struct Red;
//! #[derive(Payload)]
//! #[payload(code = 2, accepts(ColorKey))]
//! pub struct Blue;
//!
//! let _ = properties![ColorKey::value::<Red>(), ColorKey::value::<Blue>()];
//! ```
//!
//! And so is the lookup of a key the set does not hold:
//!
//! ```compile_fail
//! use hyprop::prelude::*;
//!
//! #[derive(PropertyKey)]
//! pub struct ColorKey;
//! #[derive(PropertyKey)]
//! pub struct SizeKey;
//! #[derive(Payload)]
//! #[payload(code = 1, accepts(ColorKey))]
//! pub struct Red;
//!
//! let set = properties![ColorKey::value::<Red>()];
//! let _ = set.get::<SizeKey, _>();
//! ```
use std::fmt;

use crate::{
    key::PropertyKey,
    list::{Concat, PNil, PropertyList, Query, Select},
    value::PropertyDescriptor,
};

/// A duplicate-free, compile-time-checked collection of property values.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertySet<L: PropertyList> {
    list: L,
}

/// The set holding no property at all.
pub type EmptyProperties = PropertySet<PNil>;

impl PropertySet<PNil> {
    /// The empty set, meaning "no hints given".
    #[inline]
    pub const fn empty() -> Self {
        Self { list: PNil }
    }
}

impl<L: PropertyList> PropertySet<L> {
    /// Wrap `list`. Fails to compile if two entries share a key.
    #[inline]
    pub const fn new(list: L) -> Self {
        const {
            assert!(
                !L::HAS_DUPLICATES,
                "duplicate property key in property set"
            )
        };
        Self { list }
    }

    /// Whether the set holds an entry for key `K`.
    #[inline]
    pub const fn has<K: PropertyKey>(&self) -> bool
    where
        L: Query<K>,
    {
        Self::contains::<K>()
    }

    /// Type-level form of [`Self::has`].
    #[inline]
    pub const fn contains<K: PropertyKey>() -> bool
    where
        L: Query<K>,
    {
        <L as Query<K>>::HAS
    }

    /// The entry bound to key `K`. Only available when the set holds `K`.
    #[inline]
    pub fn get<K: PropertyKey, I>(&self) -> &<L as Select<K, I>>::Output
    where
        L: Select<K, I>,
    {
        self.list.select()
    }

    /// Payload code of the compile-time entry bound to `K`.
    #[inline]
    pub const fn code_of<K: PropertyKey>(&self) -> Option<u32>
    where
        L: Query<K>,
    {
        <L as Query<K>>::CODE
    }

    /// Number of entries.
    #[inline]
    pub const fn len(&self) -> usize {
        L::LEN
    }

    /// Whether the set holds no entry.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        L::LEN == 0
    }

    /// Whether every entry is known at compile time.
    #[inline]
    pub const fn is_compile_time(&self) -> bool {
        L::COMPILE_TIME
    }

    /// Concatenate `other` after `self`. Fails to compile if both hold the same key.
    pub fn merge<R: PropertyList>(
        self,
        other: PropertySet<R>,
    ) -> PropertySet<<L as Concat<R>>::Output>
    where
        L: Concat<R>,
        <L as Concat<R>>::Output: PropertyList,
    {
        PropertySet::new(self.list.concat(other.list))
    }

    /// Descriptors of every entry, in insertion order.
    pub fn descriptors(&self) -> Vec<PropertyDescriptor> {
        let mut out = Vec::with_capacity(L::LEN);
        self.list.collect_descriptors(&mut out);
        out
    }

    /// The underlying list.
    #[inline]
    pub fn list(&self) -> &L {
        &self.list
    }
}

impl<L: PropertyList + Default> Default for PropertySet<L> {
    fn default() -> Self {
        Self::new(L::default())
    }
}

impl<L: PropertyList> fmt::Display for PropertySet<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, descriptor) in self.descriptors().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", descriptor)?;
        }
        f.write_str("}")
    }
}

impl<L: PropertyList> fmt::Debug for PropertySet<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertySet{}", self)
    }
}

/// Build a [`PropertySet`] from property values.
///
/// `properties![]` is the empty set.
#[macro_export]
macro_rules! properties {
    ($($value:expr),* $(,)?) => {
        $crate::set::PropertySet::new($crate::__plist!($($value),*))
    };
}

/// Name the [`PropertySet`] type holding the given property value types.
///
/// ```rust
/// use hyprop::{Properties, prelude::*};
///
/// #[derive(PropertyKey)]
/// pub struct ColorKey;
/// #[derive(Payload)]
/// #[payload(code = 1, accepts(ColorKey))]
/// pub struct Red;
///
/// type RedSet = Properties![Value<ColorKey, Red>];
/// const SET: RedSet = PropertySet::new(PCons::new(PropertyValue::new(), PNil));
/// assert_eq!(SET.len(), 1);
/// ```
#[macro_export]
macro_rules! Properties {
    ($($value:ty),* $(,)?) => {
        $crate::set::PropertySet<$crate::__plist_ty!($($value),*)>
    };
}
