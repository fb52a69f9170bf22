//! Type-level lists of properties.
//!
//! A property list is either [`PNil`] or [`PCons<H, T>`] where `H` is a
//! [`Property`] and `T` a list. Every query is answered by trait
//! resolution and associated constants, so nothing is inspected at run
//! time:
//!  - [`Query<K>`]: whether key `K` is present, and the code bound to it;
//!  - [`Select<K, I>`]: borrow the entry bound to `K` (absent keys do not
//!    satisfy the bound);
//!  - [`Concat<R>`]: append another list.
use std::marker::PhantomData;

use crate::{
    key::{PayloadFor, PropertyKey},
    value::{Property, PropertyDescriptor, PropertyValue, RuntimeValue},
};

pub(crate) mod list_sealed {
    pub trait Sealed {}
}

/// The empty property list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PNil;

/// A property `H` followed by the list `T`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PCons<H, T> {
    head: H,
    tail: T,
}

impl<H: Property, T: PropertyList> PCons<H, T> {
    /// Prepend `head` to `tail`.
    #[inline]
    pub const fn new(head: H, tail: T) -> Self {
        Self { head, tail }
    }

    /// First entry of the list.
    #[inline]
    pub fn head(&self) -> &H {
        &self.head
    }

    /// Remaining entries.
    #[inline]
    pub fn tail(&self) -> &T {
        &self.tail
    }
}

impl list_sealed::Sealed for PNil {}
impl<H, T> list_sealed::Sealed for PCons<H, T> {}

/// Properties shared by every type-level list.
pub trait PropertyList: list_sealed::Sealed + Sized {
    /// Number of entries.
    const LEN: usize;

    /// Whether two entries share the same key.
    const HAS_DUPLICATES: bool;

    /// Whether every entry is known at compile time.
    const COMPILE_TIME: bool;

    /// Append the descriptor of every entry, in insertion order.
    fn collect_descriptors(&self, out: &mut Vec<PropertyDescriptor>);
}

impl PropertyList for PNil {
    const LEN: usize = 0;
    const HAS_DUPLICATES: bool = false;
    const COMPILE_TIME: bool = true;

    fn collect_descriptors(&self, _out: &mut Vec<PropertyDescriptor>) {}
}

impl<H: Property, T: PropertyList + Query<H::Key>> PropertyList for PCons<H, T> {
    const LEN: usize = 1 + T::LEN;
    const HAS_DUPLICATES: bool = <T as Query<H::Key>>::HAS || T::HAS_DUPLICATES;
    const COMPILE_TIME: bool = H::COMPILE_TIME && T::COMPILE_TIME;

    fn collect_descriptors(&self, out: &mut Vec<PropertyDescriptor>) {
        out.push(self.head.descriptor());
        self.tail.collect_descriptors(out);
    }
}

/// Compile-time membership query for key `K`.
pub trait Query<K: PropertyKey> {
    /// Whether an entry is bound to `K`.
    const HAS: bool;

    /// Code of the compile-time entry bound to `K`, if any.
    const CODE: Option<u32>;
}

impl<K: PropertyKey> Query<K> for PNil {
    const HAS: bool = false;
    const CODE: Option<u32> = None;
}

impl<K: PropertyKey, H: Property, T: Query<K>> Query<K> for PCons<H, T> {
    const HAS: bool = H::KIND.same_as(&K::KIND) || T::HAS;
    const CODE: Option<u32> = if H::KIND.same_as(&K::KIND) {
        H::CODE
    } else {
        T::CODE
    };
}

/// Index marker: the entry is the head of the list.
pub struct Here;

/// Index marker: the entry is in the tail, at index `I`.
pub struct There<I>(PhantomData<I>);

/// Borrow the entry bound to key `K`.
///
/// `I` is inferred; it only exists so that the head and tail impls do not
/// overlap. A list without `K` has no impl, which turns a lookup of an
/// absent key into a compile error.
pub trait Select<K: PropertyKey, I> {
    /// Type of the selected entry.
    type Output: Property<Key = K>;

    fn select(&self) -> &Self::Output;
}

impl<K: PropertyKey, P: PayloadFor<K>, T> Select<K, Here> for PCons<PropertyValue<K, P>, T> {
    type Output = PropertyValue<K, P>;

    fn select(&self) -> &Self::Output {
        &self.head
    }
}

impl<K: PropertyKey, D, T> Select<K, Here> for PCons<RuntimeValue<K, D>, T> {
    type Output = RuntimeValue<K, D>;

    fn select(&self) -> &Self::Output {
        &self.head
    }
}

impl<K: PropertyKey, H, T: Select<K, I>, I> Select<K, There<I>> for PCons<H, T> {
    type Output = T::Output;

    fn select(&self) -> &Self::Output {
        self.tail.select()
    }
}

/// Append list `R` after `Self`.
pub trait Concat<R> {
    type Output;

    fn concat(self, rhs: R) -> Self::Output;
}

impl<R> Concat<R> for PNil {
    type Output = R;

    fn concat(self, rhs: R) -> R {
        rhs
    }
}

impl<H, T: Concat<R>, R> Concat<R> for PCons<H, T> {
    type Output = PCons<H, T::Output>;

    fn concat(self, rhs: R) -> Self::Output {
        PCons {
            head: self.head,
            tail: self.tail.concat(rhs),
        }
    }
}

/// Build a property list value from expressions.
#[doc(hidden)]
#[macro_export]
macro_rules! __plist {
    () => {
        $crate::list::PNil
    };
    ($head:expr $(, $tail:expr)* $(,)?) => {
        $crate::list::PCons::new($head, $crate::__plist!($($tail),*))
    };
}

/// Build a property list type from types.
#[doc(hidden)]
#[macro_export]
macro_rules! __plist_ty {
    () => {
        $crate::list::PNil
    };
    ($head:ty $(, $tail:ty)* $(,)?) => {
        $crate::list::PCons<$head, $crate::__plist_ty!($($tail),*)>
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::KindId;
    use crate::key::Payload;

    struct KeyA;
    impl PropertyKey for KeyA {
        const KIND: KindId = KindId::new("hyprop::list::tests::KeyA", "key_a");
    }

    struct KeyB;
    impl PropertyKey for KeyB {
        const KIND: KindId = KindId::new("hyprop::list::tests::KeyB", "key_b");
    }

    struct Seven;
    impl Payload for Seven {
        const NAME: &'static str = "seven";
        const CODE: u32 = 7;
    }
    impl PayloadFor<KeyA> for Seven {}
    impl PayloadFor<KeyB> for Seven {}

    type A7 = PropertyValue<KeyA, Seven>;
    type B7 = PropertyValue<KeyB, Seven>;

    #[test]
    fn lengths_and_duplicates() {
        assert_eq!(<PNil as PropertyList>::LEN, 0);
        assert_eq!(<crate::__plist_ty!(A7, B7) as PropertyList>::LEN, 2);
        assert!(!<crate::__plist_ty!(A7, B7) as PropertyList>::HAS_DUPLICATES);
        assert!(<crate::__plist_ty!(A7, B7, A7) as PropertyList>::HAS_DUPLICATES);
    }

    #[test]
    fn query_reports_code_of_matching_entry() {
        type L = crate::__plist_ty!(A7);
        assert!(<L as Query<KeyA>>::HAS);
        assert!(!<L as Query<KeyB>>::HAS);
        assert_eq!(<L as Query<KeyA>>::CODE, Some(7));
        assert_eq!(<L as Query<KeyB>>::CODE, None);
    }

    #[test]
    fn select_walks_to_the_tail() {
        let list = crate::__plist!(A7::new(), B7::new());
        let b: &B7 = Select::<KeyB, _>::select(&list);
        assert_eq!(b.descriptor().kind, KeyB::KIND);
    }

    #[test]
    fn concat_preserves_order() {
        let joined = crate::__plist!(A7::new()).concat(crate::__plist!(B7::new()));
        let mut out = Vec::new();
        joined.collect_descriptors(&mut out);
        let kinds: Vec<_> = out.iter().map(|d| d.kind.name()).collect();
        assert_eq!(kinds, ["key_a", "key_b"]);
    }
}
