//! Compile-time resolution of a property set to a [`HintCode`].
//!
//! Every present standard key contributes its payload code to its own hint
//! field; absent keys contribute nothing. Several cache levels may be
//! hinted at once and all of them reach the backend in the same code.
//!
//! ```rust
//! use hyaccess::{hint::*, resolve::resolve};
//! use hyprop::properties;
//!
//! let set = properties![temporality_hint::<Nontemporal>(), l1_cache_hint::<Cached>()];
//! assert_eq!(resolve(&set).raw(), 0x24);
//! ```
//!
//! Runtime entries cannot be resolved:
//!
//! ```compile_fail
//! use hyaccess::resolve::resolve;
//! use hyprop::prelude::*;
//!
//! #[derive(PropertyKey)]
//! #[property(runtime)]
//! pub struct DistanceKey;
//!
//! const SET: PropertySet<PCons<RuntimeValue<DistanceKey, u32>, PNil>> =
//!     properties![RuntimeValue::new(64)];
//! let _ = resolve(&SET);
//! ```
//!
//! Nor can a cache hint whose payload code is zero, since it would be
//! indistinguishable from no hint at all:
//!
//! ```compile_fail
//! use hyaccess::{hint::*, resolve::resolve};
//! use hyprop::prelude::*;
//!
//! #[derive(Payload)]
//! #[payload(code = 0, accepts(L1CacheHintKey))]
//! pub struct VendorDefault;
//!
//! let _ = resolve(&properties![l1_cache_hint::<VendorDefault>()]);
//! ```
use hyprop::prelude::*;

use crate::hint::{
    HintCode, HintField, L1CacheHintKey, L2CacheHintKey, L3CacheHintKey, L4CacheHintKey,
    TemporalityHintKey,
};

#[inline]
const fn code_or_zero(code: Option<u32>) -> u32 {
    match code {
        Some(code) => code,
        None => 0,
    }
}

/// Field value of a cache-level key. A present cache hint must stay
/// distinguishable from an absent one.
#[inline]
const fn cache_code(present: bool, code: Option<u32>) -> u32 {
    let code = code_or_zero(code);
    assert!(
        !present || code != 0,
        "cache hint payload code must be non-zero"
    );
    code
}

/// Property lists that resolve to a hint code at compile time.
///
/// Implemented for every property list; evaluating [`Self::HINT`] fails to
/// compile when the list holds runtime entries or a payload code that does
/// not fit its field.
pub trait ResolveHint:
    PropertyList
    + Query<TemporalityHintKey>
    + Query<L1CacheHintKey>
    + Query<L2CacheHintKey>
    + Query<L3CacheHintKey>
    + Query<L4CacheHintKey>
{
    /// Combined hint code of the list.
    const HINT: HintCode;
}

impl<L> ResolveHint for L
where
    L: PropertyList
        + Query<TemporalityHintKey>
        + Query<L1CacheHintKey>
        + Query<L2CacheHintKey>
        + Query<L3CacheHintKey>
        + Query<L4CacheHintKey>,
{
    const HINT: HintCode = {
        assert!(
            <L as PropertyList>::COMPILE_TIME,
            "memory accesses accept compile-time properties only"
        );
        HintCode::DEFAULT
            .with_field(
                HintField::Temporality,
                code_or_zero(<L as Query<TemporalityHintKey>>::CODE),
            )
            .with_field(
                HintField::L1,
                cache_code(
                    <L as Query<L1CacheHintKey>>::HAS,
                    <L as Query<L1CacheHintKey>>::CODE,
                ),
            )
            .with_field(
                HintField::L2,
                cache_code(
                    <L as Query<L2CacheHintKey>>::HAS,
                    <L as Query<L2CacheHintKey>>::CODE,
                ),
            )
            .with_field(
                HintField::L3,
                cache_code(
                    <L as Query<L3CacheHintKey>>::HAS,
                    <L as Query<L3CacheHintKey>>::CODE,
                ),
            )
            .with_field(
                HintField::L4,
                cache_code(
                    <L as Query<L4CacheHintKey>>::HAS,
                    <L as Query<L4CacheHintKey>>::CODE,
                ),
            )
    };
}

/// Hint code selected by `props`.
#[inline]
pub const fn resolve<L: ResolveHint>(props: &PropertySet<L>) -> HintCode {
    let _ = props;
    const { L::HINT }
}

#[cfg(test)]
mod tests {
    use hyprop::{Properties, properties};

    use super::*;
    use crate::hint::*;

    #[test]
    fn empty_set_is_default() {
        assert_eq!(resolve(&PropertySet::empty()), HintCode::DEFAULT);
    }

    #[test]
    fn temporality_alone() {
        assert_eq!(resolve(&properties![temporality_hint::<Nontemporal>()]).raw(), 0x4);
        assert_eq!(resolve(&properties![temporality_hint::<Temporal>()]).raw(), 0x0);
    }

    #[test]
    fn cache_levels_are_never_default() {
        assert_eq!(resolve(&properties![l1_cache_hint::<Uncached>()]).raw(), 0x10);
        assert_eq!(resolve(&properties![l2_cache_hint::<Cached>()]).raw(), 0x200);
        assert_eq!(resolve(&properties![l3_cache_hint::<Streaming>()]).raw(), 0x3000);
        assert_eq!(resolve(&properties![l4_cache_hint::<WriteBack>()]).raw(), 0x7_0000);
    }

    #[test]
    fn every_level_combined() {
        type All = Properties![
            L4CacheHint<ConstCached>,
            TemporalityHint<Nontemporal>,
            L2CacheHint<InvalidateAfterRead>,
            L1CacheHint<WriteThrough>,
            L3CacheHint<Uncached>,
        ];
        let code = resolve(&All::default());
        assert_eq!(code.raw(), 0x5_1464);
        assert_eq!(code.field(HintField::L3), 0x1);
    }

    #[test]
    #[should_panic(expected = "cache hint payload code must be non-zero")]
    fn zero_cache_code_is_rejected() {
        let _ = cache_code(true, Some(0));
    }

    #[test]
    fn absent_cache_key_may_be_zero() {
        assert_eq!(cache_code(false, None), 0);
        assert_eq!(cache_code(true, Some(0x3)), 0x3);
    }

    #[test]
    fn unrelated_keys_do_not_change_the_hint() {
        #[derive(PropertyKey)]
        struct ColorKey;
        #[derive(Payload)]
        #[payload(code = 0xFF, accepts(ColorKey))]
        struct Red;

        let set = properties![ColorKey::value::<Red>(), temporality_hint::<Nontemporal>()];
        assert_eq!(resolve(&set).raw(), 0x4);
    }
}
