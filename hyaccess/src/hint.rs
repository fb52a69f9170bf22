//! Memory-access hints
//!
//! Standard property keys consulted by the access layer, their payloads,
//! and the [`HintCode`] handed to the emission backend.
//!
//! A hint code packs one 4-bit field per standard key:
//!
//! | bits    | field                      |
//! |---------|----------------------------|
//! | 0..4    | temporality                |
//! | 4..8    | L1 cache control           |
//! | 8..12   | L2 cache control           |
//! | 12..16  | L3 cache control           |
//! | 16..20  | L4 cache control           |
//!
//! Absent keys leave their field at zero, so an empty property set maps to
//! [`HintCode::DEFAULT`]. Cache-control payloads must be non-zero (checked
//! during resolution), which makes any cache hint visible in the final code.
use std::fmt;

use hyprop::prelude::*;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Width in bits of each hint field.
pub const FIELD_WIDTH: u32 = 4;

/// Mask of a single, unshifted hint field.
pub const FIELD_MASK: u32 = (1 << FIELD_WIDTH) - 1;

/// One field of a [`HintCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
pub enum HintField {
    #[strum(serialize = "temporality")]
    Temporality,
    #[strum(serialize = "L1")]
    L1,
    #[strum(serialize = "L2")]
    L2,
    #[strum(serialize = "L3")]
    L3,
    #[strum(serialize = "L4")]
    L4,
}

impl HintField {
    /// Bit offset of the field inside a hint code.
    #[inline]
    pub const fn shift(self) -> u32 {
        self as u32 * FIELD_WIDTH
    }

    /// Cache level addressed by the field, if it is a cache field.
    #[inline]
    pub const fn cache_level(self) -> Option<u8> {
        match self {
            HintField::Temporality => None,
            HintField::L1 => Some(1),
            HintField::L2 => Some(2),
            HintField::L3 => Some(3),
            HintField::L4 => Some(4),
        }
    }
}

/// Opaque integer handed to the emission backend alongside an access.
///
/// `0x0` is the default temporal access.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct HintCode(u32);

impl HintCode {
    /// No hint: default temporal access.
    pub const DEFAULT: Self = Self(0);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_default(self) -> bool {
        self.0 == 0
    }

    /// Value stored in `field`.
    #[inline]
    pub const fn field(self, field: HintField) -> u32 {
        (self.0 >> field.shift()) & FIELD_MASK
    }

    /// Replace the value stored in `field`.
    ///
    /// Panics (at compile time when used in constant context) if `value`
    /// does not fit in [`FIELD_WIDTH`] bits.
    #[inline]
    pub const fn with_field(self, field: HintField, value: u32) -> Self {
        assert!(
            value <= FIELD_MASK,
            "hint payload code does not fit in its hint field"
        );
        let shift = field.shift();
        Self((self.0 & !(FIELD_MASK << shift)) | (value << shift))
    }

    /// Non-zero fields, in bit order.
    pub fn fields(self) -> impl Iterator<Item = (HintField, u32)> {
        HintField::iter()
            .map(move |field| (field, self.field(field)))
            .filter(|(_, value)| *value != 0)
    }

    /// Human readable decoding of the fields (e.g. `temporality=0x4 L1=0x2`).
    pub fn describe(self) -> String {
        if self.is_default() {
            return "default".to_string();
        }
        self.fields()
            .map(|(field, value)| format!("{}={:#x}", field, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for HintCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Debug for HintCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HintCode({:#x})", self.0)
    }
}

impl fmt::LowerHex for HintCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

// ========================= Keys =========================

/// Whether the accessed data is expected to be reused soon.
#[derive(PropertyKey)]
#[property(name = "temporality_hint")]
pub struct TemporalityHintKey;

#[derive(PropertyKey)]
#[property(name = "L1_cache_hint")]
pub struct L1CacheHintKey;

#[derive(PropertyKey)]
#[property(name = "L2_cache_hint")]
pub struct L2CacheHintKey;

#[derive(PropertyKey)]
#[property(name = "L3_cache_hint")]
pub struct L3CacheHintKey;

#[derive(PropertyKey)]
#[property(name = "L4_cache_hint")]
pub struct L4CacheHintKey;

// ========================= Payloads =========================

/// Regular access; the default.
#[derive(Payload)]
#[payload(code = 0x0, accepts(TemporalityHintKey))]
pub struct Temporal;

/// Data is not expected to be reused; bypass or evict early.
#[derive(Payload)]
#[payload(code = 0x4, accepts(TemporalityHintKey))]
pub struct Nontemporal;

#[derive(Payload)]
#[payload(code = 0x1, accepts(L1CacheHintKey, L2CacheHintKey, L3CacheHintKey, L4CacheHintKey))]
pub struct Uncached;

#[derive(Payload)]
#[payload(code = 0x2, accepts(L1CacheHintKey, L2CacheHintKey, L3CacheHintKey, L4CacheHintKey))]
pub struct Cached;

#[derive(Payload)]
#[payload(code = 0x3, accepts(L1CacheHintKey, L2CacheHintKey, L3CacheHintKey, L4CacheHintKey))]
pub struct Streaming;

#[derive(Payload)]
#[payload(code = 0x4, accepts(L1CacheHintKey, L2CacheHintKey, L3CacheHintKey, L4CacheHintKey))]
pub struct InvalidateAfterRead;

#[derive(Payload)]
#[payload(code = 0x5, accepts(L1CacheHintKey, L2CacheHintKey, L3CacheHintKey, L4CacheHintKey))]
pub struct ConstCached;

#[derive(Payload)]
#[payload(code = 0x6, accepts(L1CacheHintKey, L2CacheHintKey, L3CacheHintKey, L4CacheHintKey))]
pub struct WriteThrough;

#[derive(Payload)]
#[payload(code = 0x7, accepts(L1CacheHintKey, L2CacheHintKey, L3CacheHintKey, L4CacheHintKey))]
pub struct WriteBack;

// ========================= Value formers =========================

pub type TemporalityHint<P> = Value<TemporalityHintKey, P>;
pub type L1CacheHint<P> = Value<L1CacheHintKey, P>;
pub type L2CacheHint<P> = Value<L2CacheHintKey, P>;
pub type L3CacheHint<P> = Value<L3CacheHintKey, P>;
pub type L4CacheHint<P> = Value<L4CacheHintKey, P>;

#[inline]
pub const fn temporality_hint<P: PayloadFor<TemporalityHintKey>>() -> TemporalityHint<P> {
    PropertyValue::new()
}

#[inline]
pub const fn l1_cache_hint<P: PayloadFor<L1CacheHintKey>>() -> L1CacheHint<P> {
    PropertyValue::new()
}

#[inline]
pub const fn l2_cache_hint<P: PayloadFor<L2CacheHintKey>>() -> L2CacheHint<P> {
    PropertyValue::new()
}

#[inline]
pub const fn l3_cache_hint<P: PayloadFor<L3CacheHintKey>>() -> L3CacheHint<P> {
    PropertyValue::new()
}

#[inline]
pub const fn l4_cache_hint<P: PayloadFor<L4CacheHintKey>>() -> L4CacheHint<P> {
    PropertyValue::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_do_not_overlap() {
        let code = HintCode::DEFAULT
            .with_field(HintField::Temporality, 0x4)
            .with_field(HintField::L1, 0x2)
            .with_field(HintField::L4, 0xF);

        assert_eq!(code.raw(), 0xF_0024);
        assert_eq!(code.field(HintField::Temporality), 0x4);
        assert_eq!(code.field(HintField::L1), 0x2);
        assert_eq!(code.field(HintField::L2), 0x0);
        assert_eq!(code.field(HintField::L4), 0xF);
    }

    #[test]
    fn with_field_overwrites() {
        let code = HintCode::from_raw(0x30).with_field(HintField::L1, 0x1);
        assert_eq!(code.raw(), 0x10);
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn oversized_field_value_panics() {
        let _ = HintCode::DEFAULT.with_field(HintField::L2, 0x10);
    }

    #[test]
    fn describe_lists_non_zero_fields() {
        assert_eq!(HintCode::DEFAULT.describe(), "default");
        let code = HintCode::from_raw(0x204);
        assert_eq!(code.describe(), "temporality=0x4 L2=0x2");
        assert_eq!(code.to_string(), "0x204");
    }

    #[test]
    fn standard_keys_are_distinct() {
        let kinds = [
            TemporalityHintKey::KIND,
            L1CacheHintKey::KIND,
            L2CacheHintKey::KIND,
            L3CacheHintKey::KIND,
            L4CacheHintKey::KIND,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(TemporalityHintKey::KIND.name(), "temporality_hint");
        assert_eq!(Nontemporal::CODE, 0x4);
        assert_eq!(Nontemporal::NAME, "nontemporal");
    }
}
