//! Annotated loads and stores.
//!
//! Every function here resolves the hint code of its property set at
//! compile time, reports the access to an emitter exactly once, and then
//! performs the plain memory operation. Leaving the set out is the same as
//! passing [`PropertySet::empty`].
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use hyaccess::{access, emit::{self, RecordingEmitter}, hint::*};
//! use hyprop::properties;
//!
//! let recorder = Arc::new(RecordingEmitter::new());
//! let data = [1.5f64, 2.5];
//!
//! let x = emit::with_emitter(recorder.clone(), || unsafe {
//!     access::load(data.as_ptr(), properties![temporality_hint::<Nontemporal>()])
//! });
//! assert_eq!(x, 1.5);
//! assert_eq!(recorder.last().unwrap().hint.raw(), 0x4);
//! ```
use hyprop::prelude::*;

use crate::{
    emit::{AccessEmitter, AccessKind, CurrentEmitter},
    hint::HintCode,
    resolve::ResolveHint,
};

/// Hint code of the property list `L`, evaluated at compile time.
#[inline(always)]
pub const fn hint_of<L: ResolveHint>() -> HintCode {
    const { L::HINT }
}

/// Read `*addr`, reporting the access to `emitter`.
///
/// # Safety
/// `addr` must satisfy the requirements of [`std::ptr::read`].
#[inline]
pub unsafe fn load_in<T: Copy, L: ResolveHint>(
    emitter: &(impl AccessEmitter + ?Sized),
    addr: *const T,
    props: PropertySet<L>,
) -> T {
    let _ = props;
    emitter.emit_access(addr.cast(), hint_of::<L>(), AccessKind::Read);
    // SAFETY: upheld by the caller.
    unsafe { addr.read() }
}

/// Write `value` to `*addr`, reporting the access to `emitter`.
///
/// # Safety
/// `addr` must satisfy the requirements of [`std::ptr::write`].
#[inline]
pub unsafe fn store_in<T: Copy, L: ResolveHint>(
    emitter: &(impl AccessEmitter + ?Sized),
    addr: *mut T,
    value: T,
    props: PropertySet<L>,
) {
    let _ = props;
    emitter.emit_access(addr.cast_const().cast(), hint_of::<L>(), AccessKind::Write);
    // SAFETY: upheld by the caller.
    unsafe { addr.write(value) }
}

/// [`load_in`] through the [`CurrentEmitter`].
///
/// # Safety
/// `addr` must satisfy the requirements of [`std::ptr::read`].
#[inline]
pub unsafe fn load<T: Copy, L: ResolveHint>(addr: *const T, props: PropertySet<L>) -> T {
    unsafe { load_in(&CurrentEmitter, addr, props) }
}

/// [`store_in`] through the [`CurrentEmitter`].
///
/// # Safety
/// `addr` must satisfy the requirements of [`std::ptr::write`].
#[inline]
pub unsafe fn store<T: Copy, L: ResolveHint>(addr: *mut T, value: T, props: PropertySet<L>) {
    unsafe { store_in(&CurrentEmitter, addr, value, props) }
}

/// Load with no property set; emits [`HintCode::DEFAULT`].
///
/// # Safety
/// `addr` must satisfy the requirements of [`std::ptr::read`].
#[inline]
pub unsafe fn load_default<T: Copy>(addr: *const T) -> T {
    unsafe { load(addr, PropertySet::empty()) }
}

/// Store with no property set; emits [`HintCode::DEFAULT`].
///
/// # Safety
/// `addr` must satisfy the requirements of [`std::ptr::write`].
#[inline]
pub unsafe fn store_default<T: Copy>(addr: *mut T, value: T) {
    unsafe { store(addr, value, PropertySet::empty()) }
}

/// Annotated load from a reference.
#[inline]
pub fn load_ref<T: Copy, L: ResolveHint>(place: &T, props: PropertySet<L>) -> T {
    // SAFETY: references are valid for reads.
    unsafe { load(std::ptr::from_ref(place), props) }
}

/// Annotated store through a mutable reference.
#[inline]
pub fn store_mut<T: Copy, L: ResolveHint>(place: &mut T, value: T, props: PropertySet<L>) {
    // SAFETY: mutable references are valid for writes.
    unsafe { store(std::ptr::from_mut(place), value, props) }
}

#[cfg(test)]
mod tests {
    use hyprop::properties;

    use super::*;
    use crate::{emit::RecordingEmitter, hint::*};

    #[test]
    fn one_emission_per_access() {
        let recorder = RecordingEmitter::new();
        let mut slot = 7u32;

        let v = unsafe { load_in(&recorder, &raw const slot, PropertySet::empty()) };
        unsafe { store_in(&recorder, &raw mut slot, v + 1, PropertySet::empty()) };

        assert_eq!(slot, 8);
        let records = recorder.take();
        assert_eq!(records.len(), 2);
        assert!(records[0].kind.is_read());
        assert!(records[1].kind.is_write());
        assert_eq!(records[0].address, records[1].address);
        assert!(records.iter().all(|r| r.hint.is_default()));
    }

    #[test]
    fn store_carries_hint() {
        let recorder = RecordingEmitter::new();
        let mut slot = 0.0f32;
        let props = properties![
            temporality_hint::<Nontemporal>(),
            l2_cache_hint::<WriteBack>()
        ];

        unsafe { store_in(&recorder, &raw mut slot, 2.0, props) };

        assert_eq!(slot, 2.0);
        let last = recorder.last().unwrap();
        assert_eq!(last.hint.raw(), 0x704);
        assert_eq!(last.address, &slot as *const f32 as usize);
    }

    #[test]
    fn hint_of_matches_resolve() {
        let props = properties![l3_cache_hint::<Streaming>()];
        assert_eq!(
            hint_of::<PCons<L3CacheHint<Streaming>, PNil>>(),
            crate::resolve::resolve(&props)
        );
    }
}
