//! Annotated pointers and references.
//!
//! An [`AnnotatedPtr`] pairs a raw pointer with a property set. Offsetting
//! keeps the set, and every read or write through it is an annotated
//! access carrying the hint of that set.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use hyaccess::{emit::{self, RecordingEmitter}, hint::*, ptr::AnnotatedPtr};
//! use hyprop::properties;
//!
//! let recorder = Arc::new(RecordingEmitter::new());
//! let mut data = [0.0f64; 8];
//! let p = AnnotatedPtr::new(data.as_mut_ptr(), properties![temporality_hint::<Nontemporal>()]);
//!
//! emit::with_emitter(recorder.clone(), || unsafe {
//!     let x = (p + 4).read();
//!     p.write(x + 1.0);
//! });
//! assert_eq!(data[0], 1.0);
//! assert!(recorder.records().iter().all(|r| r.hint.raw() == 0x4));
//! ```
//!
//! Pointers built from a `*const T` only offer reads:
//!
//! ```compile_fail
//! use hyaccess::{hint::*, ptr::AnnotatedPtr};
//! use hyprop::properties;
//!
//! let data = [0u8; 4];
//! let p = AnnotatedPtr::new_const(data.as_ptr(), properties![l1_cache_hint::<Cached>()]);
//! unsafe { p.write(1) };
//! ```
//!
//! And runtime property entries are rejected:
//!
//! ```compile_fail
//! use hyaccess::ptr::AnnotatedPtr;
//! use hyprop::prelude::*;
//!
//! #[derive(PropertyKey)]
//! #[property(runtime)]
//! pub struct StrideKey;
//!
//! let mut data = [0u8; 4];
//! let _ = AnnotatedPtr::new(data.as_mut_ptr(), properties![RuntimeValue::<StrideKey, _>::new(4usize)]);
//! ```
use std::{
    fmt,
    marker::PhantomData,
    ops::{Add, Sub},
};

use hyprop::prelude::*;

use crate::{
    access,
    emit::{AccessEmitter, CurrentEmitter},
    hint::HintCode,
    resolve::ResolveHint,
};

mod sealed {
    pub trait Sealed {}
}

/// Access mode of an annotated pointer or reference.
pub trait PtrAccess: sealed::Sealed + 'static {
    /// Whether writes are available.
    const WRITABLE: bool;
}

/// Read-only access, for pointers to constant data.
pub enum ReadOnly {}

/// Read and write access.
pub enum ReadWrite {}

impl sealed::Sealed for ReadOnly {}
impl sealed::Sealed for ReadWrite {}

impl PtrAccess for ReadOnly {
    const WRITABLE: bool = false;
}

impl PtrAccess for ReadWrite {
    const WRITABLE: bool = true;
}

/// A raw pointer carrying a property set.
pub struct AnnotatedPtr<T, L: ResolveHint, A: PtrAccess = ReadWrite> {
    ptr: *mut T,
    props: PropertySet<L>,
    _access: PhantomData<A>,
}

impl<T, L: ResolveHint> AnnotatedPtr<T, L, ReadWrite> {
    /// Annotate a mutable pointer.
    #[inline]
    pub const fn new(ptr: *mut T, props: PropertySet<L>) -> Self {
        let _ = const { L::HINT };
        Self {
            ptr,
            props,
            _access: PhantomData,
        }
    }

    #[inline]
    pub const fn as_mut_ptr(&self) -> *mut T {
        self.ptr
    }

    /// Drop write access.
    #[inline]
    pub fn cast_const(self) -> AnnotatedPtr<T, L, ReadOnly> {
        AnnotatedPtr {
            ptr: self.ptr,
            props: self.props,
            _access: PhantomData,
        }
    }

    /// Store `value` through the pointer, reporting it to `emitter`.
    ///
    /// # Safety
    /// The pointer must satisfy the requirements of [`std::ptr::write`].
    #[inline]
    pub unsafe fn write_in(&self, emitter: &(impl AccessEmitter + ?Sized), value: T)
    where
        T: Copy,
        L: Copy,
    {
        unsafe { access::store_in(emitter, self.ptr, value, self.props) }
    }

    /// Annotated store through the pointer.
    ///
    /// # Safety
    /// The pointer must satisfy the requirements of [`std::ptr::write`].
    #[inline]
    pub unsafe fn write(&self, value: T)
    where
        T: Copy,
        L: Copy,
    {
        unsafe { self.write_in(&CurrentEmitter, value) }
    }
}

impl<T, L: ResolveHint> AnnotatedPtr<T, L, ReadOnly> {
    /// Annotate a pointer to constant data.
    #[inline]
    pub const fn new_const(ptr: *const T, props: PropertySet<L>) -> Self {
        let _ = const { L::HINT };
        Self {
            ptr: ptr.cast_mut(),
            props,
            _access: PhantomData,
        }
    }
}

impl<T, L: ResolveHint, A: PtrAccess> AnnotatedPtr<T, L, A> {
    /// Hint code of every access made through this pointer.
    pub const HINT: HintCode = L::HINT;

    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.ptr.cast_const()
    }

    #[inline]
    pub const fn properties(&self) -> &PropertySet<L> {
        &self.props
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    /// Offset by `count` elements. Wraps like [`pointer::wrapping_offset`].
    #[inline]
    pub fn offset(self, count: isize) -> Self {
        Self {
            ptr: self.ptr.wrapping_offset(count),
            props: self.props,
            _access: PhantomData,
        }
    }

    #[inline]
    pub fn add(self, count: usize) -> Self {
        Self {
            ptr: self.ptr.wrapping_add(count),
            props: self.props,
            _access: PhantomData,
        }
    }

    #[inline]
    pub fn sub(self, count: usize) -> Self {
        Self {
            ptr: self.ptr.wrapping_sub(count),
            props: self.props,
            _access: PhantomData,
        }
    }

    /// Load through the pointer, reporting it to `emitter`.
    ///
    /// # Safety
    /// The pointer must satisfy the requirements of [`std::ptr::read`].
    #[inline]
    pub unsafe fn read_in(&self, emitter: &(impl AccessEmitter + ?Sized)) -> T
    where
        T: Copy,
        L: Copy,
    {
        unsafe { access::load_in(emitter, self.ptr.cast_const(), self.props) }
    }

    /// Annotated load through the pointer.
    ///
    /// # Safety
    /// The pointer must satisfy the requirements of [`std::ptr::read`].
    #[inline]
    pub unsafe fn read(&self) -> T
    where
        T: Copy,
        L: Copy,
    {
        unsafe { self.read_in(&CurrentEmitter) }
    }

    /// Annotated reference to the pointee.
    ///
    /// # Safety
    /// The pointer must be valid for reads (and writes, for [`ReadWrite`])
    /// during `'a`, and no other reference to the pointee may be used
    /// meanwhile.
    #[inline]
    pub unsafe fn reference<'a>(self) -> AnnotatedRef<'a, T, L, A> {
        AnnotatedRef {
            ptr: self.ptr,
            props: self.props,
            _marker: PhantomData,
        }
    }
}

impl<T, L: ResolveHint + Copy, A: PtrAccess> Clone for AnnotatedPtr<T, L, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, L: ResolveHint + Copy, A: PtrAccess> Copy for AnnotatedPtr<T, L, A> {}

impl<T, L: ResolveHint, A: PtrAccess> PartialEq for AnnotatedPtr<T, L, A> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.ptr, other.ptr)
    }
}

impl<T, L: ResolveHint, A: PtrAccess> Eq for AnnotatedPtr<T, L, A> {}

impl<T, L: ResolveHint, A: PtrAccess> Add<usize> for AnnotatedPtr<T, L, A> {
    type Output = Self;

    fn add(self, count: usize) -> Self {
        AnnotatedPtr::add(self, count)
    }
}

impl<T, L: ResolveHint, A: PtrAccess> Sub<usize> for AnnotatedPtr<T, L, A> {
    type Output = Self;

    fn sub(self, count: usize) -> Self {
        AnnotatedPtr::sub(self, count)
    }
}

impl<T, L: ResolveHint, A: PtrAccess> fmt::Debug for AnnotatedPtr<T, L, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotatedPtr")
            .field("ptr", &self.ptr)
            .field("props", &self.props)
            .field("writable", &A::WRITABLE)
            .finish()
    }
}

/// A reference whose every load and store is an annotated access.
///
/// Consumed by each access, so a single reference yields a single access.
pub struct AnnotatedRef<'a, T, L: ResolveHint, A: PtrAccess = ReadWrite> {
    ptr: *mut T,
    props: PropertySet<L>,
    _marker: PhantomData<(&'a mut T, A)>,
}

impl<'a, T, L: ResolveHint> AnnotatedRef<'a, T, L, ReadWrite> {
    #[inline]
    pub const fn new(place: &'a mut T, props: PropertySet<L>) -> Self {
        let _ = const { L::HINT };
        Self {
            ptr: std::ptr::from_mut(place),
            props,
            _marker: PhantomData,
        }
    }

    /// Store `value`, reporting the access to `emitter`.
    #[inline]
    pub fn store_in(self, emitter: &(impl AccessEmitter + ?Sized), value: T)
    where
        T: Copy,
    {
        // SAFETY: built from a `&'a mut T` or a writable pointer valid for 'a.
        unsafe { access::store_in(emitter, self.ptr, value, self.props) }
    }

    /// Annotated store.
    #[inline]
    pub fn store(self, value: T)
    where
        T: Copy,
    {
        self.store_in(&CurrentEmitter, value)
    }
}

impl<'a, T, L: ResolveHint> AnnotatedRef<'a, T, L, ReadOnly> {
    #[inline]
    pub const fn new_const(place: &'a T, props: PropertySet<L>) -> Self {
        let _ = const { L::HINT };
        Self {
            ptr: std::ptr::from_ref(place).cast_mut(),
            props,
            _marker: PhantomData,
        }
    }
}

impl<'a, T, L: ResolveHint, A: PtrAccess> AnnotatedRef<'a, T, L, A> {
    /// Load the referenced value, reporting the access to `emitter`.
    #[inline]
    pub fn load_in(self, emitter: &(impl AccessEmitter + ?Sized)) -> T
    where
        T: Copy,
    {
        // SAFETY: valid for reads during 'a by construction.
        unsafe { access::load_in(emitter, self.ptr.cast_const(), self.props) }
    }

    /// Annotated load.
    #[inline]
    pub fn load(self) -> T
    where
        T: Copy,
    {
        self.load_in(&CurrentEmitter)
    }

    /// Address of the referenced value.
    #[inline]
    pub const fn address(&self) -> *const T {
        self.ptr.cast_const()
    }
}

impl<T, L: ResolveHint, A: PtrAccess> fmt::Debug for AnnotatedRef<'_, T, L, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnnotatedRef").field(&self.ptr).finish()
    }
}

#[cfg(test)]
mod tests {
    use hyprop::properties;

    use super::*;
    use crate::{emit::RecordingEmitter, hint::*};

    #[test]
    fn offsets_keep_the_hint() {
        let recorder = RecordingEmitter::new();
        let mut data = [1u16, 2, 3, 4, 5, 6];
        let p = AnnotatedPtr::new(data.as_mut_ptr(), properties![l2_cache_hint::<Streaming>()]);

        let q = (p + 5) - 2;
        assert_eq!(q.as_ptr(), unsafe { data.as_ptr().add(3) });
        assert_eq!(unsafe { q.read_in(&recorder) }, 4);
        assert_eq!(unsafe { p.offset(1).read_in(&recorder) }, 2);

        let hints = recorder.take().into_iter().map(|r| r.hint).collect::<Vec<_>>();
        assert_eq!(hints, [HintCode::from_raw(0x300); 2]);
    }

    #[test]
    fn write_matches_store() {
        let recorder = RecordingEmitter::new();
        let mut a = 0i64;
        let mut b = 0i64;
        let props = properties![temporality_hint::<Nontemporal>()];

        unsafe { AnnotatedPtr::new(&raw mut a, props).write_in(&recorder, 3) };
        unsafe { access::store_in(&recorder, &raw mut b, 3, props) };

        let records = recorder.take();
        assert_eq!(a, b);
        assert_eq!(records[0].hint, records[1].hint);
        assert_eq!(records[0].kind, records[1].kind);
    }

    #[test]
    fn read_only_pointer_reads() {
        let recorder = RecordingEmitter::new();
        let data = [9u8, 8];
        let p = AnnotatedPtr::new_const(data.as_ptr(), properties![l1_cache_hint::<ConstCached>()]);

        assert_eq!(unsafe { p.add(1).read_in(&recorder) }, 8);
        assert_eq!(recorder.last().unwrap().hint.raw(), 0x50);
        assert!(recorder.last().unwrap().kind.is_read());
    }

    #[test]
    fn references_emit_one_access_each() {
        let recorder = RecordingEmitter::new();
        let mut x = 1.25f32;

        let r = AnnotatedRef::new(&mut x, properties![l4_cache_hint::<Uncached>()]);
        r.store_in(&recorder, 2.5);
        let r = AnnotatedRef::new_const(&x, PropertySet::empty());
        assert_eq!(r.load_in(&recorder), 2.5);

        let records = recorder.take();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].hint.raw(), 0x1_0000);
        assert!(records[1].hint.is_default());
    }

    #[test]
    fn reference_debug_shows_only_the_address() {
        let x = 4u8;
        let r = AnnotatedRef::new_const(&x, properties![l1_cache_hint::<Cached>()]);
        assert_eq!(r.address(), &raw const x);
        assert_eq!(format!("{:?}", r), format!("AnnotatedRef({:?})", &raw const x));
    }

    #[test]
    fn pointer_equality_is_by_address() {
        let mut data = [0u8; 2];
        let p = AnnotatedPtr::new(data.as_mut_ptr(), PropertySet::empty());
        assert_eq!(p + 1, p.add(1));
        assert_ne!(p, p + 1);
        assert_eq!(AnnotatedPtr::<u8, PNil, ReadWrite>::HINT, HintCode::DEFAULT);
    }
}
