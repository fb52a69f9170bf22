//! Structural identity of property keys.
//!
//! A [`KindId`] is derived from the fully qualified path of the key type
//! (`module_path!()` followed by the type identifier). Two keys declared in
//! different modules or crates therefore never share an identity, and no
//! central enumeration has to be edited when a new key is introduced.
//!
//! Each identity also carries a 64-bit fingerprint (FNV-1a over the path).
//! The fingerprint is the compact integer handed to backends and logs;
//! equality never relies on it alone.
use std::{cmp::Ordering, fmt, hash::Hash};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over `bytes`, usable in constant context.
pub const fn fingerprint_of(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

const fn bytes_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Compile-time identity of a property key type.
#[derive(Clone, Copy)]
pub struct KindId {
    path: &'static str,
    name: &'static str,
    fingerprint: u64,
}

impl KindId {
    /// Build the identity of the key declared at `path`, displayed as `name`.
    ///
    /// ```rust
    /// # use hyprop::kind::KindId;
    /// const A: KindId = KindId::new("my_crate::hints::PrefetchKey", "prefetch");
    /// const B: KindId = KindId::new("other_crate::PrefetchKey", "prefetch");
    /// const _: () = assert!(!A.same_as(&B));
    /// assert_eq!(A.name(), B.name());
    /// ```
    pub const fn new(path: &'static str, name: &'static str) -> Self {
        Self {
            path,
            name,
            fingerprint: fingerprint_of(path.as_bytes()),
        }
    }

    /// Whether `self` and `other` denote the same key type.
    #[inline]
    pub const fn same_as(&self, other: &KindId) -> bool {
        self.fingerprint == other.fingerprint && bytes_eq(self.path.as_bytes(), other.path.as_bytes())
    }

    /// Fully qualified path of the key type.
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Short, human readable name (e.g. `temporality_hint`).
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// 64-bit fingerprint of the path.
    #[inline]
    pub const fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

impl PartialEq for KindId {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for KindId {}

impl Hash for KindId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl PartialOrd for KindId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KindId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(other.path)
    }
}

impl fmt::Debug for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KindId({} #{:016x})", self.path, self.fingerprint)
    }
}

impl fmt::Display for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
