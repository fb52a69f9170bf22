//! Hyprop: compile-time, extensible properties for memory operations.
//!
//! The crate provides the building blocks used to attach named, strongly
//! typed metadata ("hints") to loads, stores and pointer-like handles:
//! - [`kind`]: structural identity of key types ([`kind::KindId`]);
//! - [`key`]: property keys and payloads, usually declared with
//!   `#[derive(PropertyKey)]` and `#[derive(Payload)]`;
//! - [`value`]: property values, the pairing of a key with a payload;
//! - [`list`] and [`set`]: duplicate-free, type-level property sets and
//!   their compile-time queries;
//! - [`registry`]: the link-time registry of every declared key.
//!
//! Every compile-time property and property set is a zero-sized type; all
//! queries are answered during type checking or constant evaluation.
//!
//! Example
//! ```
//! use hyprop::prelude::*;
//!
//! #[derive(PropertyKey)]
//! #[property(name = "stride")]
//! pub struct StrideKey;
//!
//! #[derive(Payload)]
//! #[payload(code = 64, name = "cache_line", accepts(StrideKey))]
//! pub struct CacheLine;
//!
//! let set = properties![StrideKey::value::<CacheLine>()];
//! const _: () = assert!(StrideKey::KIND.same_as(&StrideKey::KIND));
//! assert_eq!(set.code_of::<StrideKey>(), Some(64));
//! assert_eq!(std::mem::size_of_val(&set), 0);
//! ```

extern crate self as hyprop;

pub mod error;
pub mod key;
pub mod kind;
pub mod list;
pub mod registry;
pub mod set;
pub mod value;

pub extern crate inventory;

#[cfg(feature = "derive")]
pub use hyprop_derive::{Payload, PropertyKey};

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::key::{Payload, PayloadFor, PropertyKey, Value};
    pub use crate::kind::KindId;
    pub use crate::list::{PCons, PNil, PropertyList, Query, Select};
    pub use crate::properties;
    pub use crate::set::{EmptyProperties, PropertySet};
    pub use crate::value::{Property, PropertyDescriptor, PropertyValue, RuntimeValue};

    #[cfg(feature = "derive")]
    pub use hyprop_derive::{Payload, PropertyKey};
}
