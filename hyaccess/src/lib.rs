//! Annotated memory accesses for Hyprop property sets.
//!
//! Loads, stores and pointer handles accept a [`hyprop::set::PropertySet`]
//! of hints. The set is resolved to a [`hint::HintCode`] during constant
//! evaluation and handed, once per access, to the [`emit::AccessEmitter`]
//! in charge of selecting the instruction variant.
//!
//! - [`hint`]: the standard keys and payloads and the hint-code layout;
//! - [`resolve`]: property set to hint code;
//! - [`access`]: annotated `load`/`store`;
//! - [`ptr`]: annotated pointers and references;
//! - [`emit`]: emitters and their installation;
//! - [`config`]: settings of the trace emitter.

pub mod access;
pub mod config;
pub mod emit;
pub mod error;
pub mod hint;
pub mod magic;
pub mod ptr;
pub mod resolve;

pub mod prelude {
    pub use crate::access::{load, load_default, load_ref, store, store_default, store_mut};
    pub use crate::emit::{
        AccessEmitter, AccessKind, CurrentEmitter, RecordingEmitter, TraceEmitter, with_emitter,
    };
    pub use crate::hint::*;
    pub use crate::ptr::{AnnotatedPtr, AnnotatedRef, ReadOnly, ReadWrite};
    pub use crate::resolve::{ResolveHint, resolve};
    pub use hyprop::prelude::*;
}
