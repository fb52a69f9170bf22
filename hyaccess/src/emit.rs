//! The emission collaborator.
//!
//! The access layer resolves a hint code at compile time and hands it,
//! together with the address and the access direction, to an
//! [`AccessEmitter`]. A real backend selects an instruction variant here;
//! the emitters of this module log, print or record the request.
//!
//! Emitters used by [`CurrentEmitter`] are looked up in this order:
//!  1. the emitter installed for the current thread by [`with_emitter`];
//!  2. the process-wide emitter installed by [`set_global_emitter`];
//!  3. [`LogEmitter`].
use std::{cell::RefCell, io::Write, sync::Arc};

use log::{debug, trace, warn};
use parking_lot::{Mutex, RwLock, const_rwlock};
use strum::{Display, EnumIs};

use crate::{config::EmitterConfig, hint::HintCode};

/// Direction of a memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIs)]
pub enum AccessKind {
    #[strum(serialize = "read")]
    Read,
    #[strum(serialize = "write")]
    Write,
}

/// Receives every annotated access, once per load or store.
pub trait AccessEmitter: Send + Sync {
    fn emit_access(&self, address: *const (), hint: HintCode, kind: AccessKind);
}

impl<F> AccessEmitter for F
where
    F: Fn(*const (), HintCode, AccessKind) + Send + Sync,
{
    fn emit_access(&self, address: *const (), hint: HintCode, kind: AccessKind) {
        self(address, hint, kind)
    }
}

/// Forwards accesses to the `log` facade at trace level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEmitter;

impl AccessEmitter for LogEmitter {
    fn emit_access(&self, address: *const (), hint: HintCode, kind: AccessKind) {
        trace!("{} {:p} hint={:#x} ({})", kind, address, hint, hint.describe());
    }
}

/// One access seen by a [`RecordingEmitter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmittedAccess {
    pub address: usize,
    pub hint: HintCode,
    pub kind: AccessKind,
}

/// Keeps every access it receives.
#[derive(Debug, Default)]
pub struct RecordingEmitter {
    records: Mutex<Vec<EmittedAccess>>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the accesses recorded so far.
    pub fn records(&self) -> Vec<EmittedAccess> {
        self.records.lock().clone()
    }

    /// Remove and return the accesses recorded so far.
    pub fn take(&self) -> Vec<EmittedAccess> {
        std::mem::take(&mut *self.records.lock())
    }

    /// Most recent access.
    pub fn last(&self) -> Option<EmittedAccess> {
        self.records.lock().last().copied()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl AccessEmitter for RecordingEmitter {
    fn emit_access(&self, address: *const (), hint: HintCode, kind: AccessKind) {
        self.records.lock().push(EmittedAccess {
            address: address as usize,
            hint,
            kind,
        });
    }
}

/// Prints one intrinsic-style line per access:
///
/// ```text
/// __spirv_load(0x5581e0c0, 0x4);
/// __spirv_store(0x5581e0c0, val, 0x0);//default temporal store
/// ```
pub struct TraceEmitter {
    config: EmitterConfig,
    out: Mutex<Box<dyn Write + Send>>,
}

impl TraceEmitter {
    pub fn new(config: EmitterConfig, out: impl Write + Send + 'static) -> Self {
        Self {
            config,
            out: Mutex::new(Box::new(out)),
        }
    }

    /// Trace emitter writing to the standard output.
    pub fn stdout(config: EmitterConfig) -> Self {
        Self::new(config, std::io::stdout())
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Render the line printed for one access.
    pub fn format_access(&self, address: *const (), hint: HintCode, kind: AccessKind) -> String {
        let mut line = match kind {
            AccessKind::Read => format!("{}({:p}, {:#x});", self.config.load_intrinsic, address, hint),
            AccessKind::Write => format!(
                "{}({:p}, val, {:#x});",
                self.config.store_intrinsic, address, hint
            ),
        };

        if hint.is_default() && self.config.annotate_defaults {
            line.push_str(match kind {
                AccessKind::Read => "//default temporal load",
                AccessKind::Write => "//default temporal store",
            });
        } else if self.config.decode_fields && !hint.is_default() {
            line.push_str("// ");
            line.push_str(&hint.describe());
        }
        line
    }
}

impl AccessEmitter for TraceEmitter {
    fn emit_access(&self, address: *const (), hint: HintCode, kind: AccessKind) {
        let line = self.format_access(address, hint, kind);
        if let Err(e) = writeln!(self.out.lock(), "{}", line) {
            warn!("trace emitter failed to write `{}`: {}", line, e);
        }
    }
}

static GLOBAL_EMITTER: RwLock<Option<Arc<dyn AccessEmitter>>> = const_rwlock(None);

thread_local! {
    static SCOPED_EMITTER: RefCell<Option<Arc<dyn AccessEmitter>>> = const { RefCell::new(None) };
}

/// Install `emitter` for the whole process. Returns the previous one.
pub fn set_global_emitter(emitter: Arc<dyn AccessEmitter>) -> Option<Arc<dyn AccessEmitter>> {
    debug!("installing global access emitter");
    GLOBAL_EMITTER.write().replace(emitter)
}

/// Remove the process-wide emitter. Returns the previous one.
pub fn clear_global_emitter() -> Option<Arc<dyn AccessEmitter>> {
    GLOBAL_EMITTER.write().take()
}

/// Run `f` with `emitter` installed for the current thread.
///
/// The previous thread emitter is restored when `f` returns or unwinds.
pub fn with_emitter<R>(emitter: Arc<dyn AccessEmitter>, f: impl FnOnce() -> R) -> R {
    struct Restore(Option<Arc<dyn AccessEmitter>>);

    impl Drop for Restore {
        fn drop(&mut self) {
            let previous = self.0.take();
            SCOPED_EMITTER.with(|slot| *slot.borrow_mut() = previous);
        }
    }

    let previous = SCOPED_EMITTER.with(|slot| slot.borrow_mut().replace(emitter));
    let _restore = Restore(previous);
    f()
}

/// Emitter that dispatches to whichever emitter is currently installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentEmitter;

impl AccessEmitter for CurrentEmitter {
    fn emit_access(&self, address: *const (), hint: HintCode, kind: AccessKind) {
        let scoped = SCOPED_EMITTER.with(|slot| slot.borrow().clone());
        if let Some(emitter) = scoped {
            return emitter.emit_access(address, hint, kind);
        }

        let global = GLOBAL_EMITTER.read().clone();
        if let Some(emitter) = global {
            return emitter.emit_access(address, hint, kind);
        }

        LogEmitter.emit_access(address, hint, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_format_matches_intrinsic_style() {
        let emitter = TraceEmitter::new(EmitterConfig::default(), std::io::sink());
        let addr = 0x1000 as *const ();

        assert_eq!(
            emitter.format_access(addr, HintCode::from_raw(0x4), AccessKind::Read),
            "__spirv_load(0x1000, 0x4);"
        );
        assert_eq!(
            emitter.format_access(addr, HintCode::DEFAULT, AccessKind::Read),
            "__spirv_load(0x1000, 0x0);//default temporal load"
        );
        assert_eq!(
            emitter.format_access(addr, HintCode::DEFAULT, AccessKind::Write),
            "__spirv_store(0x1000, val, 0x0);//default temporal store"
        );
    }

    #[test]
    fn trace_format_can_decode_fields() {
        let config = EmitterConfig {
            annotate_defaults: false,
            decode_fields: true,
            ..Default::default()
        };
        let emitter = TraceEmitter::new(config, std::io::sink());
        let addr = 0x20 as *const ();

        assert_eq!(
            emitter.format_access(addr, HintCode::from_raw(0x24), AccessKind::Write),
            "__spirv_store(0x20, val, 0x24);// temporality=0x4 L1=0x2"
        );
        assert_eq!(
            emitter.format_access(addr, HintCode::DEFAULT, AccessKind::Read),
            "__spirv_load(0x20, 0x0);"
        );
    }

    #[test]
    fn scoped_emitter_wins_and_is_restored() {
        let outer = Arc::new(RecordingEmitter::new());
        let inner = Arc::new(RecordingEmitter::new());

        with_emitter(outer.clone(), || {
            CurrentEmitter.emit_access(std::ptr::null(), HintCode::DEFAULT, AccessKind::Read);
            with_emitter(inner.clone(), || {
                CurrentEmitter.emit_access(std::ptr::null(), HintCode::from_raw(4), AccessKind::Write);
            });
            CurrentEmitter.emit_access(std::ptr::null(), HintCode::DEFAULT, AccessKind::Read);
        });

        assert_eq!(outer.len(), 2);
        assert_eq!(inner.len(), 1);
        assert!(inner.last().unwrap().kind.is_write());
    }

    #[test]
    fn emitters_may_reinstall_the_global_slot() {
        let seen = Arc::new(RecordingEmitter::new());
        let sink = seen.clone();
        let swapping = move |address: *const (), hint: HintCode, kind: AccessKind| {
            sink.emit_access(address, hint, kind);
            clear_global_emitter();
        };

        set_global_emitter(Arc::new(swapping));
        CurrentEmitter.emit_access(std::ptr::null(), HintCode::DEFAULT, AccessKind::Write);

        assert_eq!(seen.len(), 1);
        assert!(clear_global_emitter().is_none());
    }

    #[test]
    fn closures_are_emitters() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let emitter = move |_: *const (), hint: HintCode, kind: AccessKind| {
            sink.lock().push((hint, kind));
        };
        emitter.emit_access(std::ptr::null(), HintCode::from_raw(0x10), AccessKind::Read);
        assert_eq!(*seen.lock(), [(HintCode::from_raw(0x10), AccessKind::Read)]);
    }
}
