//! Ctrl-C routing for cooperative cancellation.
//!
//! An interrupted run must not die mid-install and leave half-installed
//! packages behind. Routing SIGINT into the orchestrator's cancel flag
//! lets in-flight pip commands finish while the remaining queue drains
//! as `Skipped`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
#[cfg(unix)]
use std::sync::OnceLock;

#[cfg(unix)]
static INTERRUPT_FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();

#[cfg(unix)]
extern "C" fn on_interrupt(_signal: libc::c_int) {
    // Runs in signal context: the atomic store is the only thing allowed
    // here. No locking, no allocation, no logging.
    if let Some(flag) = INTERRUPT_FLAG.get() {
        flag.store(true, Ordering::SeqCst);
    }
}

/// Arm a SIGINT handler that sets `flag`.
///
/// Only the first registration in a process takes effect; later calls
/// leave the original flag in place. On non-unix targets this is a no-op
/// and Ctrl-C keeps its default disposition.
#[cfg(unix)]
pub fn route_interrupt(flag: Arc<AtomicBool>) {
    if INTERRUPT_FLAG.set(flag).is_err() {
        return;
    }
    unsafe {
        libc::signal(libc::SIGINT, on_interrupt as libc::sighandler_t);
    }
}

#[cfg(not(unix))]
pub fn route_interrupt(_flag: Arc<AtomicBool>) {}
