//! Pre-flight security gate.
//!
//! Installing into a user environment as root is how half the broken
//! Termux/pip setups in the wild happen, so the orchestrator refuses to
//! schedule any work in a privileged context.

/// Consulted once before orchestration begins.
pub trait SecurityGate: Sync {
    /// Whether the current process runs with elevated privileges.
    fn is_privileged_context(&self) -> bool;
}

/// Production gate: checks the effective UID on unix.
#[derive(Debug, Default)]
pub struct EuidGate;

impl SecurityGate for EuidGate {
    #[cfg(unix)]
    fn is_privileged_context(&self) -> bool {
        // SAFETY: geteuid has no failure modes and touches no memory.
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(not(unix))]
    fn is_privileged_context(&self) -> bool {
        false
    }
}

/// Fixed-answer gate for tests.
#[derive(Debug)]
pub struct FixedGate {
    privileged: bool,
}

impl FixedGate {
    pub fn privileged() -> Self {
        Self { privileged: true }
    }

    pub fn unprivileged() -> Self {
        Self { privileged: false }
    }
}

impl SecurityGate for FixedGate {
    fn is_privileged_context(&self) -> bool {
        self.privileged
    }
}
