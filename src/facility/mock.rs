//! In-memory facility for tests.
//!
//! Records every call and lets tests script per-package failure sequences,
//! installed versions, and worker-crash panics. Exposed publicly so
//! integration tests can drive the orchestrator without touching pip.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use super::command::CommandOutput;
use super::patterns::FailureKind;
use super::{ExecError, PackageFacility};
use crate::package::PackageSpec;

/// A failure queued up for a scripted install attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedFailure {
    /// Network-style failure; the retry loop should try again.
    Transient,
    /// Not-found-style failure; the retry loop should give up immediately.
    Permanent,
}

impl ScriptedFailure {
    fn into_error(self, name: &str) -> ExecError {
        let (detail, kind) = match self {
            ScriptedFailure::Transient => {
                ("connection reset by peer", FailureKind::Transient)
            }
            ScriptedFailure::Permanent => {
                ("No matching distribution found", FailureKind::Permanent)
            }
        };
        ExecError::Exit {
            command: format!("pip install {}", name),
            code: Some(1),
            detail: detail.to_string(),
            kind,
        }
    }
}

/// Recording [`PackageFacility`] with scriptable behavior.
#[derive(Debug, Default)]
pub struct MockFacility {
    versions: Mutex<HashMap<String, String>>,
    install_failures: Mutex<HashMap<String, VecDeque<ScriptedFailure>>>,
    panic_on_install: Mutex<HashSet<String>>,
    install_calls: Mutex<Vec<String>>,
    uninstall_calls: Mutex<Vec<String>>,
    query_calls: Mutex<Vec<String>>,
    /// Artificial per-install delay, for cancellation tests.
    install_delay: Option<Duration>,
}

impl MockFacility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `name` is already installed at `version`.
    pub fn with_installed(self, name: &str, version: &str) -> Self {
        self.versions
            .lock()
            .unwrap()
            .insert(name.to_string(), version.to_string());
        self
    }

    /// Queue failures for the next install attempts of `name`; once the
    /// queue drains, installs succeed.
    pub fn with_install_failures(self, name: &str, failures: &[ScriptedFailure]) -> Self {
        self.install_failures
            .lock()
            .unwrap()
            .insert(name.to_string(), failures.iter().copied().collect());
        self
    }

    /// Panic inside `install` for `name`, simulating a worker crash.
    pub fn with_panic_on_install(self, name: &str) -> Self {
        self.panic_on_install.lock().unwrap().insert(name.to_string());
        self
    }

    /// Sleep inside every install, so cancellation can land mid-run.
    pub fn with_install_delay(mut self, delay: Duration) -> Self {
        self.install_delay = Some(delay);
        self
    }

    pub fn install_calls(&self) -> Vec<String> {
        self.install_calls.lock().unwrap().clone()
    }

    pub fn uninstall_calls(&self) -> Vec<String> {
        self.uninstall_calls.lock().unwrap().clone()
    }

    pub fn query_calls(&self) -> Vec<String> {
        self.query_calls.lock().unwrap().clone()
    }

    fn ok_output() -> CommandOutput {
        CommandOutput::success(String::new(), String::new(), Duration::from_millis(1))
    }
}

impl PackageFacility for MockFacility {
    fn install(&self, spec: &PackageSpec) -> Result<CommandOutput, ExecError> {
        let name = spec.name().to_string();
        self.install_calls.lock().unwrap().push(name.clone());

        if self.panic_on_install.lock().unwrap().contains(&name) {
            panic!("scripted worker crash installing {}", name);
        }

        if let Some(delay) = self.install_delay {
            std::thread::sleep(delay);
        }

        if let Some(queue) = self.install_failures.lock().unwrap().get_mut(&name) {
            if let Some(failure) = queue.pop_front() {
                return Err(failure.into_error(&name));
            }
        }

        // Successful install makes the package visible to later queries at
        // whatever version the constraint asked for.
        let version = match spec.constraint() {
            crate::version::VersionConstraint::Any => "1.0.0".to_string(),
            crate::version::VersionConstraint::AtLeast(v)
            | crate::version::VersionConstraint::Exactly(v) => v.to_string(),
        };
        self.versions.lock().unwrap().insert(name, version);
        Ok(Self::ok_output())
    }

    fn uninstall(&self, name: &str) -> Result<CommandOutput, ExecError> {
        self.uninstall_calls.lock().unwrap().push(name.to_string());
        self.versions.lock().unwrap().remove(name);
        Ok(Self::ok_output())
    }

    fn query_version(&self, name: &str) -> Result<Option<String>, ExecError> {
        self.query_calls.lock().unwrap().push(name.to_string());
        Ok(self.versions.lock().unwrap().get(name).cloned())
    }
}
