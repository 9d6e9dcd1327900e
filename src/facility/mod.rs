//! External package-management facility.
//!
//! The orchestrator never shells out directly; everything goes through the
//! [`PackageFacility`] trait so tests can substitute [`MockFacility`] and the
//! production binary can wire up [`PipFacility`]. One trait call is one
//! synchronous external invocation — retries live in [`crate::retry`], never
//! here.

pub mod command;
pub mod mock;
pub mod patterns;
pub mod pip;

pub use command::{run_command, CommandOutput};
pub use mock::{MockFacility, ScriptedFailure};
pub use patterns::{classify_install_failure, FailureKind};
pub use pip::PipFacility;

use std::time::Duration;

use thiserror::Error;

use crate::package::PackageSpec;

/// Failure executing an external package-manager command.
///
/// `Spawn` means the facility binary could not be invoked at all, which is
/// distinct from a command that ran and exited non-zero (`Exit`).
#[derive(Debug, Error)]
pub enum ExecError {
    /// The external binary could not be started.
    #[error("failed to invoke '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran past its time limit and was killed.
    #[error("'{command}' timed out after {limit:?}")]
    Timeout { command: String, limit: Duration },

    /// The command ran to completion with a non-zero exit code.
    #[error("'{command}' exited with code {code:?}: {detail}")]
    Exit {
        command: String,
        code: Option<i32>,
        detail: String,
        kind: FailureKind,
    },
}

impl ExecError {
    /// Whether retrying this failure could plausibly succeed.
    ///
    /// Timeouts are transient (mirror flakiness); spawn failures are
    /// permanent (the binary won't appear between attempts); exit failures
    /// carry their classified kind.
    pub fn is_transient(&self) -> bool {
        match self {
            ExecError::Spawn { .. } => false,
            ExecError::Timeout { .. } => true,
            ExecError::Exit { kind, .. } => *kind == FailureKind::Transient,
        }
    }
}

/// Abstraction over the external package manager.
///
/// Implementations must be `Sync`: the orchestrator shares one facility
/// across its worker pool by reference.
pub trait PackageFacility: Sync {
    /// Install one package, honoring its version constraint.
    fn install(&self, spec: &PackageSpec) -> Result<CommandOutput, ExecError>;

    /// Remove one package by name.
    fn uninstall(&self, name: &str) -> Result<CommandOutput, ExecError>;

    /// Report the currently-installed version, `None` when not installed.
    fn query_version(&self, name: &str) -> Result<Option<String>, ExecError>;
}

/// Convert a completed command into a retryable result.
///
/// A non-zero exit is a normal outcome at the facility layer; the retry
/// loop needs it as an error, classified transient or permanent from the
/// command's stderr.
pub fn require_success(command: &str, output: CommandOutput) -> Result<CommandOutput, ExecError> {
    if output.success {
        return Ok(output);
    }
    let kind = classify_install_failure(&output.stderr);
    Err(ExecError::Exit {
        command: command.to_string(),
        code: output.exit_code,
        detail: last_stderr_line(&output.stderr),
        kind,
    })
}

/// The last non-empty stderr line, which is where pip puts its actual error.
fn last_stderr_line(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("(no error output)")
        .trim()
        .to_string()
}
