//! Error types for packmule operations.
//!
//! This module defines [`PackmuleError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - `ConfigNotFound` / `ConfigParseError` / `ConfigValidationError` and
//!   `PrivilegedContext` are fatal: they abort a run before any package
//!   work is scheduled.
//! - Per-package execution failures ([`crate::facility::ExecError`]) never
//!   surface here — they are absorbed into one package's `InstallResult`
//!   so that a single flaky package cannot block the rest of the run.
//! - Use `anyhow::Error` (via `PackmuleError::Other`) for unexpected errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for packmule operations.
#[derive(Debug, Error)]
pub enum PackmuleError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Malformed version or version-constraint syntax.
    #[error("Invalid version constraint '{input}': {message}")]
    ConstraintParseError { input: String, message: String },

    /// Refusing to run in a privileged context (e.g. as root).
    #[error("Refusing to run as a privileged user; re-run as an unprivileged account")]
    PrivilegedContext,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for packmule operations.
pub type Result<T> = std::result::Result<T, PackmuleError>;
