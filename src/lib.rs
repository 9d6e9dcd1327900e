//! Packmule - Concurrent Python package installation.
//!
//! Packmule replaces ad-hoc `pip install` loops with a configured package
//! set, a bounded worker pool, and retry handling for flaky networks.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`facility`] - Package manager backends (pip) and subprocess plumbing
//! - [`notify`] - Completion notification sinks
//! - [`orchestrator`] - Concurrent install orchestration and security gate
//! - [`package`] - Package specs, outcomes, and run reports
//! - [`retry`] - Retry policy with exponential backoff
//! - [`ui`] - Progress bars and terminal output
//! - [`version`] - Version parsing and constraints
//!
//! # Example
//!
//! ```
//! use packmule::package::PackageSpec;
//! use packmule::version::VersionConstraint;
//!
//! let spec: PackageSpec = "requests>=2.28.0".parse().unwrap();
//! assert_eq!(spec.name(), "requests");
//! assert!(matches!(spec.constraint(), VersionConstraint::AtLeast(_)));
//! ```
//!
//! For end-to-end orchestration, see the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod facility;
pub mod notify;
pub mod orchestrator;
pub mod package;
pub mod retry;
pub mod ui;
pub mod version;

pub use error::{PackmuleError, Result};
