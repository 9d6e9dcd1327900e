//! Configuration loading, parsing, and validation.
//!
//! Config is a single JSON file (`packmule.json`) mapping package names to
//! constraint strings, plus an optional settings block. Loading is
//! fail-closed: one malformed entry fails the whole load, nothing is
//! partially applied.

pub mod loader;
pub mod schema;

pub use loader::{discover, load, load_or_default, CONFIG_FILE};
pub use schema::{PackmuleConfig, Settings};
