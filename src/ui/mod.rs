//! Terminal output components.
//!
//! This module provides:
//! - [`Output`] and [`OutputMode`] for verbosity-aware result rendering
//! - [`InstallProgress`] for the package-queue progress bar
//! - [`Theme`] for consistent styling across commands

pub mod output;
pub mod progress;
pub mod theme;

pub use output::{Output, OutputMode};
pub use progress::InstallProgress;
pub use theme::{should_use_colors, Theme};
