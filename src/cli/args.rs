//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Packmule - Concurrent Python package installer.
#[derive(Debug, Parser)]
#[command(name = "packmule")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default ./packmule.json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of concurrent install workers (overrides config)
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install configured packages (default if no command specified)
    Install(InstallArgs),

    /// Uninstall packages
    Uninstall(UninstallArgs),

    /// List the resolved package set
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Install only these packages, e.g. `requests>=2.28.0` (comma-separated;
    /// defaults to the configured package set)
    #[arg(short, long, value_delimiter = ',')]
    pub packages: Vec<String>,

    /// Show what would be installed without executing
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `uninstall` command.
#[derive(Debug, Clone, clap::Args)]
pub struct UninstallArgs {
    /// Package names to uninstall
    #[arg(required = true)]
    pub names: Vec<String>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Also query currently installed versions
    #[arg(long)]
    pub installed: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
