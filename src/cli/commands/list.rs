//! List command implementation.
//!
//! The `packmule list` command shows the resolved package set, and with
//! `--installed` also queries what pip currently has.

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, ListArgs};
use crate::config;
use crate::error::Result;
use crate::facility::{PackageFacility, PipFacility};
use crate::ui::Output;
use crate::version::VersionConstraint;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    working_dir: PathBuf,
    config_path: Option<PathBuf>,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(working_dir: &Path, cli: &Cli, args: ListArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config_path: cli.config.clone(),
            args,
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let config = config::load_or_default(&self.working_dir, self.config_path.as_deref())?;
        let specs = config.resolve()?;
        let theme = output.theme();

        println!(
            "{}",
            theme
                .header
                .apply_to(format!("{} configured package(s)", specs.len()))
        );

        let facility = self
            .args
            .installed
            .then(|| PipFacility::new(config.settings.command_timeout()));

        for spec in &specs {
            let constraint = match spec.constraint() {
                VersionConstraint::Any => theme.dim.apply_to("any version".to_string()),
                other => theme.dim.apply_to(other.to_string()),
            };
            let mut line = format!("  {} {}", theme.highlight.apply_to(spec.name()), constraint);

            if let Some(facility) = &facility {
                match facility.query_version(spec.name()) {
                    Ok(Some(version)) => {
                        line.push_str(&format!(" {}", theme.success.apply_to(&version)));
                    }
                    Ok(None) => {
                        line.push_str(&format!(" {}", theme.warning.apply_to("not installed")));
                    }
                    Err(err) => {
                        tracing::warn!(package = spec.name(), error = %err, "version query failed");
                        line.push_str(&format!(" {}", theme.dim.apply_to("unknown")));
                    }
                }
            }

            println!("{}", line);
        }

        Ok(CommandResult::success())
    }
}
