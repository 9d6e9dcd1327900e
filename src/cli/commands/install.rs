//! Install command implementation.
//!
//! The `packmule install` command resolves the package set and drives the
//! concurrent orchestrator over it.

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, InstallArgs};
use crate::config;
use crate::error::Result;
use crate::notify::{CommandNotifier, LogNotifier, NotificationSink};
use crate::orchestrator::{route_interrupt, EuidGate, InstallOrchestrator};
use crate::facility::PipFacility;
use crate::package::PackageSpec;
use crate::ui::{InstallProgress, Output};

use super::dispatcher::{Command, CommandResult};

/// The install command implementation.
pub struct InstallCommand {
    working_dir: PathBuf,
    config_path: Option<PathBuf>,
    workers_override: Option<usize>,
    args: InstallArgs,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(working_dir: &Path, cli: &Cli, args: InstallArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config_path: cli.config.clone(),
            workers_override: cli.workers,
            args,
        }
    }

    fn resolve_specs(&self, config: &config::PackmuleConfig) -> Result<Vec<PackageSpec>> {
        if self.args.packages.is_empty() {
            return config.resolve();
        }
        self.args
            .packages
            .iter()
            .map(|raw| raw.parse::<PackageSpec>())
            .collect()
    }
}

impl Command for InstallCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let config = config::load_or_default(&self.working_dir, self.config_path.as_deref())?;
        let specs = self.resolve_specs(&config)?;

        if specs.is_empty() {
            output.print_line("nothing to install");
            return Ok(CommandResult::success());
        }

        if self.args.dry_run {
            output.print_line(&format!("would install {} package(s):", specs.len()));
            for spec in &specs {
                output.print_line(&format!("  {}", spec.requirement()));
            }
            return Ok(CommandResult::success());
        }

        let workers = self.workers_override.unwrap_or(config.settings.workers);
        let facility = PipFacility::new(config.settings.command_timeout());
        let gate = EuidGate;
        let orchestrator = InstallOrchestrator::new(&facility, &gate)
            .with_concurrency(workers)
            .with_retry(config.settings.retry_policy());

        // Ctrl-C drains the remaining queue as Skipped instead of killing
        // pip mid-install.
        route_interrupt(orchestrator.cancel_flag());

        let progress = if output.mode().shows_progress() {
            InstallProgress::new(specs.len())
        } else {
            InstallProgress::hidden()
        };

        let report = orchestrator
            .run_with_observer(specs, &mut |result| progress.record(output, result))?;
        progress.finish();

        output.print_summary(&report);

        match &config.settings.notify_command {
            Some(command) => CommandNotifier::new(command.clone()).notify(&report),
            None => LogNotifier.notify(&report),
        }

        if report.is_success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
