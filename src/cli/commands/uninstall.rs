//! Uninstall command implementation.
//!
//! The `packmule uninstall` command removes named packages through the
//! same worker pool the install path uses.

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, UninstallArgs};
use crate::config;
use crate::error::Result;
use crate::facility::PipFacility;
use crate::orchestrator::{route_interrupt, EuidGate, InstallOrchestrator};
use crate::ui::{InstallProgress, Output};

use super::dispatcher::{Command, CommandResult};

/// The uninstall command implementation.
pub struct UninstallCommand {
    working_dir: PathBuf,
    config_path: Option<PathBuf>,
    workers_override: Option<usize>,
    args: UninstallArgs,
}

impl UninstallCommand {
    /// Create a new uninstall command.
    pub fn new(working_dir: &Path, cli: &Cli, args: UninstallArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config_path: cli.config.clone(),
            workers_override: cli.workers,
            args,
        }
    }
}

impl Command for UninstallCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let config = config::load_or_default(&self.working_dir, self.config_path.as_deref())?;

        let workers = self.workers_override.unwrap_or(config.settings.workers);
        let facility = PipFacility::new(config.settings.command_timeout());
        let gate = EuidGate;
        let orchestrator = InstallOrchestrator::new(&facility, &gate)
            .with_concurrency(workers)
            .with_retry(config.settings.retry_policy());

        route_interrupt(orchestrator.cancel_flag());

        let progress = if output.mode().shows_progress() {
            InstallProgress::new(self.args.names.len())
        } else {
            InstallProgress::hidden()
        };

        let report = orchestrator.uninstall_with_observer(self.args.names.clone(), &mut |result| {
            progress.record(output, result)
        })?;
        progress.finish();

        output.print_summary(&report);

        if report.is_success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
