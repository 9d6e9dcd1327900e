//! Completion notifications.
//!
//! After an orchestration run finishes, a [`NotificationSink`] gets one
//! shot at telling the outside world about it. Sinks are fire-and-forget:
//! a sink that fails is logged and ignored, it never changes the exit
//! status of the run.

use std::process::{Command, Stdio};

use crate::package::OrchestrationReport;

/// Receives the final report of an orchestration run.
pub trait NotificationSink {
    /// Deliver a notification for `report`. Implementations must not
    /// propagate delivery failures; log and move on.
    fn notify(&self, report: &OrchestrationReport);
}

/// Sink that records the summary in the structured log.
///
/// This is the default sink; it is always safe and always available.
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, report: &OrchestrationReport) {
        if report.is_success() {
            tracing::info!(summary = %report.summary(), "run complete");
        } else {
            tracing::warn!(summary = %report.summary(), "run complete with failures");
        }
    }
}

/// Sink that hands the summary to an external command.
///
/// The configured command line is run through `sh -c` with the run
/// summary appended as its last argument, so a config entry like
/// `"notify_command": "termux-notification --content"` posts the summary
/// to the device notification tray. The child is spawned detached and
/// never waited on.
pub struct CommandNotifier {
    command: String,
}

impl CommandNotifier {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl NotificationSink for CommandNotifier {
    fn notify(&self, report: &OrchestrationReport) {
        let summary = report.summary();
        // `"$0"` consumes the script-name slot so the summary lands in `$1`.
        let script = format!("{} \"$1\"", self.command);
        let spawned = Command::new("sh")
            .arg("-c")
            .arg(&script)
            .arg("packmule")
            .arg(&summary)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(_child) => {
                tracing::debug!(command = %self.command, "notification dispatched");
            }
            Err(err) => {
                tracing::warn!(
                    command = %self.command,
                    error = %err,
                    "failed to spawn notification command"
                );
            }
        }
    }
}
