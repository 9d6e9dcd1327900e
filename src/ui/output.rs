//! Output mode and result rendering.

use std::str::FromStr;

use crate::package::{InstallResult, OrchestrationReport, Outcome};

use super::theme::Theme;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show all output including per-attempt detail.
    Verbose,
    /// Show per-package status and the final summary.
    #[default]
    Normal,
    /// Show the final summary only.
    Quiet,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl OutputMode {
    /// Check if this mode shows per-package status lines.
    pub fn shows_results(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode shows the progress bar.
    pub fn shows_progress(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }
}

/// Renders orchestration results to the terminal.
#[derive(Debug)]
pub struct Output {
    mode: OutputMode,
    theme: Theme,
}

impl Output {
    /// Create a new output writer.
    pub fn new(mode: OutputMode, theme: Theme) -> Self {
        Self { mode, theme }
    }

    /// Get the output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Get the active theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Render one completed package as a status line.
    pub fn result_line(&self, result: &InstallResult) -> String {
        let label = result.spec.requirement();
        match result.outcome {
            Outcome::Installed => self.theme.format_success(&format!("{} installed", label)),
            Outcome::Removed => self.theme.format_success(&format!("{} removed", label)),
            Outcome::AlreadySatisfied => self
                .theme
                .format_success(&format!("{} already satisfied", label)),
            Outcome::Failed => {
                let detail = result.last_error.as_deref().unwrap_or("unknown error");
                if self.mode == OutputMode::Verbose {
                    self.theme.format_error(&format!(
                        "{} failed after {} attempt(s): {}",
                        label, result.attempts, detail
                    ))
                } else {
                    self.theme
                        .format_error(&format!("{} failed: {}", label, detail))
                }
            }
            Outcome::Skipped => self.theme.format_skipped(&format!("{} skipped", label)),
        }
    }

    /// Write a plain line if the mode shows per-package detail.
    pub fn print_line(&self, msg: &str) {
        if self.mode.shows_results() {
            println!("{}", msg);
        }
    }

    /// Print one completed package if the mode allows it.
    pub fn print_result(&self, result: &InstallResult) {
        if self.mode.shows_results() {
            println!("{}", self.result_line(result));
        }
    }

    /// Print the final summary line. Shown in every mode.
    pub fn print_summary(&self, report: &OrchestrationReport) {
        let summary = report.summary();
        if report.is_success() {
            println!("{}", self.theme.format_success(&summary));
        } else {
            println!("{}", self.theme.format_error(&summary));
        }
    }
}
