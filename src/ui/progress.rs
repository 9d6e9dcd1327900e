//! Orchestration progress display.

use indicatif::{ProgressBar, ProgressStyle};

use crate::package::InstallResult;

use super::output::Output;

/// A progress bar over the package queue, one tick per completed package.
///
/// Completed packages are printed above the bar so the status lines
/// survive after the bar clears.
pub struct InstallProgress {
    bar: ProgressBar,
}

impl InstallProgress {
    /// Create a bar sized to the number of queued packages.
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{bar:24.cyan/dim} {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("━╸─"),
        );
        Self { bar }
    }

    /// Create a bar that doesn't show (for quiet mode or non-TTY output).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Record one completed package: print its status line, advance the bar.
    pub fn record(&self, output: &Output, result: &InstallResult) {
        if output.mode().shows_results() {
            self.bar.println(output.result_line(result));
        }
        self.bar.set_message(result.spec.name().to_string());
        self.bar.inc(1);
    }

    /// Clear the bar once the run is finished.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::package::{Outcome, PackageSpec};
    use crate::ui::{OutputMode, Theme};

    #[test]
    fn hidden_bar_accepts_records() {
        let progress = InstallProgress::hidden();
        let output = Output::new(OutputMode::Quiet, Theme::plain());
        let result = InstallResult {
            spec: "requests".parse::<PackageSpec>().unwrap(),
            outcome: Outcome::Installed,
            attempts: 1,
            last_error: None,
            duration: Duration::from_millis(1),
        };
        progress.record(&output, &result);
        progress.finish();
    }
}
