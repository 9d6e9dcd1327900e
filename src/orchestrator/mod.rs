//! Concurrent install orchestration.
//!
//! A fixed-size pool of worker threads pulls package specs from a shared
//! queue. Each worker checks the installed version, then runs the
//! retry-wrapped facility install. Results flow back to the calling thread
//! over a single mpsc channel, which is the only serialization point for
//! the report: workers never touch the result list directly.
//!
//! Guarantees:
//! - every submitted spec yields exactly one [`InstallResult`], including
//!   when the worker processing it panics;
//! - at most one install chain per package name is ever in flight, enforced
//!   by name deduplication before scheduling;
//! - cancellation lets in-flight commands finish (no half-installed
//!   packages) and drains the remaining queue as `Skipped`.

pub mod interrupt;
pub mod security;

pub use interrupt::route_interrupt;
pub use security::{EuidGate, FixedGate, SecurityGate};

use std::collections::VecDeque;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Instant;

use chrono::Utc;

use crate::error::PackmuleError;
use crate::facility::{require_success, PackageFacility};
use crate::package::{dedup_specs, InstallResult, OrchestrationReport, Outcome, PackageSpec};
use crate::retry::RetryPolicy;

/// Default worker-pool size.
pub const DEFAULT_CONCURRENCY: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Install,
    Uninstall,
}

/// Schedules package work across a bounded worker pool.
pub struct InstallOrchestrator<'a> {
    facility: &'a dyn PackageFacility,
    gate: &'a dyn SecurityGate,
    retry: RetryPolicy,
    concurrency: usize,
    cancel: Arc<AtomicBool>,
}

impl<'a> InstallOrchestrator<'a> {
    pub fn new(facility: &'a dyn PackageFacility, gate: &'a dyn SecurityGate) -> Self {
        Self {
            facility,
            gate,
            retry: RetryPolicy::default(),
            concurrency: DEFAULT_CONCURRENCY,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set the worker-pool size (clamped to at least 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the per-package retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Cooperative cancellation flag.
    ///
    /// Setting it stops new work from being dequeued; in-flight commands
    /// run to completion and queued specs finish as `Skipped`.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Install every spec, returning one result per unique package name.
    pub fn run(&self, specs: Vec<PackageSpec>) -> crate::Result<OrchestrationReport> {
        self.run_with_observer(specs, &mut |_| {})
    }

    /// Like [`run`](Self::run), invoking `observer` as each result completes.
    pub fn run_with_observer(
        &self,
        specs: Vec<PackageSpec>,
        observer: &mut dyn FnMut(&InstallResult),
    ) -> crate::Result<OrchestrationReport> {
        self.execute(specs, Mode::Install, observer)
    }

    /// Remove packages by name; same pool shape, no version checking.
    pub fn uninstall(&self, names: Vec<String>) -> crate::Result<OrchestrationReport> {
        self.uninstall_with_observer(names, &mut |_| {})
    }

    /// Like [`uninstall`](Self::uninstall) with a completion observer.
    pub fn uninstall_with_observer(
        &self,
        names: Vec<String>,
        observer: &mut dyn FnMut(&InstallResult),
    ) -> crate::Result<OrchestrationReport> {
        let specs = names
            .iter()
            .map(|name| PackageSpec::new(name, crate::version::VersionConstraint::Any))
            .collect::<crate::Result<Vec<_>>>()?;
        self.execute(specs, Mode::Uninstall, observer)
    }

    fn execute(
        &self,
        specs: Vec<PackageSpec>,
        mode: Mode,
        observer: &mut dyn FnMut(&InstallResult),
    ) -> crate::Result<OrchestrationReport> {
        if self.gate.is_privileged_context() {
            return Err(PackmuleError::PrivilegedContext);
        }

        let specs = dedup_specs(specs);
        let started_at = Utc::now();
        let total = specs.len();
        let workers = self.concurrency.min(total.max(1));
        tracing::info!(total, workers, ?mode, "starting orchestration");

        let queue = Mutex::new(VecDeque::from(specs));
        let (tx, rx) = mpsc::channel::<InstallResult>();
        let mut results = Vec::with_capacity(total);

        thread::scope(|scope| {
            for _ in 0..workers {
                let tx = tx.clone();
                let queue = &queue;
                scope.spawn(move || loop {
                    let next = queue.lock().unwrap().pop_front();
                    let Some(spec) = next else { break };

                    let result = if self.cancel.load(Ordering::SeqCst) {
                        skipped(spec)
                    } else {
                        self.process_guarded(spec, mode)
                    };

                    if tx.send(result).is_err() {
                        break;
                    }
                });
            }
            drop(tx);

            // Single consumer: results land here in completion order.
            for result in rx {
                tracing::debug!(
                    package = result.spec.name(),
                    outcome = %result.outcome,
                    attempts = result.attempts,
                    "package finished"
                );
                observer(&result);
                results.push(result);
            }
        });

        let report = OrchestrationReport::new(results, started_at);
        tracing::info!(summary = %report.summary(), "orchestration finished");
        Ok(report)
    }

    /// Process one spec, converting a panic into a `Failed` result so a
    /// single crashing package cannot take down the pool.
    fn process_guarded(&self, spec: PackageSpec, mode: Mode) -> InstallResult {
        let fallback = spec.clone();
        let start = Instant::now();
        let work = AssertUnwindSafe(|| match mode {
            Mode::Install => self.process_install(spec),
            Mode::Uninstall => self.process_uninstall(spec),
        });
        match std::panic::catch_unwind(work) {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(package = fallback.name(), "worker crashed processing package");
                InstallResult {
                    spec: fallback,
                    outcome: Outcome::Failed,
                    attempts: 1,
                    last_error: Some("internal error: worker crashed".to_string()),
                    duration: start.elapsed(),
                }
            }
        }
    }

    fn process_install(&self, spec: PackageSpec) -> InstallResult {
        let start = Instant::now();

        // A failed or unparseable version query means "unknown", which
        // forces an install attempt rather than aborting the package.
        let installed = match self.facility.query_version(spec.name()) {
            Ok(version) => version,
            Err(err) => {
                tracing::warn!(package = spec.name(), %err, "version query failed");
                None
            }
        };

        if let Some(version) = installed {
            match spec.constraint().satisfied_by_str(&version) {
                Ok(true) => {
                    return InstallResult {
                        spec,
                        outcome: Outcome::AlreadySatisfied,
                        attempts: 1,
                        last_error: None,
                        duration: start.elapsed(),
                    };
                }
                Ok(false) => {}
                Err(_) => {
                    tracing::debug!(
                        package = spec.name(),
                        version,
                        "installed version not comparable, reinstalling"
                    );
                }
            }
        }

        let label = format!("install {}", spec.requirement());
        let outcome = self.retry.execute(|| {
            self.facility
                .install(&spec)
                .and_then(|output| require_success(&label, output))
        });

        match outcome.result {
            Ok(_) => InstallResult {
                spec,
                outcome: Outcome::Installed,
                attempts: outcome.attempts,
                last_error: None,
                duration: start.elapsed(),
            },
            Err(err) => InstallResult {
                spec,
                outcome: Outcome::Failed,
                attempts: outcome.attempts,
                last_error: Some(err.to_string()),
                duration: start.elapsed(),
            },
        }
    }

    fn process_uninstall(&self, spec: PackageSpec) -> InstallResult {
        let start = Instant::now();
        let label = format!("uninstall {}", spec.name());
        let outcome = self.retry.execute(|| {
            self.facility
                .uninstall(spec.name())
                .and_then(|output| require_success(&label, output))
        });

        match outcome.result {
            Ok(_) => InstallResult {
                spec,
                outcome: Outcome::Removed,
                attempts: outcome.attempts,
                last_error: None,
                duration: start.elapsed(),
            },
            Err(err) => InstallResult {
                spec,
                outcome: Outcome::Failed,
                attempts: outcome.attempts,
                last_error: Some(err.to_string()),
                duration: start.elapsed(),
            },
        }
    }
}

fn skipped(spec: PackageSpec) -> InstallResult {
    InstallResult {
        spec,
        outcome: Outcome::Skipped,
        attempts: 1,
        last_error: None,
        duration: std::time::Duration::ZERO,
    }
}
