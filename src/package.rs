//! Package specifications and run results.
//!
//! [`PackageSpec`] is the atomic unit of work handed to the orchestrator;
//! [`InstallResult`] and [`OrchestrationReport`] carry the per-package and
//! aggregate outcomes back to the caller.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::PackmuleError;
use crate::version::VersionConstraint;

/// One named unit of install work with an optional version constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    name: String,
    constraint: VersionConstraint,
    category: Option<String>,
}

impl PackageSpec {
    /// Create a spec. Fails when the name is empty.
    pub fn new(name: &str, constraint: VersionConstraint) -> crate::Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PackmuleError::ConfigValidationError {
                message: "package name must not be empty".to_string(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            constraint,
            category: None,
        })
    }

    /// Attach a category label (e.g. "networking", "data").
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constraint(&self) -> &VersionConstraint {
        &self.constraint
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Format as a requirement string (`flask>=2.2.0`, or just `flask`).
    pub fn requirement(&self) -> String {
        format!("{}{}", self.name, self.constraint.requirement_suffix())
    }
}

impl FromStr for PackageSpec {
    type Err = PackmuleError;

    /// Parse a requirement string as accepted on the command line:
    /// `name`, `name>=x.y.z`, or `name==x.y.z`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let split_at = text.find(">=").or_else(|| text.find("=="));
        let (name, constraint) = match split_at {
            Some(idx) => (&text[..idx], text[idx..].parse()?),
            None => (text, VersionConstraint::Any),
        };
        PackageSpec::new(name, constraint)
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.requirement())
    }
}

/// Collapse duplicate names, last writer wins.
///
/// Concurrent installs of the same package name are unsafe, so the
/// orchestrator only ever schedules one spec per name. When the same name
/// appears more than once the later entry's constraint replaces the earlier
/// one in place.
pub fn dedup_specs(specs: Vec<PackageSpec>) -> Vec<PackageSpec> {
    let mut out: Vec<PackageSpec> = Vec::with_capacity(specs.len());
    for spec in specs {
        if let Some(existing) = out.iter_mut().find(|s| s.name == spec.name) {
            *existing = spec;
        } else {
            out.push(spec);
        }
    }
    out
}

/// Final disposition of one package after orchestration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Package was installed (or upgraded) by this run.
    Installed,
    /// Package was removed by this run.
    Removed,
    /// Installed version already satisfied the constraint; no side effects.
    AlreadySatisfied,
    /// All attempts failed, or the worker processing it crashed.
    Failed,
    /// Dequeued after cancellation; never attempted.
    Skipped,
}

impl Outcome {
    /// Whether this outcome counts toward the report's success tally.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::Installed | Outcome::Removed | Outcome::AlreadySatisfied
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::Installed => "installed",
            Outcome::Removed => "removed",
            Outcome::AlreadySatisfied => "already satisfied",
            Outcome::Failed => "failed",
            Outcome::Skipped => "skipped",
        };
        write!(f, "{}", text)
    }
}

/// The outcome of processing a single package spec.
///
/// Exactly one of these is produced per submitted spec, even when the
/// worker handling it panics.
#[derive(Debug, Clone)]
pub struct InstallResult {
    pub spec: PackageSpec,
    pub outcome: Outcome,
    /// Number of attempts made, always at least 1.
    pub attempts: u32,
    /// Human-readable description of the last failure, if any.
    pub last_error: Option<String>,
    pub duration: Duration,
}

/// Aggregate record of one orchestration run.
///
/// `results` is in completion order, not submission order.
#[derive(Debug)]
pub struct OrchestrationReport {
    pub results: Vec<InstallResult>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub succeeded: usize,
    pub failed: usize,
}

impl OrchestrationReport {
    /// Build a report from completion-ordered results and a start timestamp.
    pub fn new(results: Vec<InstallResult>, started_at: DateTime<Utc>) -> Self {
        let succeeded = results.iter().filter(|r| r.outcome.is_success()).count();
        let failed = results
            .iter()
            .filter(|r| r.outcome == Outcome::Failed)
            .count();
        Self {
            results,
            started_at,
            finished_at: Utc::now(),
            succeeded,
            failed,
        }
    }

    /// True when no package's final outcome is `Failed`.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// One-line human summary, used for notifications and logs.
    pub fn summary(&self) -> String {
        format!(
            "{}/{} packages succeeded, {} failed",
            self.succeeded,
            self.results.len(),
            self.failed
        )
    }
}
