//! Configuration schema and validation.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PackmuleError;
use crate::package::PackageSpec;
use crate::retry::RetryPolicy;

/// Root configuration: the package set and run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackmuleConfig {
    /// Package name -> constraint string (`">=2.30.0"`, `"==1.0.0"`, or
    /// `""` for any version).
    #[serde(default)]
    pub packages: BTreeMap<String, String>,

    #[serde(default)]
    pub settings: Settings,
}

/// Tunable run settings. All values are defaults, not contracts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Worker-pool size for parallel installation.
    pub workers: usize,

    /// Total attempts per package, including the first.
    pub max_attempts: u32,

    /// Backoff base in milliseconds.
    pub base_delay_ms: u64,

    /// Network timeout per package-manager invocation, in seconds.
    pub command_timeout_secs: u64,

    /// Optional external command to run with the final summary
    /// (e.g. `termux-notification -t packmule -c`).
    pub notify_command: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workers: crate::orchestrator::DEFAULT_CONCURRENCY,
            max_attempts: 3,
            base_delay_ms: 500,
            command_timeout_secs: 60,
            notify_command: None,
        }
    }
}

impl Settings {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms))
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

impl Default for PackmuleConfig {
    /// Built-in package set used when no config file exists.
    fn default() -> Self {
        let packages = [
            ("requests", ">=2.28.0"),
            ("beautifulsoup4", ">=4.11.0"),
            ("scapy", ">=2.5.0"),
            ("numpy", ">=1.22.0"),
            ("pandas", ">=1.5.0"),
            ("matplotlib", ">=3.6.0"),
            ("flask", ">=2.2.0"),
            ("django", ">=4.1.0"),
            ("pycryptodome", ">=3.15.0"),
            ("paramiko", ">=3.0.0"),
            ("selenium", ">=4.7.0"),
            ("colorama", ">=0.4.0"),
            ("pillow", ">=9.3.0"),
            ("pyautogui", ">=0.9.0"),
            ("pynput", ">=1.7.0"),
            ("pyfiglet", ">=0.8.0"),
            ("termcolor", ">=2.2.0"),
            ("speedtest-cli", ">=2.1.0"),
            ("whois", ">=0.9.0"),
        ]
        .into_iter()
        .map(|(name, constraint)| (name.to_string(), constraint.to_string()))
        .collect();

        Self {
            packages,
            settings: Settings::default(),
        }
    }
}

impl PackmuleConfig {
    /// Validate settings and every package entry, fail-closed.
    pub fn validate(&self) -> crate::Result<()> {
        if self.settings.workers == 0 {
            return Err(PackmuleError::ConfigValidationError {
                message: "settings.workers must be at least 1".to_string(),
            });
        }
        if self.settings.max_attempts == 0 {
            return Err(PackmuleError::ConfigValidationError {
                message: "settings.max_attempts must be at least 1".to_string(),
            });
        }
        // Resolving parses every name and constraint; any malformed entry
        // fails the whole config.
        self.resolve()?;
        Ok(())
    }

    /// Resolve the package map into specs, in name order.
    pub fn resolve(&self) -> crate::Result<Vec<PackageSpec>> {
        self.packages
            .iter()
            .map(|(name, constraint)| {
                let constraint = constraint.parse().map_err(|err| {
                    PackmuleError::ConfigValidationError {
                        message: format!("package '{}': {}", name, err),
                    }
                })?;
                PackageSpec::new(name, constraint)
            })
            .collect()
    }
}
