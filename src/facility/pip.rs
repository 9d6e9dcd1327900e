//! pip-backed package facility.
//!
//! Invokes `python3 -m pip` rather than a bare `pip` binary, so the facility
//! tracks whichever interpreter is first on PATH.

use std::time::Duration;

use super::command::{run_command, CommandOutput};
use super::{ExecError, PackageFacility};
use crate::package::PackageSpec;

/// Production [`PackageFacility`] backed by pip.
#[derive(Debug, Clone)]
pub struct PipFacility {
    python: String,
    /// Hard wall-clock limit per pip invocation.
    timeout: Duration,
    /// Install into the user site (`--user`); avoids touching system dirs.
    user_install: bool,
}

impl PipFacility {
    pub fn new(timeout: Duration) -> Self {
        Self {
            python: "python3".to_string(),
            timeout,
            user_install: true,
        }
    }

    /// Override the interpreter, e.g. for a virtualenv.
    pub fn with_python(mut self, python: &str) -> Self {
        self.python = python.to_string();
        self
    }

    /// Disable `--user` (virtualenvs reject it).
    pub fn system_site(mut self) -> Self {
        self.user_install = false;
        self
    }

    fn install_args(&self, spec: &PackageSpec) -> Vec<String> {
        let mut args = vec!["-m".to_string(), "pip".to_string(), "install".to_string()];
        if self.user_install {
            args.push("--user".to_string());
        }
        args.push(spec.requirement());
        // pip's own network timeout; the process-level limit is separate.
        args.push("--timeout".to_string());
        args.push(self.timeout.as_secs().max(1).to_string());
        args
    }
}

impl PackageFacility for PipFacility {
    fn install(&self, spec: &PackageSpec) -> Result<CommandOutput, ExecError> {
        let args = self.install_args(spec);
        // The overall limit doubles the network timeout: a download can use
        // the full network budget and still need time to build/extract.
        run_command(&self.python, &args, self.timeout * 2)
    }

    fn uninstall(&self, name: &str) -> Result<CommandOutput, ExecError> {
        let args: Vec<String> = ["-m", "pip", "uninstall", "-y", name]
            .iter()
            .map(|s| s.to_string())
            .collect();
        run_command(&self.python, &args, self.timeout)
    }

    fn query_version(&self, name: &str) -> Result<Option<String>, ExecError> {
        let args: Vec<String> = ["-m", "pip", "show", name]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let output = run_command(&self.python, &args, self.timeout)?;
        if !output.success {
            // pip show exits non-zero for unknown packages.
            return Ok(None);
        }
        Ok(parse_show_version(&output.stdout))
    }
}

/// Extract the `Version:` field from `pip show` output.
fn parse_show_version(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Version:"))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_args_include_requirement_and_user() {
        let facility = PipFacility::new(Duration::from_secs(30));
        let spec: PackageSpec = "requests>=2.30.0".parse().unwrap();
        let args = facility.install_args(&spec);
        assert!(args.contains(&"--user".to_string()));
        assert!(args.contains(&"requests>=2.30.0".to_string()));
        assert!(args.contains(&"--timeout".to_string()));
    }

    #[test]
    fn system_site_drops_user_flag() {
        let facility = PipFacility::new(Duration::from_secs(30)).system_site();
        let spec: PackageSpec = "numpy".parse().unwrap();
        let args = facility.install_args(&spec);
        assert!(!args.contains(&"--user".to_string()));
        assert!(args.contains(&"numpy".to_string()));
    }

    #[test]
    fn zero_timeout_still_passes_positive_pip_timeout() {
        let facility = PipFacility::new(Duration::ZERO);
        let spec: PackageSpec = "numpy".parse().unwrap();
        let args = facility.install_args(&spec);
        let idx = args.iter().position(|a| a == "--timeout").unwrap();
        assert_eq!(args[idx + 1], "1");
    }

    #[test]
    fn parse_show_version_finds_field() {
        let stdout = "Name: requests\nVersion: 2.31.0\nSummary: HTTP for Humans\n";
        assert_eq!(parse_show_version(stdout), Some("2.31.0".to_string()));
    }

    #[test]
    fn parse_show_version_missing_field() {
        assert_eq!(parse_show_version("Name: requests\n"), None);
        assert_eq!(parse_show_version(""), None);
    }

    #[test]
    fn parse_show_version_trims_whitespace() {
        assert_eq!(
            parse_show_version("Version:   1.2.3  \n"),
            Some("1.2.3".to_string())
        );
    }
}
