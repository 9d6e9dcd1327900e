//! Integration tests for CLI argument parsing and command wiring.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("packmule.json"), config).unwrap();
    temp
}

const SIMPLE_CONFIG: &str = r#"
{
  "packages": {
    "requests": ">=2.28.0",
    "flask": "",
    "rich": "==13.7.0"
  }
}
"#;

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("packmule"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Concurrent Python package"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("packmule"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_install_dry_run_lists_the_queue() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(SIMPLE_CONFIG);
    let mut cmd = Command::new(cargo_bin("packmule"));
    cmd.current_dir(temp.path());
    cmd.args(["install", "--dry-run"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("would install 3 package(s)"))
        .stdout(predicate::str::contains("requests>=2.28.0"))
        .stdout(predicate::str::contains("rich==13.7.0"));
    Ok(())
}

#[test]
fn cli_install_dry_run_accepts_explicit_packages() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("packmule"));
    cmd.current_dir(temp.path());
    cmd.args(["install", "--packages", "six,wheel>=0.40.0", "--dry-run"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("six"))
        .stdout(predicate::str::contains("wheel>=0.40.0"));
    Ok(())
}

#[test]
fn cli_install_rejects_bad_constraint() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("packmule"));
    cmd.current_dir(temp.path());
    cmd.args(["install", "--packages", "requests>=oops", "--dry-run"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
    Ok(())
}

#[test]
fn cli_list_shows_resolved_set() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(SIMPLE_CONFIG);
    let mut cmd = Command::new(cargo_bin("packmule"));
    cmd.current_dir(temp.path());
    cmd.arg("list");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("3 configured package(s)"))
        .stdout(predicate::str::contains("requests"))
        .stdout(predicate::str::contains("any version"));
    Ok(())
}

#[test]
fn cli_list_honors_no_color() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(SIMPLE_CONFIG);
    let mut cmd = Command::new(cargo_bin("packmule"));
    cmd.current_dir(temp.path());
    cmd.env("NO_COLOR", "1");
    cmd.arg("list");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[").not())
        .stdout(predicate::str::contains("requests"));
    Ok(())
}

#[test]
fn cli_list_without_config_uses_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("packmule"));
    cmd.current_dir(temp.path());
    cmd.arg("list");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("requests"));
    Ok(())
}

#[test]
fn cli_rejects_malformed_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("{ not json");
    let mut cmd = Command::new(cargo_bin("packmule"));
    cmd.current_dir(temp.path());
    cmd.arg("list");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
    Ok(())
}

#[test]
fn cli_rejects_invalid_settings() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(r#"{ "packages": {}, "settings": { "workers": 0 } }"#);
    let mut cmd = Command::new(cargo_bin("packmule"));
    cmd.current_dir(temp.path());
    cmd.arg("list");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("workers"));
    Ok(())
}

#[test]
fn cli_explicit_missing_config_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("packmule"));
    cmd.current_dir(temp.path());
    cmd.args(["--config", "/nonexistent/packmule.json", "list"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
    Ok(())
}

#[test]
fn cli_uninstall_requires_names() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("packmule"));
    cmd.arg("uninstall");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("required"));
    Ok(())
}

#[test]
fn cli_completions_emits_a_script() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("packmule"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("packmule"));
    Ok(())
}
