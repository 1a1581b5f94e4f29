//! Integration tests for the CLI binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("berth"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("provisioning"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("berth"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn missing_config_exits_nonzero_before_any_side_effect(
) -> Result<(), Box<dyn std::error::Error>> {
    // The config preflight runs before probing, prompting, or installing,
    // so a bare directory fails fast without touching the host.
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("berth"));
    cmd.current_dir(temp.path());
    cmd.arg("--non-interactive");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Configuration not found"));

    assert!(!temp.path().join("config.yaml.bak").exists());
    Ok(())
}

#[test]
fn project_flag_overrides_invocation_directory() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("berth"));
    cmd.args(["--non-interactive", "--project"]);
    cmd.arg(temp.path().join("nowhere"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("nowhere"));
    Ok(())
}
