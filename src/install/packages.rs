//! System package installation.

use crate::error::{BerthError, Result};
use crate::probe::PackageManager;
use crate::shell::{CommandOptions, CommandRunner};

/// Baseline tools installed before anything else.
///
/// At least one of curl/wget is needed by the downstream setup scripts;
/// git is part of the standard baseline.
pub const BASELINE_TOOLS: &[&str] = &["curl", "wget", "git"];

/// Install packages with the manager's non-interactive invocation.
pub fn install_packages(
    runner: &dyn CommandRunner,
    manager: PackageManager,
    packages: &[&str],
) -> Result<()> {
    let command = manager.install_command(packages);
    tracing::debug!("Installing packages: {}", command);

    let result = runner.run(&command, &CommandOptions::quiet())?;
    if result.success {
        Ok(())
    } else {
        Err(BerthError::CommandFailed {
            command,
            code: result.exit_code,
        })
    }
}

/// Install the baseline tools, tolerating failure.
///
/// Returns whether the install succeeded. Failure is deliberately not
/// fatal: the host usually has curl or wget already, and the run continues
/// on whatever is present.
pub fn install_baseline(runner: &dyn CommandRunner, manager: PackageManager) -> bool {
    match install_packages(runner, manager, BASELINE_TOOLS) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Baseline tool install failed (continuing): {}", e);
            false
        }
    }
}
