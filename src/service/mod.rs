//! Service registration and startup.
//!
//! One guard condition decides the terminal state: hosts with systemd get a
//! managed unit (boot-time start, restart-on-failure); everything else gets
//! a detached background process with no supervision. The choice is made
//! once per run and never re-evaluated.

pub mod fallback;
pub mod systemd;

pub use fallback::{spawn_detached, stop_previous};
pub use systemd::{install_unit, render_unit, systemd_available};

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::shell::CommandRunner;

/// The application being provisioned.
#[derive(Debug, Clone)]
pub struct AppSpec {
    /// Service and log file name.
    pub name: String,
    /// Runtime binary invoked to start the app.
    pub runtime: String,
    /// Entry point, relative to the working directory.
    pub entry: String,
}

impl Default for AppSpec {
    fn default() -> Self {
        Self {
            name: "lunafirpay".to_string(),
            runtime: "node".to_string(),
            entry: "app.js".to_string(),
        }
    }
}

impl AppSpec {
    /// systemd unit file name.
    pub fn unit_name(&self) -> String {
        format!("{}.service", self.name)
    }

    /// Log file name used by the unmanaged fallback.
    pub fn log_name(&self) -> String {
        format!("{}.log", self.name)
    }

    /// Command-line pattern matching a running instance.
    pub fn process_pattern(&self) -> String {
        format!("{} {}", self.runtime, self.entry)
    }
}

/// How the application ended up running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Registered and started as a systemd service.
    Managed { unit_path: PathBuf },
    /// Launched as a detached background process.
    Detached { pid: u32 },
}

/// Start the application, managed when systemd is present, detached
/// otherwise.
pub fn launch(
    runner: &dyn CommandRunner,
    app: &AppSpec,
    workdir: &Path,
    unit_dir: &Path,
) -> Result<LaunchOutcome> {
    if systemd_available(runner) {
        let unit_path = install_unit(runner, app, workdir, unit_dir)?;
        Ok(LaunchOutcome::Managed { unit_path })
    } else {
        tracing::info!("systemd not available, falling back to detached process");
        stop_previous(runner, app);
        let pid = spawn_detached(app, workdir)?;
        Ok(LaunchOutcome::Detached { pid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_app_is_the_node_entry_point() {
        let app = AppSpec::default();
        assert_eq!(app.unit_name(), "lunafirpay.service");
        assert_eq!(app.log_name(), "lunafirpay.log");
        assert_eq!(app.process_pattern(), "node app.js");
    }
}
