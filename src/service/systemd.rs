//! systemd unit generation and installation.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::shell::CommandRunner;

use super::AppSpec;

/// Whether systemd is managing this host.
pub fn systemd_available(runner: &dyn CommandRunner) -> bool {
    runner.check("command -v systemctl")
}

/// Render the service unit for the application.
///
/// `runtime_path` must be absolute: systemd does not consult PATH for
/// `ExecStart`.
pub fn render_unit(app: &AppSpec, runtime_path: &str, workdir: &Path) -> String {
    format!(
        "[Unit]\n\
         Description={name} Node.js application\n\
         After=network.target\n\
         \n\
         [Service]\n\
         Type=simple\n\
         WorkingDirectory={workdir}\n\
         ExecStart={runtime} {workdir}/{entry}\n\
         Restart=always\n\
         RestartSec=3\n\
         Environment=NODE_ENV=production\n\
         \n\
         [Install]\n\
         WantedBy=multi-user.target\n",
        name = app.name,
        workdir = workdir.display(),
        runtime = runtime_path,
        entry = app.entry,
    )
}

/// Write the unit, reload systemd, enable the service for boot, and
/// (re)start it. Any systemctl failure propagates.
pub fn install_unit(
    runner: &dyn CommandRunner,
    app: &AppSpec,
    workdir: &Path,
    unit_dir: &Path,
) -> Result<PathBuf> {
    let runtime_path = runner.capture(&format!("command -v {}", app.runtime))?;

    let unit_path = unit_dir.join(app.unit_name());
    std::fs::write(&unit_path, render_unit(app, &runtime_path, workdir))?;
    tracing::info!("Wrote service unit to {}", unit_path.display());

    runner.capture("systemctl daemon-reload")?;
    runner.capture(&format!("systemctl enable {}", app.name))?;
    runner.capture(&format!("systemctl restart {}", app.name))?;

    Ok(unit_path)
}
