//! Unmanaged fallback: a detached background process.
//!
//! No supervision and no boot persistence. The spawned process outlives the
//! provisioner; beyond the initial spawn and the best-effort kill of a prior
//! instance there is no coordination with it.

use std::fs::OpenOptions;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::Result;
use crate::shell::CommandRunner;

use super::AppSpec;

/// Best-effort termination of a previously launched instance.
///
/// A failing pkill usually just means nothing was running.
pub fn stop_previous(runner: &dyn CommandRunner, app: &AppSpec) {
    let command = format!("pkill -f '{}'", app.process_pattern());
    if !runner.check(&command) {
        tracing::debug!("No previous {} instance to stop", app.name);
    }
}

/// Launch the application detached, with output appended to its log file
/// in the working directory. Returns the child pid.
pub fn spawn_detached(app: &AppSpec, workdir: &Path) -> Result<u32> {
    let log_path = workdir.join(app.log_name());
    let log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;
    let log_err = log.try_clone()?;

    let mut cmd = Command::new(&app.runtime);
    cmd.arg(&app.entry)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(log)
        .stderr(log_err);

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        // Detach from the controlling terminal so the app survives the
        // provisioner's exit.
        unsafe {
            cmd.pre_exec(|| {
                libc::setsid();
                Ok(())
            });
        }
    }

    let child = cmd.spawn()?;
    let pid = child.id();
    tracing::info!(
        "Launched {} detached (pid {}), logging to {}",
        app.name,
        pid,
        log_path.display()
    );
    Ok(pid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;
    use tempfile::TempDir;

    #[test]
    fn stop_previous_matches_process_command_line() {
        let runner = MockRunner::new();
        stop_previous(&runner, &AppSpec::default());
        assert!(runner.ran("pkill -f 'node app.js'"));
    }

    #[test]
    fn stop_previous_tolerates_no_running_instance() {
        let runner = MockRunner::new();
        runner.fail_on("pkill", 1);
        // must not panic or error
        stop_previous(&runner, &AppSpec::default());
    }

    #[test]
    fn spawn_creates_log_file_and_returns_pid() {
        let dir = TempDir::new().unwrap();
        let app = AppSpec {
            name: "testapp".into(),
            runtime: "true".into(),
            entry: "ignored".into(),
        };

        let pid = spawn_detached(&app, dir.path()).unwrap();
        assert!(pid > 0);
        assert!(dir.path().join("testapp.log").exists());
    }
}
