//! Shell command execution.
//!
//! Everything Berth does to the host goes through the [`CommandRunner`]
//! trait: package installs, tool probes, the yq edit, systemctl calls.
//! Production code uses [`SystemRunner`]; tests script a
//! [`MockRunner`](super::mock::MockRunner) instead, so no test ever mutates
//! host state.

use crate::error::{BerthError, Result};
use std::collections::HashMap;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<std::path::PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

impl CommandOptions {
    /// Options that capture all output, for probe-style commands.
    pub fn quiet() -> Self {
        Self {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        }
    }
}

/// Narrow interface for executing host commands.
///
/// The provisioner never spawns processes directly; it asks a runner.
pub trait CommandRunner {
    /// Execute a shell command with the given options.
    fn run(&self, command: &str, options: &CommandOptions) -> Result<CommandResult>;

    /// Execute a command silently and return whether it succeeded.
    fn check(&self, command: &str) -> bool {
        self.run(command, &CommandOptions::quiet())
            .map(|r| r.success)
            .unwrap_or(false)
    }

    /// Execute a command and return its trimmed stdout, failing on non-zero exit.
    fn capture(&self, command: &str) -> Result<String> {
        let result = self.run(command, &CommandOptions::quiet())?;
        if result.success {
            Ok(result.stdout.trim().to_string())
        } else {
            Err(BerthError::CommandFailed {
                command: command.to_string(),
                code: result.exit_code,
            })
        }
    }
}

/// Production runner that executes commands via `sh -c`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &str, options: &CommandOptions) -> Result<CommandResult> {
        let start = Instant::now();

        let mut cmd = Command::new("sh");
        cmd.arg("-c");
        cmd.arg(command);

        if let Some(cwd) = &options.cwd {
            cmd.current_dir(cwd);
        }

        for (key, value) in &options.env {
            cmd.env(key, value);
        }

        if options.capture_stdout {
            cmd.stdout(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit());
        }

        if options.capture_stderr {
            cmd.stderr(Stdio::piped());
        } else {
            cmd.stderr(Stdio::inherit());
        }

        cmd.stdin(Stdio::null());

        let output = cmd.output().map_err(|_| BerthError::CommandFailed {
            command: command.to_string(),
            code: None,
        })?;

        let duration = start.elapsed();

        let stdout = if options.capture_stdout {
            String::from_utf8_lossy(&output.stdout).to_string()
        } else {
            String::new()
        };

        let stderr = if options.capture_stderr {
            String::from_utf8_lossy(&output.stderr).to_string()
        } else {
            String::new()
        };

        if output.status.success() {
            Ok(CommandResult::success(stdout, stderr, duration))
        } else {
            Ok(CommandResult::failure(
                output.status.code(),
                stdout,
                stderr,
                duration,
            ))
        }
    }
}
