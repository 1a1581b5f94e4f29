//! Mock command runner for testing.
//!
//! `MockRunner` implements [`CommandRunner`] and captures every invocation
//! for later assertion. Results are scripted per command substring, so tests
//! can simulate any host (which package manager exists, whether node or yq
//! is installed, whether systemd is present) without touching the system.
//!
//! # Example
//!
//! ```
//! use berth::shell::{CommandRunner, MockRunner};
//!
//! let runner = MockRunner::new();
//! runner.succeed_with("uname -m", "x86_64\n");
//! runner.fail_on("command -v yq", 1);
//!
//! assert_eq!(runner.capture("uname -m").unwrap(), "x86_64");
//! assert!(!runner.check("command -v yq"));
//! assert_eq!(runner.invocations().len(), 2);
//! ```

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::Result;

use super::command::{CommandOptions, CommandResult, CommandRunner};

/// A recorded command invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// The full command string.
    pub command: String,
    /// Environment variables passed with the command.
    pub env: HashMap<String, String>,
    /// Working directory, if any.
    pub cwd: Option<std::path::PathBuf>,
}

#[derive(Debug, Clone)]
struct Rule {
    pattern: String,
    exit_code: i32,
    stdout: String,
}

/// Scripted command runner for tests.
///
/// Rules match on command substrings, first match wins. Commands with no
/// matching rule succeed with empty output.
#[derive(Debug, Default)]
pub struct MockRunner {
    rules: Mutex<Vec<Rule>>,
    invocations: Mutex<Vec<Invocation>>,
}

impl MockRunner {
    /// Create a new mock runner where every command succeeds by default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful result with the given stdout for commands
    /// containing `pattern`.
    pub fn succeed_with(&self, pattern: &str, stdout: &str) {
        self.add_rule(pattern, 0, stdout);
    }

    /// Script a failure with the given exit code for commands containing
    /// `pattern`.
    pub fn fail_on(&self, pattern: &str, exit_code: i32) {
        self.add_rule(pattern, exit_code, "");
    }

    fn add_rule(&self, pattern: &str, exit_code: i32, stdout: &str) {
        self.rules.lock().unwrap().push(Rule {
            pattern: pattern.to_string(),
            exit_code,
            stdout: stdout.to_string(),
        });
    }

    /// All recorded invocations, in execution order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    /// The recorded command strings, in execution order.
    pub fn commands(&self) -> Vec<String> {
        self.invocations()
            .into_iter()
            .map(|i| i.command)
            .collect()
    }

    /// Whether any recorded command contains `pattern`.
    pub fn ran(&self, pattern: &str) -> bool {
        self.commands().iter().any(|c| c.contains(pattern))
    }

    /// The first recorded invocation whose command contains `pattern`.
    pub fn invocation_matching(&self, pattern: &str) -> Option<Invocation> {
        self.invocations()
            .into_iter()
            .find(|i| i.command.contains(pattern))
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &str, options: &CommandOptions) -> Result<CommandResult> {
        self.invocations.lock().unwrap().push(Invocation {
            command: command.to_string(),
            env: options.env.clone(),
            cwd: options.cwd.clone(),
        });

        let rule = self
            .rules
            .lock()
            .unwrap()
            .iter()
            .find(|r| command.contains(&r.pattern))
            .cloned();

        let result = match rule {
            Some(rule) if rule.exit_code == 0 => {
                CommandResult::success(rule.stdout, String::new(), Duration::ZERO)
            }
            Some(rule) => CommandResult::failure(
                Some(rule.exit_code),
                rule.stdout,
                String::new(),
                Duration::ZERO,
            ),
            None => CommandResult::success(String::new(), String::new(), Duration::ZERO),
        };

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_commands_succeed() {
        let runner = MockRunner::new();
        assert!(runner.check("anything at all"));
    }

    #[test]
    fn scripted_failure_is_returned() {
        let runner = MockRunner::new();
        runner.fail_on("command -v node", 1);
        assert!(!runner.check("command -v node"));
    }

    #[test]
    fn scripted_stdout_is_captured() {
        let runner = MockRunner::new();
        runner.succeed_with("uname -m", "aarch64\n");
        assert_eq!(runner.capture("uname -m").unwrap(), "aarch64");
    }

    #[test]
    fn first_matching_rule_wins() {
        let runner = MockRunner::new();
        runner.fail_on("node", 1);
        runner.succeed_with("node", "ignored");
        assert!(!runner.check("command -v node"));
    }

    #[test]
    fn invocations_record_env() {
        let runner = MockRunner::new();
        let mut options = CommandOptions::quiet();
        options.env.insert("KEY".into(), "value".into());
        runner.run("yq -i", &options).unwrap();

        let inv = runner.invocation_matching("yq").unwrap();
        assert_eq!(inv.env.get("KEY").map(String::as_str), Some("value"));
    }

    #[test]
    fn ran_matches_substring() {
        let runner = MockRunner::new();
        runner
            .run("systemctl daemon-reload", &CommandOptions::quiet())
            .unwrap();
        assert!(runner.ran("daemon-reload"));
        assert!(!runner.ran("enable"));
    }
}
