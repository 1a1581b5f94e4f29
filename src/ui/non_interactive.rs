//! Non-interactive UI for CI/headless environments.
//!
//! Prompts are answered from `BERTH_PROMPT_*` environment variables (e.g.
//! `BERTH_PROMPT_DB_HOST`), falling back to the prompt's default. A prompt
//! with neither an override nor a default resolves to the empty string and
//! is left to the caller's required-field validation, matching the
//! fail-without-retry policy of the interactive path.

use std::collections::HashMap;

use anyhow::anyhow;

use crate::error::Result;

use super::theme::BerthTheme;
use super::{OutputMode, Prompt, PromptType, SpinnerHandle, UserInterface};

/// Environment variable prefix for prompt overrides.
const PROMPT_ENV_PREFIX: &str = "BERTH_PROMPT_";

/// UI implementation for non-interactive mode.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI, collecting `BERTH_PROMPT_*` vars.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }

    fn env_key(prompt_key: &str) -> String {
        format!("{}{}", PROMPT_ENV_PREFIX, prompt_key.to_uppercase())
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        let env_key = Self::env_key(&prompt.key);
        if let Some(value) = self.env_overrides.get(&env_key) {
            return Ok(value.clone());
        }
        if let Some(default) = &prompt.default {
            return Ok(default.clone());
        }
        // Secrets have no default to fall back to, so surface the miss
        // rather than sending an empty password into the config.
        if prompt.prompt_type == PromptType::Password {
            return Err(anyhow!(
                "No answer for prompt '{}' in non-interactive mode (set {})",
                prompt.key,
                env_key
            )
            .into());
        }
        Ok(String::new())
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_status() {
            println!("… {}", message);
        }
        Box::new(LogSpinner {
            theme: BerthTheme::plain(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in that prints completion lines instead of animating.
struct LogSpinner {
    theme: BerthTheme,
}

impl SpinnerHandle for LogSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn finish_skipped(&mut self, msg: &str) {
        println!("{}", self.theme.format_skipped(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn prompt_uses_env_override() {
        let mut ui = NonInteractiveUI::with_overrides(
            OutputMode::Silent,
            overrides(&[("BERTH_PROMPT_DB_HOST", "db.internal")]),
        );
        let answer = ui.prompt(&Prompt::input("db_host", "Database host")).unwrap();
        assert_eq!(answer, "db.internal");
    }

    #[test]
    fn prompt_falls_back_to_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Silent, HashMap::new());
        let answer = ui
            .prompt(&Prompt::input("db_port", "Database port").with_default("3306"))
            .unwrap();
        assert_eq!(answer, "3306");
    }

    #[test]
    fn prompt_without_answer_is_empty() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Silent, HashMap::new());
        let answer = ui.prompt(&Prompt::input("db_user", "Database user")).unwrap();
        assert_eq!(answer, "");
    }

    #[test]
    fn password_without_answer_errors() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Silent, HashMap::new());
        let result = ui.prompt(&Prompt::password("db_password", "Database password"));
        assert!(result.is_err());
    }

    #[test]
    fn env_key_is_uppercased() {
        assert_eq!(
            NonInteractiveUI::env_key("db_name"),
            "BERTH_PROMPT_DB_NAME"
        );
    }
}
