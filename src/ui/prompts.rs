//! Interactive prompts.

use console::Term;
use dialoguer::{Input, Password};

use crate::error::{BerthError, Result};

use super::{Prompt, PromptType};

/// Convert dialoguer errors to BerthError.
fn map_dialoguer_err(e: dialoguer::Error) -> BerthError {
    BerthError::Io(e.into())
}

/// Prompt the user for input.
///
/// Empty input is allowed everywhere: required-field validation is the
/// credential collector's job, and a single failure aborts the run rather
/// than re-prompting.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<String> {
    match prompt.prompt_type {
        PromptType::Input => prompt_input(prompt, term),
        PromptType::Password => prompt_password(prompt, term),
    }
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<String> {
    let input = Input::<String>::new()
        .with_prompt(&prompt.question)
        .allow_empty(true);

    let result: String = if let Some(default) = &prompt.default {
        input
            .default(default.clone())
            .interact_text_on(term)
            .map_err(map_dialoguer_err)?
    } else {
        input.interact_text_on(term).map_err(map_dialoguer_err)?
    };

    Ok(result)
}

fn prompt_password(prompt: &Prompt, term: &Term) -> Result<String> {
    Password::new()
        .with_prompt(&prompt.question)
        .allow_empty_password(true)
        .interact_on(term)
        .map_err(map_dialoguer_err)
}
