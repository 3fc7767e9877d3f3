//! Operator prompts
//!
//! The session talks to the operator only through [`Prompter`]. Select
//! prompts hand back the chosen *label*, never its position, so callers
//! resolve ids through a `LabelSet`.

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use thiserror::Error;

/// Errors from the terminal while prompting
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Prompt interrupted: {0}")]
    Interrupted(String),

    #[error("Nothing to choose from for '{0}'")]
    NoChoices(String),
}

impl From<dialoguer::Error> for PromptError {
    fn from(err: dialoguer::Error) -> Self {
        PromptError::Interrupted(err.to_string())
    }
}

/// One operator, one question at a time
pub trait Prompter {
    /// Free-text answer; may be empty, callers validate
    fn input(&mut self, prompt: &str) -> Result<String, PromptError>;

    /// Pick one of `items`, returning the picked item's text
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<String, PromptError>;

    /// Yes/no question
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError>;
}

/// Interactive terminal prompts
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str) -> Result<String, PromptError> {
        let value: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }

    fn select(&mut self, prompt: &str, items: &[String]) -> Result<String, PromptError> {
        if items.is_empty() {
            return Err(PromptError::NoChoices(prompt.to_string()));
        }

        let selection = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?;

        items
            .get(selection)
            .cloned()
            .ok_or_else(|| PromptError::NoChoices(prompt.to_string()))
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(answer)
    }
}
