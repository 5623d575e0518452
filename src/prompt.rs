// Interactive input. Commands talk to a `Prompter` so the terminal flows
// can be replaced by a scripted one in tests; `TerminalPrompter` is the
// `dialoguer` implementation the binary uses.

use crate::error::{CliError, Result};
use dialoguer::{Confirm, Input, MultiSelect, Password};

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

pub trait Prompter {
    /// Email and hidden password for login.
    fn credentials(&mut self) -> Result<Credentials>;

    /// Hidden password entry.
    fn password(&mut self) -> Result<String>;

    /// Yes/no question, defaulting to no.
    fn confirm(&mut self, message: &str) -> Result<bool>;

    /// Pick any number of `options`; returns the chosen indices.
    fn select(&mut self, message: &str, options: &[String]) -> Result<Vec<usize>>;
}

#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn credentials(&mut self) -> Result<Credentials> {
        let email: String = Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(CliError::Prompt)?;
        let password = self.password()?;
        Ok(Credentials { email, password })
    }

    fn password(&mut self) -> Result<String> {
        // `Password` hides input in the terminal.
        Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(CliError::Prompt)
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .map_err(CliError::Prompt)
    }

    fn select(&mut self, message: &str, options: &[String]) -> Result<Vec<usize>> {
        // Space toggles an entry, Enter accepts.
        MultiSelect::new()
            .with_prompt(message)
            .items(options)
            .interact()
            .map_err(CliError::Prompt)
    }
}
