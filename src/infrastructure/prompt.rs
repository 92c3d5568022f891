//! Prompter implementations

use dialoguer::{Confirm, Input, Password};

use crate::domain::ports::Prompter;
use crate::error::{ShipitError, ShipitResult};

fn prompt_error(err: dialoguer::Error) -> ShipitError {
    ShipitError::Prompt(err.to_string())
}

/// Terminal prompts via dialoguer.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn is_interactive(&self) -> bool {
        true
    }

    fn input(&self, prompt: &str, default: Option<&str>) -> ShipitResult<Option<String>> {
        let mut input = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        let value = input.interact_text().map_err(prompt_error)?;
        let value = value.trim().to_string();
        Ok((!value.is_empty()).then_some(value))
    }

    fn secret(&self, prompt: &str) -> ShipitResult<Option<String>> {
        let value = Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(prompt_error)?;
        let value = value.trim().to_string();
        Ok((!value.is_empty()).then_some(value))
    }

    fn confirm(&self, prompt: &str, default: bool) -> ShipitResult<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn pause(&self, prompt: &str) -> ShipitResult<()> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map(|_| ())
            .map_err(prompt_error)
    }
}

/// Prompter for CI / `--yes` runs: every question takes its default.
///
/// Inputs without a default yield `None`; the caller decides whether that is
/// fatal for a required value.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnattendedPrompter;

impl Prompter for UnattendedPrompter {
    fn is_interactive(&self) -> bool {
        false
    }

    fn input(&self, prompt: &str, default: Option<&str>) -> ShipitResult<Option<String>> {
        tracing::debug!(prompt, default, "unattended input");
        Ok(default.map(String::from))
    }

    fn secret(&self, prompt: &str) -> ShipitResult<Option<String>> {
        tracing::debug!(prompt, "unattended secret");
        Ok(None)
    }

    fn confirm(&self, prompt: &str, default: bool) -> ShipitResult<bool> {
        tracing::debug!(prompt, default, "unattended confirm");
        Ok(default)
    }

    fn pause(&self, _prompt: &str) -> ShipitResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unattended_takes_defaults() {
        let p = UnattendedPrompter;
        assert!(!p.is_interactive());
        assert_eq!(p.input("Port", Some("3000")).unwrap().as_deref(), Some("3000"));
        assert_eq!(p.input("Email", None).unwrap(), None);
        assert_eq!(p.secret("Token").unwrap(), None);
        assert!(p.confirm("Continue?", true).unwrap());
        assert!(!p.confirm("Delete?", false).unwrap());
    }
}
