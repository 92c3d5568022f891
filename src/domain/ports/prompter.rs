//! Prompter Port
//!
//! The single operator-input boundary. Implementations can be interactive
//! (terminal prompts) or unattended (defaults, or failure on missing input).

use crate::error::ShipitResult;

pub trait Prompter {
    /// Whether an operator is present to answer.
    fn is_interactive(&self) -> bool;

    /// Free-text value. `Ok(None)` means the operator supplied nothing.
    fn input(&self, prompt: &str, default: Option<&str>) -> ShipitResult<Option<String>>;

    /// Hidden value (tokens).
    fn secret(&self, prompt: &str) -> ShipitResult<Option<String>>;

    fn confirm(&self, prompt: &str, default: bool) -> ShipitResult<bool>;

    /// Block until the operator acknowledges (e.g. after a manual step).
    fn pause(&self, prompt: &str) -> ShipitResult<()>;
}

#[cfg(test)]
pub use scripted::ScriptedPrompter;

#[cfg(test)]
mod scripted {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    /// Answers prompts from a queue; confirms fall back to their default
    /// once the queue is empty and inputs fall back to `None`.
    #[derive(Default)]
    pub struct ScriptedPrompter {
        answers: RefCell<VecDeque<String>>,
        confirms: RefCell<VecDeque<bool>>,
        pub asked: RefCell<Vec<String>>,
    }

    impl ScriptedPrompter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn answer(self, value: &str) -> Self {
            self.answers.borrow_mut().push_back(value.to_string());
            self
        }

        pub fn confirm_with(self, value: bool) -> Self {
            self.confirms.borrow_mut().push_back(value);
            self
        }
    }

    impl Prompter for ScriptedPrompter {
        fn is_interactive(&self) -> bool {
            true
        }

        fn input(&self, prompt: &str, default: Option<&str>) -> ShipitResult<Option<String>> {
            self.asked.borrow_mut().push(prompt.to_string());
            Ok(self
                .answers
                .borrow_mut()
                .pop_front()
                .or_else(|| default.map(String::from)))
        }

        fn secret(&self, prompt: &str) -> ShipitResult<Option<String>> {
            self.input(prompt, None)
        }

        fn confirm(&self, prompt: &str, default: bool) -> ShipitResult<bool> {
            self.asked.borrow_mut().push(prompt.to_string());
            Ok(self.confirms.borrow_mut().pop_front().unwrap_or(default))
        }

        fn pause(&self, prompt: &str) -> ShipitResult<()> {
            self.asked.borrow_mut().push(prompt.to_string());
            Ok(())
        }
    }
}
