//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod command_runner;
pub mod prompter;
pub mod reporter;

pub use command_runner::{CommandOutput, CommandRunner, CommandSpec};
pub use prompter::Prompter;
pub use reporter::{Level, NoopReporter, Reporter};

#[cfg(test)]
pub use command_runner::ScriptedRunner;
#[cfg(test)]
pub use prompter::ScriptedPrompter;
#[cfg(test)]
pub use reporter::RecordingReporter;
