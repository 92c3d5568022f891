//! Application Layer
//!
//! Use cases composed from domain types and ports. Every service takes the
//! project root explicitly and reaches the outside world only through the
//! `Services` bundle.

pub mod deploy;
pub mod discovery;
pub mod env_vars;
pub mod git;
pub mod misplaced;
pub mod orchestrator;
pub mod prerequisites;
pub mod provider;
pub mod ssh;

use crate::config::Config;
use crate::domain::ports::{CommandRunner, Prompter, Reporter};

/// Reads one variable from the process environment.
pub type EnvLookup = fn(&str) -> Option<String>;

pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Ports and configuration shared by every use case in one run.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub runner: &'a dyn CommandRunner,
    pub prompter: &'a dyn Prompter,
    pub reporter: &'a dyn Reporter,
    pub config: &'a Config,
    pub env: EnvLookup,
}

impl<'a> Services<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        prompter: &'a dyn Prompter,
        reporter: &'a dyn Reporter,
        config: &'a Config,
    ) -> Self {
        Self {
            runner,
            prompter,
            reporter,
            config,
            env: process_env,
        }
    }

    /// Replace the process-environment lookup.
    pub fn with_env(mut self, env: EnvLookup) -> Self {
        self.env = env;
        self
    }
}

pub use deploy::DeployEngine;
pub use discovery::discover_project_context;
pub use env_vars::{check_environment, ensure_environment, resolve_value};
pub use git::Git;
pub use orchestrator::{classify_error, ErrorCategory, Orchestrator, RunReport};
pub use prerequisites::PrerequisiteChecker;
pub use ssh::{SshManager, Transport, VerifiedRemote};
