//! Deploy strategies
//!
//! Each strategy only builds a command; running it is the combinator's
//! caller's job. A strategy returning `None` does not apply to this run and
//! is skipped without counting as an attempt.

use crate::domain::ports::CommandSpec;

use super::options::DeployOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    /// Output streams to the terminal
    Stream,
    /// Output is captured and replayed; the timeout applies
    Capture,
}

#[derive(Debug, Clone, Copy)]
pub struct DeployStrategy {
    pub name: &'static str,
    pub mode: ExecMode,
    pub build: fn(&DeployOptions) -> Option<CommandSpec>,
}

fn direct(options: &DeployOptions) -> Option<CommandSpec> {
    Some(
        CommandSpec::new(&options.cli)
            .args(options.base_flags())
            .cwd(&options.project_root),
    )
}

fn direct_with_token(options: &DeployOptions) -> Option<CommandSpec> {
    options.token.as_ref()?;
    direct(options).map(|spec| spec.args(options.token_flags()))
}

fn via_runner(options: &DeployOptions) -> Option<CommandSpec> {
    Some(
        CommandSpec::new(&options.runner)
            .arg(&options.cli)
            .args(options.base_flags())
            .args(options.token_flags())
            .cwd(&options.project_root),
    )
}

fn low_level(options: &DeployOptions) -> Option<CommandSpec> {
    Some(
        CommandSpec::new(&options.runner)
            .arg("--yes")
            .arg(&options.cli)
            .args(options.base_flags())
            .args(options.token_flags())
            .cwd(&options.project_root)
            .timeout(options.timeout),
    )
}

pub const STRATEGIES: &[DeployStrategy] = &[
    DeployStrategy {
        name: "provider cli",
        mode: ExecMode::Stream,
        build: direct,
    },
    DeployStrategy {
        name: "provider cli with token",
        mode: ExecMode::Stream,
        build: direct_with_token,
    },
    DeployStrategy {
        name: "package runner",
        mode: ExecMode::Stream,
        build: via_runner,
    },
    DeployStrategy {
        name: "low-level invocation",
        mode: ExecMode::Capture,
        build: low_level,
    },
];

/// Run applicable strategies in order until `attempt` reports success.
pub fn first_success<'s>(
    strategies: &'s [DeployStrategy],
    options: &DeployOptions,
    mut attempt: impl FnMut(&DeployStrategy, CommandSpec) -> bool,
) -> Option<&'s DeployStrategy> {
    strategies.iter().find(|strategy| match (strategy.build)(options) {
        Some(spec) => attempt(strategy, spec),
        None => {
            tracing::debug!(strategy = strategy.name, "strategy not applicable");
            false
        }
    })
}
