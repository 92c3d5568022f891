//! Deploy Engine
//!
//! Guards against known misconfigurations, then hands the strategy table to
//! `first_success`. Exit code 0 is the only success signal.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::application::env_vars::resolve_value;
use crate::application::Services;
use crate::domain::entities::{DeployTarget, ProjectContext};
use crate::domain::ports::CommandOutput;
use crate::error::{ShipitError, ShipitResult};

use super::options::DeployOptions;
use super::result::{AttemptRecord, DeployOutcome};
use super::strategies::{first_success, ExecMode, STRATEGIES};

pub const MANUAL_DEPLOY_STEPS: &[&str] = &[
    "Install the CLI: npm install -g vercel",
    "Authenticate: vercel login",
    "Or create a token at https://vercel.com/account/tokens and set VERCEL_TOKEN in .env.local",
    "Deploy by hand: vercel --prod",
];

/// Tail of captured output replayed after a low-level run.
const REPLAY_LINES: usize = 30;

static DEPLOY_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https://[A-Za-z0-9.-]+\.vercel\.app\S*").expect("valid regex"));

pub fn extract_url(output: &str) -> Option<String> {
    DEPLOY_URL
        .find_iter(output)
        .last()
        .map(|m| m.as_str().to_string())
}

pub struct DeployEngine<'a> {
    services: Services<'a>,
}

impl<'a> DeployEngine<'a> {
    pub fn new(services: Services<'a>) -> Self {
        Self { services }
    }

    /// Refuse to deploy a full-stack framework whose build does nothing.
    pub fn guard(context: &ProjectContext) -> ShipitResult<()> {
        if !context.has_placeholder_build() {
            return Ok(());
        }
        Err(ShipitError::PlaceholderBuildCommand {
            framework: context
                .framework
                .map(|f| f.label().to_string())
                .unwrap_or_default(),
            command: context.build_command.clone().unwrap_or_default(),
        })
    }

    pub fn options(&self, context: &ProjectContext, target: DeployTarget) -> DeployOptions {
        let deploy = &self.services.config.deploy;
        DeployOptions {
            project_root: context.root.clone(),
            cli: deploy.cli.clone(),
            runner: deploy.runner.clone(),
            token: resolve_value(self.services, &context.root, "VERCEL_TOKEN"),
            target,
            timeout: Duration::from_secs(deploy.timeout_secs),
        }
    }

    pub fn deploy(&self, context: &ProjectContext, target: DeployTarget) -> ShipitResult<DeployOutcome> {
        Self::guard(context)?;
        self.run(&self.options(context, target))
    }

    pub fn run(&self, options: &DeployOptions) -> ShipitResult<DeployOutcome> {
        let services = self.services;
        let mut attempts = Vec::new();
        let mut url = None;

        let winner = first_success(STRATEGIES, options, |strategy, spec| {
            services
                .reporter
                .step(&format!("Deploying via {}", strategy.name));
            tracing::info!(strategy = strategy.name, command = %spec.display(), "deploy attempt");

            let result = match strategy.mode {
                ExecMode::Stream => services.runner.stream(&spec),
                ExecMode::Capture => services.runner.capture(&spec),
            };

            let (succeeded, detail) = match result {
                Ok(output) => {
                    if strategy.mode == ExecMode::Capture {
                        url = extract_url(&output.stdout);
                        self.replay(&output);
                    }
                    (output.success(), describe(&output))
                }
                Err(e) => (false, e.to_string()),
            };

            if !succeeded {
                services
                    .reporter
                    .warning(&format!("{} failed: {}", strategy.name, detail));
            }
            attempts.push(AttemptRecord {
                strategy: strategy.name,
                command: spec.display(),
                succeeded,
                detail,
            });
            succeeded
        });

        match winner {
            Some(strategy) => {
                services
                    .reporter
                    .success(&format!("Deployed via {}", strategy.name));
                Ok(DeployOutcome {
                    strategy: strategy.name,
                    url,
                    attempts,
                })
            }
            None => {
                services.reporter.error("Every deploy strategy failed");
                services
                    .reporter
                    .checklist("Deploy manually:", MANUAL_DEPLOY_STEPS);
                Err(ShipitError::DeployExhausted {
                    attempts: attempts.len(),
                })
            }
        }
    }

    fn replay(&self, output: &CommandOutput) {
        let reporter = self.services.reporter;
        let lines: Vec<&str> = output.stdout.lines().chain(output.stderr.lines()).collect();
        let skip = lines.len().saturating_sub(REPLAY_LINES);
        for line in &lines[skip..] {
            reporter.info(&format!("  {}", line));
        }
    }
}

fn describe(output: &CommandOutput) -> String {
    match output.code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}
