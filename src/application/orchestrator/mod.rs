//! Orchestrator
//!
//! One strictly sequential run:
//! 1. Validate the project (manifest, repository, provider files)
//! 2. Pre-deployment checks (prerequisites, environment)
//! 3. Code-host connectivity (SSH, then HTTPS token fallback)
//! 4. Build
//! 5. Commit and push (skipped on a clean tree)
//! 6. Deploy
//!
//! Any stage error is classified once here, reported with a remediation
//! hint, and returned unchanged.

use std::path::PathBuf;

use chrono::{DateTime, Local};

use super::deploy::{DeployEngine, DeployOutcome};
use super::discovery::discover_project_context;
use super::env_vars::{ensure_environment, resolve_value};
use super::git::Git;
use super::prerequisites::PrerequisiteChecker;
use super::provider::{
    apply_package_name_fix, cleanup_linked_project, ensure_provider_config,
    remove_placeholder_build_command,
};
use super::ssh::{SshManager, Transport, VerifiedRemote};
use super::Services;
use crate::domain::entities::{DeploymentConfig, FixOutcome, PrerequisiteSummary, ProjectContext};
use crate::domain::ports::CommandSpec;
use crate::error::{ShipitError, ShipitResult};

mod classify;

pub use classify::{classify_error, ErrorCategory};

/// What a successful run did.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub project: Option<String>,
    /// `None` when checks were skipped
    pub prerequisites: Option<PrerequisiteSummary>,
    /// Environment variables collected and written this run
    pub env_written: Vec<String>,
    pub transport: Transport,
    pub built: bool,
    pub committed: bool,
    pub deploy: DeployOutcome,
}

impl RunReport {
    pub fn elapsed_secs(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

pub struct Orchestrator<'a> {
    services: Services<'a>,
    ssh_dir: Option<PathBuf>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(services: Services<'a>) -> Self {
        Self {
            services,
            ssh_dir: None,
        }
    }

    /// Use `dir` instead of `~/.ssh`.
    pub fn with_ssh_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.ssh_dir = Some(dir.into());
        self
    }

    fn ssh(&self) -> SshManager<'a> {
        match &self.ssh_dir {
            Some(dir) => SshManager::new(self.services, dir.clone()),
            None => SshManager::for_home(self.services),
        }
    }

    /// Run the full pipeline.
    pub fn run(&self, config: &DeploymentConfig) -> ShipitResult<RunReport> {
        let started_at = Local::now();
        self.pipeline(config, started_at).inspect_err(|e| {
            let category = classify_error(&e.to_string());
            tracing::error!(error = %e, category = category.label(), "run failed");
            let reporter = self.services.reporter;
            reporter.error(&e.to_string());
            reporter.checklist(category.title(), category.remediation());
        })
    }

    fn pipeline(&self, config: &DeploymentConfig, started_at: DateTime<Local>) -> ShipitResult<RunReport> {
        let reporter = self.services.reporter;
        let root = config.project_root.as_path();
        let git = Git::new(self.services, root);

        reporter.step("Validating project");
        let context = self.validate(config, &git)?;

        let mut prerequisites = None;
        let mut env_written = Vec::new();
        if config.skip_checks {
            reporter.info("Skipping pre-deployment checks");
        } else {
            reporter.step("Running pre-deployment checks");
            prerequisites = Some(self.check_prerequisites(config)?);
            env_written = ensure_environment(self.services, root, config.auto_fix)?;
        }

        reporter.step("Checking code-host connectivity");
        let remote = self.connect(config, &git)?;

        let built = match context.build_command.as_deref() {
            Some(command) => {
                reporter.step(&format!("Building: {}", command));
                self.build(&context, command)?;
                true
            }
            None => {
                reporter.info("No build command detected, skipping build");
                false
            }
        };

        reporter.step("Committing and pushing");
        let committed = if git.has_pending_changes()? {
            let message = self.commit_message(config, started_at)?;
            git.commit_and_push(&message, &remote)?;
            true
        } else {
            reporter.info("Working tree clean, nothing to commit");
            false
        };

        reporter.step("Deploying");
        let deploy = DeployEngine::new(self.services).deploy(&context, config.target)?;

        Ok(RunReport {
            started_at,
            finished_at: Local::now(),
            project: context.project_name().map(str::to_string),
            prerequisites,
            env_written,
            transport: remote.transport().clone(),
            built,
            committed,
            deploy,
        })
    }

    fn validate(&self, config: &DeploymentConfig, git: &Git<'_>) -> ShipitResult<ProjectContext> {
        let reporter = self.services.reporter;
        let root = config.project_root.as_path();
        let context = discover_project_context(root);

        if let Some(message) = &context.manifest_error {
            return Err(ShipitError::InvalidJson {
                file: root.join(super::discovery::MANIFEST_FILE),
                message: message.clone(),
            });
        }
        if !context.has_manifest() {
            return Err(ShipitError::MissingManifest {
                root: root.to_path_buf(),
            });
        }

        if !context.is_git_repo {
            if !config.auto_fix {
                return Err(ShipitError::NotARepository {
                    root: root.to_path_buf(),
                });
            }
            git.init()?;
            reporter.success("Initialized git repository");
        }

        if !config.auto_fix {
            DeployEngine::guard(&context)?;
            return Ok(context);
        }

        if let Some((old, new)) = apply_package_name_fix(root)? {
            reporter.success(&format!("Renamed package '{}' to '{}'", old, new));
        }
        if cleanup_linked_project(root)? {
            reporter.success("Removed incomplete .vercel link (it will be recreated)");
        }
        if context.has_placeholder_build() && remove_placeholder_build_command(root)? {
            reporter.success("Removed placeholder buildCommand from vercel.json");
        }
        if ensure_provider_config(root)? {
            reporter.success("Wrote minimal vercel.json");
        }

        let context = discover_project_context(root);
        DeployEngine::guard(&context)?;
        Ok(context)
    }

    fn check_prerequisites(&self, config: &DeploymentConfig) -> ShipitResult<PrerequisiteSummary> {
        let reporter = self.services.reporter;
        let mut checker = PrerequisiteChecker::new(self.services, &config.project_root);
        if let Some(dir) = &self.ssh_dir {
            checker = checker.with_ssh_dir(dir.clone());
        }

        let summary = checker.run(config.auto_fix);
        for issue in summary.issues() {
            if issue.is_critical() {
                reporter.error(&format!("{}: {}", issue.name, issue.message));
            } else {
                reporter.warning(&format!("{}: {}", issue.name, issue.message));
            }
        }
        for fix in summary.failed_fixes() {
            if let FixOutcome::Failed { name, error } = fix {
                reporter.warning(&format!("Could not fix {}: {}", name, error));
            }
        }

        if summary.critical_passed() {
            Ok(summary)
        } else {
            Err(ShipitError::MissingPrerequisites {
                names: summary.failed_critical_names(),
            })
        }
    }

    fn connect(&self, config: &DeploymentConfig, git: &Git<'_>) -> ShipitResult<VerifiedRemote> {
        let reporter = self.services.reporter;
        let ssh = self.ssh();

        if config.force_ssh_setup {
            ssh.setup_wizard(Some(git));
        }

        let reason = match ssh.verify() {
            Ok(remote) => {
                reporter.success("SSH connection to code host verified");
                return Ok(remote);
            }
            Err(reason) => reason,
        };
        reporter.warning(&format!("SSH unavailable: {}", reason));

        if let Some(token) = resolve_value(self.services, git.root(), "GITHUB_TOKEN") {
            if let Some(remote) = git.verify_https_token(&token) {
                reporter.success("Using GITHUB_TOKEN over HTTPS");
                return Ok(remote);
            }
            reporter.warning("GITHUB_TOKEN was rejected by the code host");
        }

        Err(ShipitError::SshSetupRequired { reason })
    }

    fn build(&self, context: &ProjectContext, command: &str) -> ShipitResult<()> {
        let spec = CommandSpec::shell(command).cwd(&context.root);
        let output = self.services.runner.stream(&spec)?;
        if output.success() {
            self.services.reporter.success("Build succeeded");
            Ok(())
        } else {
            Err(ShipitError::BuildFailed {
                command: command.to_string(),
                code: output.code,
            })
        }
    }

    fn commit_message(&self, config: &DeploymentConfig, started_at: DateTime<Local>) -> ShipitResult<String> {
        if let Some(message) = &config.commit_message {
            return Ok(message.clone());
        }
        let default = format!("Deploy {}", started_at.format("%Y-%m-%d %H:%M"));
        let message = self
            .services
            .prompter
            .input("Commit message", Some(&default))?
            .unwrap_or(default);
        Ok(message)
    }
}
