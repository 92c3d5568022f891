//! Prerequisite Checker
//!
//! Runs a fixed, ordered list of host checks. Remediation is opt-in and runs
//! sequentially after all checks; a failed fix is recorded, never raised.

use std::path::{Path, PathBuf};

use super::env_vars::resolve_value;
use super::git::Git;
use super::ssh::SshManager;
use super::Services;
use crate::domain::entities::{Criticality, FixOutcome, PrerequisiteResult, PrerequisiteSummary};
use crate::domain::ports::CommandSpec;
use crate::error::{ShipitError, ShipitResult};

pub const NODE: &str = "node";
pub const NPM: &str = "npm";
pub const GIT: &str = "git";
pub const GIT_REPOSITORY: &str = "git repository";
pub const PROVIDER_CLI: &str = "vercel cli";
pub const PROVIDER_AUTH: &str = "vercel auth";
pub const CODE_HOST_SSH: &str = "github ssh";

/// Automated remediation attached to a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fix {
    GitInit,
    InstallProviderCli,
    QuickSsh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Check {
    Node,
    Npm,
    Git,
    Repository,
    ProviderCli,
    ProviderAuth,
    CodeHostSsh,
}

const CHECKS: [Check; 7] = [
    Check::Node,
    Check::Npm,
    Check::Git,
    Check::Repository,
    Check::ProviderCli,
    Check::ProviderAuth,
    Check::CodeHostSsh,
];

impl Check {
    fn name(self) -> &'static str {
        match self {
            Check::Node => NODE,
            Check::Npm => NPM,
            Check::Git => GIT,
            Check::Repository => GIT_REPOSITORY,
            Check::ProviderCli => PROVIDER_CLI,
            Check::ProviderAuth => PROVIDER_AUTH,
            Check::CodeHostSsh => CODE_HOST_SSH,
        }
    }

    fn fix(self) -> Option<Fix> {
        match self {
            Check::Repository => Some(Fix::GitInit),
            Check::ProviderCli => Some(Fix::InstallProviderCli),
            Check::CodeHostSsh => Some(Fix::QuickSsh),
            _ => None,
        }
    }
}

/// Major version from `node --version` style output (`v20.11.0` → 20).
pub fn parse_major_version(output: &str) -> Option<u32> {
    output
        .trim()
        .trim_start_matches('v')
        .split('.')
        .next()?
        .parse()
        .ok()
}

pub struct PrerequisiteChecker<'a> {
    services: Services<'a>,
    root: PathBuf,
    ssh_dir: Option<PathBuf>,
}

impl<'a> PrerequisiteChecker<'a> {
    pub fn new(services: Services<'a>, root: &Path) -> Self {
        Self {
            services,
            root: root.to_path_buf(),
            ssh_dir: None,
        }
    }

    /// Use `dir` instead of `~/.ssh` for key lookups.
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

    /// Run every check; apply fixes for failures when `auto_fix` is set.
    pub fn run(&self, auto_fix: bool) -> PrerequisiteSummary {
        let mut summary = PrerequisiteSummary {
            results: CHECKS.iter().map(|&check| self.evaluate(check)).collect(),
            fixes: Vec::new(),
        };

        if auto_fix {
            for (index, &check) in CHECKS.iter().enumerate() {
                let Some(fix) = check.fix() else {
                    continue;
                };
                if summary.results[index].passed {
                    continue;
                }
                let outcome = match self.apply(fix) {
                    Ok(()) => FixOutcome::Fixed {
                        name: check.name().to_string(),
                    },
                    Err(e) => FixOutcome::Failed {
                        name: check.name().to_string(),
                        error: e.to_string(),
                    },
                };
                tracing::info!(check = check.name(), fixed = outcome.is_fixed(), "remediation");
                if outcome.is_fixed() {
                    summary.results[index] = self.evaluate(check);
                }
                summary.fixes.push(outcome);
            }
        }

        summary
    }

    fn evaluate(&self, check: Check) -> PrerequisiteResult {
        match check {
            Check::Node => self.check_node(),
            Check::Npm => self.check_npm(),
            Check::Git => self.check_git(),
            Check::Repository => self.check_repository(),
            Check::ProviderCli => self.check_provider_cli(),
            Check::ProviderAuth => self.check_provider_auth(),
            Check::CodeHostSsh => self.check_code_host_ssh(),
        }
    }

    fn apply(&self, fix: Fix) -> ShipitResult<()> {
        match fix {
            Fix::GitInit => Git::new(self.services, &self.root).init(),
            Fix::InstallProviderCli => {
                let package = self.services.config.deploy.cli.as_str();
                let spec = CommandSpec::new(NPM).args(["install", "-g", package]);
                let output = self.services.runner.stream(&spec)?;
                if output.success() {
                    Ok(())
                } else {
                    Err(ShipitError::CommandFailed {
                        command: spec.display(),
                        code: output.code,
                    })
                }
            }
            Fix::QuickSsh => {
                if self.ssh().quick_fix() {
                    Ok(())
                } else {
                    Err(ShipitError::SshSetupRequired {
                        reason: "quick fix could not reach the code host".to_string(),
                    })
                }
            }
        }
    }

    fn version_of(&self, program: &str) -> Option<String> {
        self.services
            .runner
            .capture(&CommandSpec::new(program).arg("--version"))
            .ok()
            .filter(|o| o.success())
            .map(|o| o.stdout.trim().to_string())
    }

    fn check_node(&self) -> PrerequisiteResult {
        let min = self.services.config.runtime.min_node_major;
        let install = ["Install Node.js LTS from https://nodejs.org", "Or use nvm: nvm install --lts"];
        match self.version_of(NODE) {
            None => PrerequisiteResult::fail(NODE, Criticality::Critical, "not installed", &install),
            Some(version) => match parse_major_version(&version) {
                Some(major) if major >= min => {
                    PrerequisiteResult::pass(NODE, Criticality::Critical, version)
                }
                _ => PrerequisiteResult::fail(
                    NODE,
                    Criticality::Critical,
                    format!("{} is older than v{}", version, min),
                    &install,
                ),
            },
        }
    }

    fn check_npm(&self) -> PrerequisiteResult {
        match self.version_of(NPM) {
            Some(version) => PrerequisiteResult::pass(NPM, Criticality::Critical, version),
            None => PrerequisiteResult::fail(
                NPM,
                Criticality::Critical,
                "not installed",
                &["npm ships with Node.js; reinstall Node.js"],
            ),
        }
    }

    fn check_git(&self) -> PrerequisiteResult {
        match self.version_of(GIT) {
            Some(version) => PrerequisiteResult::pass(GIT, Criticality::Critical, version),
            None => PrerequisiteResult::fail(
                GIT,
                Criticality::Critical,
                "not installed",
                &["Install git from https://git-scm.com/downloads"],
            ),
        }
    }

    fn check_repository(&self) -> PrerequisiteResult {
        if Git::new(self.services, &self.root).is_repository() {
            PrerequisiteResult::pass(GIT_REPOSITORY, Criticality::Critical, "found .git")
        } else {
            PrerequisiteResult::fail(
                GIT_REPOSITORY,
                Criticality::Critical,
                "not a git repository",
                &["git init", "git remote add origin git@github.com:<owner>/<repo>.git"],
            )
        }
    }

    fn check_provider_cli(&self) -> PrerequisiteResult {
        let cli = self.services.config.deploy.cli.as_str();
        if self.services.runner.is_installed(cli) {
            PrerequisiteResult::pass(PROVIDER_CLI, Criticality::Advisory, "installed")
        } else {
            PrerequisiteResult::fail(
                PROVIDER_CLI,
                Criticality::Advisory,
                "not installed globally (npx fallback will be used)",
                &["npm install -g vercel"],
            )
        }
    }

    fn check_provider_auth(&self) -> PrerequisiteResult {
        if resolve_value(self.services, &self.root, "VERCEL_TOKEN").is_some() {
            return PrerequisiteResult::pass(PROVIDER_AUTH, Criticality::Advisory, "VERCEL_TOKEN set");
        }

        let cli = self.services.config.deploy.cli.as_str();
        let whoami = self
            .services
            .runner
            .capture(&CommandSpec::new(cli).arg("whoami").cwd(&self.root));
        match whoami {
            Ok(output) if output.success() => PrerequisiteResult::pass(
                PROVIDER_AUTH,
                Criticality::Advisory,
                format!("logged in as {}", output.stdout.trim()),
            ),
            _ => PrerequisiteResult::fail(
                PROVIDER_AUTH,
                Criticality::Advisory,
                "not logged in and no VERCEL_TOKEN",
                &["vercel login", "Or set VERCEL_TOKEN in .env.local"],
            ),
        }
    }

    fn check_code_host_ssh(&self) -> PrerequisiteResult {
        let status = self.ssh().check_connection();
        if status.ok {
            PrerequisiteResult::pass(CODE_HOST_SSH, Criticality::Advisory, status.message)
        } else {
            PrerequisiteResult::fail(
                CODE_HOST_SSH,
                Criticality::Advisory,
                status.message,
                &["shipit ssh", "Or set GITHUB_TOKEN for HTTPS push"],
            )
        }
    }
}
