//! Deployment configuration supplied by the caller

use std::path::PathBuf;

/// Vercel deployment target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeployTarget {
    #[default]
    Preview,
    Production,
}

/// Read-only options for one orchestrated run.
#[derive(Debug, Clone)]
pub struct DeploymentConfig {
    pub project_root: PathBuf,
    pub skip_checks: bool,
    pub auto_fix: bool,
    /// `None` means the orchestrator asks the operator for one.
    pub commit_message: Option<String>,
    pub force_ssh_setup: bool,
    pub target: DeployTarget,
}

impl DeploymentConfig {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            skip_checks: false,
            auto_fix: true,
            commit_message: None,
            force_ssh_setup: false,
            target: DeployTarget::Preview,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.commit_message = Some(message.into());
        self
    }

    pub fn production(mut self, production: bool) -> Self {
        self.target = if production {
            DeployTarget::Production
        } else {
            DeployTarget::Preview
        };
        self
    }

    pub fn is_production(&self) -> bool {
        self.target == DeployTarget::Production
    }
}
