//! Deploy Options
//!
//! Everything a strategy needs to build its command, resolved up front so the
//! strategies themselves stay pure.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::entities::DeployTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOptions {
    pub project_root: PathBuf,
    /// Provider CLI binary (`vercel`)
    pub cli: String,
    /// Package runner for the CLI (`npx`)
    pub runner: String,
    /// Provider API token, when configured
    pub token: Option<String>,
    pub target: DeployTarget,
    /// Limit for the low-level invocation
    pub timeout: Duration,
}

impl DeployOptions {
    pub fn is_production(&self) -> bool {
        self.target == DeployTarget::Production
    }

    /// Flags shared by every strategy.
    pub fn base_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        if self.is_production() {
            flags.push("--prod".to_string());
        }
        flags.push("--yes".to_string());
        flags
    }

    pub fn token_flags(&self) -> Vec<String> {
        match &self.token {
            Some(token) => vec!["--token".to_string(), token.clone()],
            None => Vec::new(),
        }
    }
}
