//! Deploy command: runs the orchestrator and prints the summary.

use std::path::PathBuf;

use anyhow::Result;

use super::{GlobalArgs, Session};
use crate::application::{Git, Orchestrator, RunReport, SshManager};
use crate::domain::entities::DeploymentConfig;
use crate::error::ShipitError;
use crate::ui::blocks::run_summary::render_run_summary;
use crate::ui::primitives::icon::Icon;

#[derive(Debug, Clone)]
pub struct DeployArgs {
    pub path: PathBuf,
    pub prod: bool,
    pub message: Option<String>,
    pub skip_checks: bool,
    pub no_fix: bool,
    pub ssh_setup: bool,
}

impl DeployArgs {
    /// Defaults for the current directory.
    pub fn here() -> Self {
        Self {
            path: PathBuf::from("."),
            prod: false,
            message: None,
            skip_checks: false,
            no_fix: false,
            ssh_setup: false,
        }
    }

    pub fn deployment_config(&self, root: PathBuf) -> DeploymentConfig {
        let mut config = DeploymentConfig::new(root).production(self.prod);
        config.commit_message = self.message.clone();
        config.skip_checks = self.skip_checks;
        config.auto_fix = !self.no_fix;
        config.force_ssh_setup = self.ssh_setup;
        config
    }
}

pub fn cmd_deploy(args: &DeployArgs, globals: GlobalArgs) -> Result<()> {
    let session = Session::open(&args.path, globals)?;
    let ui = session.ui;
    let config = args.deployment_config(session.root.clone());

    println!(
        "{} Shipit deploy ({})",
        Icon::Deploy.colored(ui.color, ui.unicode),
        if config.is_production() {
            "production"
        } else {
            "preview"
        }
    );
    println!("Project: {}", session.root.display());

    let report = run_with_ssh_recovery(&session, &config)?;
    println!();
    print!(
        "{}",
        render_run_summary(&report, config.is_production(), ui.color, ui.unicode)
    );
    Ok(())
}

/// Run once; when SSH is the only blocker and an operator is present, offer
/// the wizard and retry a single time.
fn run_with_ssh_recovery(session: &Session, config: &DeploymentConfig) -> Result<RunReport> {
    let services = session.services();
    let orchestrator = Orchestrator::new(services);

    let err = match orchestrator.run(config) {
        Ok(report) => return Ok(report),
        Err(err) => err,
    };
    if !err.is_ssh_setup_required() || !session.ui.interactive {
        return Err(err.into());
    }

    let run_wizard = session
        .prompter()
        .confirm("Run the SSH setup wizard now?", true)?;
    if !run_wizard {
        return Err(err.into());
    }

    let git = Git::new(services, &config.project_root);
    let repo = git.is_repository().then_some(&git);
    if !SshManager::for_home(services).setup_wizard(repo) {
        return Err(ShipitError::Aborted.into());
    }

    tracing::info!("retrying run after SSH setup");
    Ok(orchestrator.run(config)?)
}
