//! Shipit - guided commit, push and deploy assistant
//!
//! Shipit validates a web project, checks local prerequisites, makes sure the
//! code host is reachable, builds, commits and pushes, then deploys to Vercel
//! through an ordered list of fallback invocations.

pub mod application;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;
pub mod ui;

// Re-exports for convenience
pub use application::{Orchestrator, RunReport, Services};
pub use config::Config;
pub use domain::entities::{DeployTarget, DeploymentConfig};
pub use error::{ShipitError, ShipitResult};

/// Run the full pipeline with the real process runner and console output.
///
/// Prompts are shown only when stdin is a terminal; otherwise defaults are
/// taken and missing required input fails the run.
pub fn deploy(config: &DeploymentConfig) -> ShipitResult<RunReport> {
    use domain::ports::Prompter;
    use infrastructure::{DialoguerPrompter, SystemRunner, UnattendedPrompter};

    let settings = Config::load_or_default(Some(&config.project_root));
    let ctx = ui::UiContext::new(0, None, false, &settings);
    let reporter = ui::ConsoleReporter::new(&ctx);
    let prompter: &dyn Prompter = if ctx.interactive {
        &DialoguerPrompter
    } else {
        &UnattendedPrompter
    };

    Orchestrator::new(Services::new(&SystemRunner, prompter, &reporter, &settings)).run(config)
}
