//! Command handlers
//!
//! One handler per subcommand / menu action. Handlers return
//! `anyhow::Result` and share a `Session` that owns the concrete ports.

pub mod analyze;
pub mod deploy;
pub mod doctor;
pub mod fix;
pub mod help_topics;
pub mod interactive;
pub mod project_root;
pub mod scan;
pub mod ssh;

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::Services;
use crate::config::Config;
use crate::domain::ports::Prompter;
use crate::infrastructure::{DialoguerPrompter, SystemRunner, UnattendedPrompter};
use crate::presentation::ColorWhen;
use crate::ui::{ConsoleReporter, UiContext};

/// Flags shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalArgs {
    pub verbose: u8,
    pub color: Option<ColorWhen>,
    pub yes: bool,
}

/// Concrete ports and settings for one invocation.
pub struct Session {
    pub root: PathBuf,
    pub config: Config,
    pub ui: UiContext,
    runner: SystemRunner,
    reporter: ConsoleReporter,
    prompter: Box<dyn Prompter>,
}

impl Session {
    pub fn open(path: &Path, globals: GlobalArgs) -> Result<Self> {
        let start = project_root::absolute(path)?;
        let root = project_root::discover_project_root(&start);
        let config = Config::load_or_default(Some(&root));
        let ui = UiContext::new(globals.verbose, globals.color, globals.yes, &config);
        let prompter: Box<dyn Prompter> = if ui.interactive {
            Box::new(DialoguerPrompter)
        } else {
            Box::new(UnattendedPrompter)
        };
        tracing::debug!(root = %root.display(), interactive = ui.interactive, "session opened");

        Ok(Self {
            root,
            config,
            ui,
            runner: SystemRunner,
            reporter: ConsoleReporter::new(&ui),
            prompter,
        })
    }

    pub fn services(&self) -> Services<'_> {
        Services::new(&self.runner, self.prompter.as_ref(), &self.reporter, &self.config)
    }

    pub fn reporter(&self) -> &ConsoleReporter {
        &self.reporter
    }

    pub fn prompter(&self) -> &dyn Prompter {
        self.prompter.as_ref()
    }
}
