//! Interactive menu shown when `shipit` runs without a command.

use std::path::Path;

use anyhow::Result;
use dialoguer::{Confirm, Select};
use is_terminal::IsTerminal;

use super::deploy::DeployArgs;
use super::{analyze, deploy, doctor, fix, help_topics, scan, ssh, GlobalArgs};
use crate::application::classify_error;
use crate::ui::primitives::icon::Icon;
use crate::ui::UiContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Analyze,
    Deploy,
    Fix,
    Scan,
    SshWizard,
    Diagnostics,
    Help,
    Exit,
}

pub const MENU: &[(&str, MenuAction)] = &[
    ("[1] Analyze project", MenuAction::Analyze),
    ("[2] Full deploy (build, commit, push, deploy)", MenuAction::Deploy),
    ("[3] Fix deployment issues", MenuAction::Fix),
    ("[4] Scan for misplaced files", MenuAction::Scan),
    ("[5] SSH setup wizard", MenuAction::SshWizard),
    ("[6] Diagnostics", MenuAction::Diagnostics),
    ("[7] Help", MenuAction::Help),
    ("[8] Exit", MenuAction::Exit),
];

pub fn cmd_interactive(cwd: &Path, globals: GlobalArgs) -> Result<()> {
    if !std::io::stdin().is_terminal() || globals.yes {
        println!("No command provided.");
        println!("Try: `shipit deploy` or `shipit --help`");
        return Ok(());
    }

    let config = crate::config::Config::load_or_default(Some(cwd));
    let ui = UiContext::new(globals.verbose, globals.color, globals.yes, &config);
    println!(
        "{} Shipit v{}\n",
        Icon::Deploy.colored(ui.color, ui.unicode),
        env!("CARGO_PKG_VERSION")
    );

    let items: Vec<&str> = MENU.iter().map(|(label, _)| *label).collect();
    loop {
        let selection = Select::new()
            .with_prompt("What would you like to do?")
            .items(&items)
            .default(0)
            .interact()?;
        let action = MENU[selection].1;
        if action == MenuAction::Exit {
            return Ok(());
        }

        // A failed action returns to the menu instead of ending the session.
        if let Err(e) = run_action(action, cwd, globals) {
            println!(
                "{} {} ({})",
                Icon::Error.colored(ui.color, ui.unicode),
                e,
                classify_error(&e.to_string()).label()
            );
        }
        println!();
    }
}

fn run_action(action: MenuAction, cwd: &Path, globals: GlobalArgs) -> Result<()> {
    match action {
        MenuAction::Analyze => analyze::cmd_analyze(cwd, globals),
        MenuAction::Deploy => {
            let prod = Confirm::new()
                .with_prompt("Deploy to production?")
                .default(false)
                .interact()?;
            let args = DeployArgs {
                path: cwd.to_path_buf(),
                prod,
                ..DeployArgs::here()
            };
            deploy::cmd_deploy(&args, globals)
        }
        MenuAction::Fix => fix::cmd_fix(cwd, globals),
        MenuAction::Scan => scan::cmd_scan(cwd, false, globals),
        MenuAction::SshWizard => ssh::cmd_ssh(false, globals),
        MenuAction::Diagnostics => doctor::cmd_doctor(cwd, globals),
        MenuAction::Help => help_topics::cmd_help_topics(),
        MenuAction::Exit => Ok(()),
    }
}
