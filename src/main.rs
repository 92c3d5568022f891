//! Shipit CLI - guided commit, push and deploy
//!
//! Usage: shipit [-p] [-m <message>] [COMMAND]
//!
//! Commands:
//!   deploy       Build, commit, push and deploy
//!   analyze      Show what Shipit detects about the project
//!   fix          Repair common deployment problems
//!   scan         Find files that resolve outside the project
//!   ssh          Set up SSH access to the code host
//!   doctor       Diagnose prerequisites and configuration
//!   help-topics  Print the troubleshooting guide

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use shipit::commands::deploy::DeployArgs;
use shipit::commands::{self, GlobalArgs};
use shipit::presentation::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    shipit::logging::init_tracing(cli.verbose);
    install_panic_hook();
    install_interrupt_handler();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let globals = GlobalArgs {
        verbose: cli.verbose,
        color: cli.color,
        yes: cli.yes,
    };

    let command = match cli.command {
        Some(command) => command,
        None if cli.wants_direct_deploy() => {
            let args = DeployArgs {
                prod: cli.prod,
                message: cli.message,
                ..DeployArgs::here()
            };
            return commands::deploy::cmd_deploy(&args, globals);
        }
        None => {
            let cwd = std::env::current_dir()?;
            return commands::interactive::cmd_interactive(&cwd, globals);
        }
    };

    match command {
        Commands::Deploy {
            path,
            prod,
            message,
            skip_checks,
            no_fix,
            ssh_setup,
        } => {
            let args = DeployArgs {
                path,
                prod,
                message,
                skip_checks,
                no_fix,
                ssh_setup,
            };
            commands::deploy::cmd_deploy(&args, globals)
        }
        Commands::Analyze { path } => commands::analyze::cmd_analyze(&path, globals),
        Commands::Fix { path } => commands::fix::cmd_fix(&path, globals),
        Commands::Scan { path, fix } => commands::scan::cmd_scan(&path, fix, globals),
        Commands::Ssh { quick } => commands::ssh::cmd_ssh(quick, globals),
        Commands::Doctor { path } => commands::doctor::cmd_doctor(&path, globals),
        Commands::HelpTopics => commands::help_topics::cmd_help_topics(),
    }
}

/// Unexpected panics point at the diagnostics command and exit non-zero.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        default_hook(info);
        eprintln!("\nShipit hit an unexpected error. Run `shipit doctor` to check your setup.");
        std::process::exit(1);
    }));
}

/// Ctrl+C exits with the conventional interrupted status.
fn install_interrupt_handler() {
    let result = ctrlc::set_handler(|| {
        eprintln!("\nInterrupted.");
        std::process::exit(130);
    });
    if let Err(e) = result {
        tracing::debug!(error = %e, "could not install Ctrl+C handler");
    }
}
