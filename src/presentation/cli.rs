//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--color, --verbose, --yes) are inherited by all subcommands
//! - `shipit -p -m "msg"` without a subcommand is shorthand for `shipit deploy`
//! - No subcommand and no shorthand flags opens the interactive menu

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Shipit - guided commit, push and deploy for web projects
#[derive(Parser, Debug)]
#[command(name = "shipit")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'shipit' without arguments for the interactive menu.")]
pub struct Cli {
    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Never prompt; take defaults and fail on missing required input
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Deploy to production (shorthand for `shipit deploy --prod`)
    #[arg(short, long)]
    pub prod: bool,

    /// Commit message (shorthand for `shipit deploy -m`)
    #[arg(short, long)]
    pub message: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Top-level deploy shorthand was used.
    pub fn wants_direct_deploy(&self) -> bool {
        self.prod || self.message.is_some()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build, commit, push and deploy the project
    Deploy {
        /// Project root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Deploy to production instead of a preview
        #[arg(short, long)]
        prod: bool,

        /// Commit message (prompted when omitted)
        #[arg(short, long)]
        message: Option<String>,

        /// Skip prerequisite and environment checks
        #[arg(long)]
        skip_checks: bool,

        /// Do not repair the project automatically
        #[arg(long)]
        no_fix: bool,

        /// Run the SSH setup wizard before connecting
        #[arg(long)]
        ssh_setup: bool,
    },

    /// Show what Shipit detects about the project
    Analyze {
        /// Project root
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Repair common deployment problems
    Fix {
        /// Project root
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Find files that resolve outside the project
    Scan {
        /// Project root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Copy misplaced files into the project root
        #[arg(long)]
        fix: bool,
    },

    /// Set up SSH access to the code host
    Ssh {
        /// Non-interactive repair of an existing setup
        #[arg(long)]
        quick: bool,
    },

    /// Diagnose prerequisites, environment and configuration
    Doctor {
        /// Project root
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Print the troubleshooting guide
    HelpTopics,
}
