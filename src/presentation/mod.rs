//! Presentation Layer
//!
//! CLI argument parsing (via clap). Rendering lives in `crate::ui`; the
//! handlers that wire arguments to application services live in
//! `crate::commands`.

pub mod cli;

pub use cli::{Cli, ColorWhen, Commands};
