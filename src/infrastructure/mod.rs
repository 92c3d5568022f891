//! Infrastructure Layer
//!
//! Concrete implementations of domain ports plus filesystem helpers.

pub mod env_file;
pub mod fs;
pub mod process;
pub mod prompt;

pub use fs::write_safe_file;
pub use process::SystemRunner;
pub use prompt::{DialoguerPrompter, UnattendedPrompter};
