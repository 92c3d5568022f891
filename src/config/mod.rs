//! Configuration module for Shipit
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (SHIPIT_*)
//! 3. Project config (.shipit.toml)
//! 4. User config (~/.config/shipit/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{config_path, with_env_overrides, ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{ColorMode, Config, DeployConfig, GitConfig, OutputConfig, RuntimeConfig};
