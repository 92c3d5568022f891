//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ShipitResult;

use super::loader::{self, ConfigWarning};

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            unicode: true,
        }
    }
}

/// Hosting provider invocation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Provider CLI binary
    #[serde(default = "default_cli")]
    pub cli: String,

    /// Package runner used when the CLI is not installed globally
    #[serde(default = "default_runner")]
    pub runner: String,

    /// Timeout for the low-level (last resort) deploy invocation
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            cli: default_cli(),
            runner: default_runner(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Code host settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_host")]
    pub host: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            host: default_host(),
        }
    }
}

/// Runtime version requirements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_min_node_major")]
    pub min_node_major: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            min_node_major: default_min_node_major(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub deploy: DeployConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub runtime: RuntimeConfig,
}

impl Config {
    /// Load configuration from a TOML file, ignoring unknown keys.
    pub fn load(path: &Path) -> ShipitResult<Self> {
        loader::load_with_warnings(path).map(|(config, _)| config)
    }

    /// Load configuration and collect unknown-key warnings.
    pub fn load_with_warnings(path: &Path) -> ShipitResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Project config, then user config, then defaults; env overrides on top.
    pub fn load_or_default(project_root: Option<&Path>) -> Self {
        loader::load_or_default(project_root)
    }
}

fn default_true() -> bool {
    true
}

fn default_cli() -> String {
    "vercel".to_string()
}

fn default_runner() -> String {
    "npx".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_host() -> String {
    "github.com".to_string()
}

fn default_min_node_major() -> u32 {
    18
}
