//! Domain Entities
//!
//! Records created at the start of an invocation and dropped at exit.

pub mod deployment_config;
pub mod env_spec;
pub mod prerequisite;
pub mod project_context;

pub use deployment_config::{DeployTarget, DeploymentConfig};
pub use env_spec::{find_spec, EnvironmentVariableSpec, ENV_CATALOG};
pub use prerequisite::{Criticality, FixOutcome, PrerequisiteResult, PrerequisiteSummary};
pub use project_context::{
    is_placeholder_build_command, Manifest, ProjectContext, PLACEHOLDER_BUILD_COMMAND,
};
