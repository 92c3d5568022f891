//! Domain Value Objects
//!
//! Immutable, self-validating types with no dependency on process state.

pub mod framework;
pub mod package_name;
pub mod safe_path;
pub mod strategy;

pub use framework::Framework;
pub use package_name::{fix_package_name, is_valid_package_name};
pub use safe_path::{normalize, resolve_safe_path};
pub use strategy::DeploymentStrategy;
