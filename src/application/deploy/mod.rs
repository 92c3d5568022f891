//! Deploy Strategy Engine
//!
//! Tries an ordered list of provider invocations and stops at the first
//! success.
//!
//! ## Structure
//!
//! - `options` - Per-run inputs (`DeployOptions`)
//! - `result` - Result types (`DeployOutcome`, `AttemptRecord`)
//! - `strategies` - The strategy table and the first-success combinator
//! - `use_case` - `DeployEngine`, which guards, runs and reports
//!
//! ## Usage
//!
//! ```ignore
//! use shipit::application::deploy::DeployEngine;
//!
//! let outcome = DeployEngine::new(services).deploy(&context, DeployTarget::Production)?;
//! ```

mod options;
mod result;
mod strategies;
mod use_case;

pub use options::DeployOptions;
pub use result::{AttemptRecord, DeployOutcome};
pub use strategies::{first_success, DeployStrategy, ExecMode, STRATEGIES};
pub use use_case::{DeployEngine, MANUAL_DEPLOY_STEPS};
