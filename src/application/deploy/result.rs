//! Deploy Result
//!
//! Result types for deploy operations.

/// One strategy that was actually run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    pub strategy: &'static str,
    pub command: String,
    pub succeeded: bool,
    /// Exit code, spawn error or timeout
    pub detail: String,
}

/// A successful deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    /// Name of the strategy that succeeded
    pub strategy: &'static str,
    /// Deployment URL, when the provider output was captured
    pub url: Option<String>,
    pub attempts: Vec<AttemptRecord>,
}
