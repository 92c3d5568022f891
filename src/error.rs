//! Error types for Shipit
//!
//! Library code returns `ShipitError`; command handlers wrap it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Shipit operations
pub type ShipitResult<T> = Result<T, ShipitError>;

/// Sentinel prefix carried by the SSH precondition error.
///
/// Callers that only see the rendered message (e.g. through `anyhow`) can
/// still branch into the SSH wizard by matching on it.
pub const SSH_SETUP_REQUIRED: &str = "SSH_SETUP_REQUIRED";

/// Main error type for Shipit operations
#[derive(Error, Debug)]
pub enum ShipitError {
    /// Write target resolves outside the project root
    #[error("path '{path}' resolves outside project root '{root}'")]
    OutOfRoot { path: PathBuf, root: PathBuf },

    /// Code-host connectivity has not been established
    #[error("SSH_SETUP_REQUIRED: {reason}")]
    SshSetupRequired { reason: String },

    /// No package.json at the project root
    #[error("no package.json found in {root} - not a recognized project type")]
    MissingManifest { root: PathBuf },

    /// Project root is not a git repository
    #[error("{root} is not a git repository (run `git init` or re-run with auto-fix)")]
    NotARepository { root: PathBuf },

    /// Critical prerequisites are unmet
    #[error("missing critical prerequisites: {}", names.join(", "))]
    MissingPrerequisites { names: Vec<String> },

    /// A required value was not supplied and no operator is available
    #[error("required value '{name}' was not provided")]
    MissingRequiredInput { name: String },

    /// An external command could not be started
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// An external command exited unsuccessfully
    #[error("'{command}' failed with {}", describe_exit(*code))]
    CommandFailed { command: String, code: Option<i32> },

    /// An external command exceeded its timeout and was killed
    #[error("'{command}' timed out after {seconds}s")]
    TimedOut { command: String, seconds: u64 },

    /// The project's build step failed
    #[error("build failed: '{command}' exited with {}", describe_exit(*code))]
    BuildFailed { command: String, code: Option<i32> },

    /// Full-stack framework configured with a no-op build command
    #[error(
        "{framework} project has placeholder build command '{command}'; \
         remove `buildCommand` from vercel.json or set it to `next build`"
    )]
    PlaceholderBuildCommand { framework: String, command: String },

    /// Every deploy strategy failed
    #[error("deployment failed after {attempts} strategies")]
    DeployExhausted { attempts: usize },

    /// Manifest or provider config could not be parsed
    #[error("invalid JSON in {file}: {message}")]
    InvalidJson { file: PathBuf, message: String },

    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Interactive prompt failed (closed stdin, terminal error)
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// Run was cancelled by the operator
    #[error("aborted by user")]
    Aborted,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl ShipitError {
    /// Precondition errors signal a remediation path rather than a generic failure.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ShipitError::SshSetupRequired { .. }
                | ShipitError::MissingManifest { .. }
                | ShipitError::NotARepository { .. }
        )
    }

    pub fn is_ssh_setup_required(&self) -> bool {
        matches!(self, ShipitError::SshSetupRequired { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssh_setup_required_message_starts_with_sentinel() {
        let err = ShipitError::SshSetupRequired {
            reason: "no identities loaded".to_string(),
        };
        assert!(err.to_string().starts_with(SSH_SETUP_REQUIRED));
        assert!(err.is_precondition());
    }

    #[test]
    fn command_failed_display_includes_exit_code() {
        let err = ShipitError::CommandFailed {
            command: "git push".to_string(),
            code: Some(128),
        };
        assert_eq!(err.to_string(), "'git push' failed with exit code 128");
    }

    #[test]
    fn signal_termination_is_described() {
        let err = ShipitError::BuildFailed {
            command: "npm run build".to_string(),
            code: None,
        };
        assert!(err.to_string().contains("terminated by signal"));
        assert!(!err.is_precondition());
    }

    #[test]
    fn missing_prerequisites_joins_names() {
        let err = ShipitError::MissingPrerequisites {
            names: vec!["node".to_string(), "git".to_string()],
        };
        assert_eq!(err.to_string(), "missing critical prerequisites: node, git");
    }
}
