//! Version-control operations
//!
//! Thin wrappers over the `git` CLI. Pushing needs a `VerifiedRemote`, so
//! no push can happen before connectivity was checked in the same run.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::ssh::{SshManager, Transport, VerifiedRemote};
use super::Services;
use crate::domain::ports::{CommandOutput, CommandSpec};
use crate::error::{ShipitError, ShipitResult};

static HTTPS_REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://(?:[^@/]+@)?([^/]+)/([^/]+)/([^/]+?)(?:\.git)?/?$").expect("valid regex")
});

/// Rewrite `https://<host>/<owner>/<repo>[.git]` to `git@<host>:<owner>/<repo>.git`.
///
/// Returns `None` for URLs that are already SSH or point at another host.
pub fn https_to_ssh(url: &str, host: &str) -> Option<String> {
    let caps = HTTPS_REMOTE.captures(url.trim())?;
    if &caps[1] != host {
        return None;
    }
    Some(format!("git@{}:{}/{}.git", host, &caps[2], &caps[3]))
}

/// `-c` overrides that route SSH and HTTPS remote URLs through a token.
pub fn token_url_overrides(host: &str, token: &str) -> Vec<String> {
    let base = format!("url.https://x-access-token:{}@{}/.insteadOf", token, host);
    vec![
        "-c".to_string(),
        format!("{}=git@{}:", base, host),
        "-c".to_string(),
        format!("{}=https://{}/", base, host),
    ]
}

pub struct Git<'a> {
    services: Services<'a>,
    root: PathBuf,
}

impl<'a> Git<'a> {
    pub fn new(services: Services<'a>, root: &Path) -> Self {
        Self {
            services,
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn spec(&self) -> CommandSpec {
        CommandSpec::new("git").cwd(&self.root)
    }

    fn capture(&self, args: &[&str]) -> ShipitResult<CommandOutput> {
        self.services.runner.capture(&self.spec().args(args.iter().copied()))
    }

    fn stream_checked(&self, spec: CommandSpec) -> ShipitResult<()> {
        let output = self.services.runner.stream(&spec)?;
        if output.success() {
            Ok(())
        } else {
            Err(ShipitError::CommandFailed {
                command: spec.display(),
                code: output.code,
            })
        }
    }

    pub fn is_repository(&self) -> bool {
        self.root.join(".git").exists()
    }

    pub fn init(&self) -> ShipitResult<()> {
        self.stream_checked(self.spec().arg("init"))
    }

    /// True when `git status --porcelain` reports anything.
    pub fn has_pending_changes(&self) -> ShipitResult<bool> {
        let output = self.capture(&["status", "--porcelain"])?;
        if !output.success() {
            return Err(ShipitError::CommandFailed {
                command: "git status --porcelain".to_string(),
                code: output.code,
            });
        }
        Ok(!output.stdout.trim().is_empty())
    }

    pub fn remote_url(&self) -> Option<String> {
        let remote = self.services.config.git.remote.as_str();
        self.capture(&["remote", "get-url", remote])
            .ok()
            .filter(CommandOutput::success)
            .map(|o| o.stdout.trim().to_string())
            .filter(|url| !url.is_empty())
    }

    /// Point an HTTPS remote at its SSH form. Returns the new URL if changed.
    pub fn rewrite_remote_to_ssh(&self) -> ShipitResult<Option<String>> {
        let Some(url) = self.remote_url() else {
            return Ok(None);
        };
        let Some(ssh_url) = https_to_ssh(&url, &self.services.config.git.host) else {
            return Ok(None);
        };
        let remote = self.services.config.git.remote.as_str();
        self.stream_checked(self.spec().args(["remote", "set-url", remote, ssh_url.as_str()]))?;
        tracing::info!(from = %url, to = %ssh_url, "rewrote remote to ssh");
        Ok(Some(ssh_url))
    }

    /// Check a token-authenticated HTTPS route to the remote.
    pub fn verify_https_token(&self, token: &str) -> Option<VerifiedRemote> {
        let remote = self.services.config.git.remote.as_str();
        let spec = self
            .spec()
            .args(token_url_overrides(&self.services.config.git.host, token))
            .args(["ls-remote", "--exit-code", remote, "HEAD"]);
        match self.services.runner.capture(&spec) {
            Ok(output) if output.success() => Some(VerifiedRemote::https_token(token)),
            Ok(output) => {
                tracing::debug!(code = ?output.code, "https token probe failed");
                None
            }
            Err(e) => {
                tracing::debug!(error = %e, "https token probe failed");
                None
            }
        }
    }

    /// Stage, commit and push everything, checking SSH connectivity first.
    ///
    /// Fails with `SshSetupRequired` before touching the index when the
    /// code host cannot be reached.
    pub fn stage_commit_push(&self, message: &str) -> ShipitResult<()> {
        let ssh = SshManager::for_home(self.services);
        let verified = ssh
            .verify()
            .map_err(|reason| ShipitError::SshSetupRequired { reason })?;
        self.commit_and_push(message, &verified)
    }

    pub fn commit_and_push(&self, message: &str, via: &VerifiedRemote) -> ShipitResult<()> {
        let reporter = self.services.reporter;

        self.stream_checked(self.spec().args(["add", "-A"]))
            .inspect_err(|_| reporter.error("Staging failed. Check file permissions and .gitignore."))?;

        if let Ok(status) = self.capture(&["status", "--short"]) {
            for line in status.stdout.lines().take(20) {
                reporter.info(&format!("  {}", line));
            }
        }

        self.stream_checked(self.spec().args(["commit", "-m", message]))
            .inspect_err(|_| {
                reporter.error("Commit failed. Is user.name/user.email configured?");
            })?;

        let remote = self.services.config.git.remote.as_str();
        let mut push = self.spec();
        if let Transport::HttpsToken { token } = via.transport() {
            push = push.args(token_url_overrides(&self.services.config.git.host, token));
        }
        let push = push.args(["push", "-u", remote, "HEAD"]);

        self.stream_checked(push).inspect_err(|_| {
            reporter.error("Push failed. Check remote access and whether the branch is behind.");
        })?;

        reporter.success("Changes pushed");
        Ok(())
    }
}
