//! SSH Connectivity Manager
//!
//! Checks and repairs key-based authentication to the code host. The wizard
//! never fails across steps: each failure degrades to printed manual steps.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::git::Git;
use super::Services;
use crate::domain::ports::CommandSpec;

/// Conventional private key names, most preferred first.
pub const KEY_CANDIDATES: &[&str] = &["id_ed25519", "id_ecdsa", "id_rsa"];

/// GitHub's probe answers with this and exits 1 even on success.
pub const SUCCESS_MARKER: &str = "successfully authenticated";

static AGENT_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(SSH_AUTH_SOCK|SSH_AGENT_PID)=([^;\s]+);").expect("valid regex")
});

/// How pushes reach the code host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Ssh,
    HttpsToken { token: String },
}

/// Proof that connectivity was verified earlier in this run.
///
/// Pushing requires one; only the verification paths construct it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedRemote {
    transport: Transport,
}

impl VerifiedRemote {
    pub(crate) fn ssh() -> Self {
        Self {
            transport: Transport::Ssh,
        }
    }

    pub(crate) fn https_token(token: impl Into<String>) -> Self {
        Self {
            transport: Transport::HttpsToken {
                token: token.into(),
            },
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }
}

/// Result of the connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub ok: bool,
    pub message: String,
}

pub struct SshManager<'a> {
    services: Services<'a>,
    ssh_dir: PathBuf,
}

impl<'a> SshManager<'a> {
    pub fn new(services: Services<'a>, ssh_dir: impl Into<PathBuf>) -> Self {
        Self {
            services,
            ssh_dir: ssh_dir.into(),
        }
    }

    /// Manager rooted at `~/.ssh`.
    pub fn for_home(services: Services<'a>) -> Self {
        let ssh_dir = dirs::home_dir()
            .map(|home| home.join(".ssh"))
            .unwrap_or_else(|| PathBuf::from(".ssh"));
        Self::new(services, ssh_dir)
    }

    pub fn ssh_dir(&self) -> &Path {
        &self.ssh_dir
    }

    pub fn existing_keys(&self) -> Vec<PathBuf> {
        KEY_CANDIDATES
            .iter()
            .map(|name| self.ssh_dir.join(name))
            .filter(|path| path.is_file())
            .collect()
    }

    pub fn check_key_exists(&self) -> bool {
        !self.existing_keys().is_empty()
    }

    /// True when `ssh-add -l` lists at least one identity.
    pub fn check_agent(&self) -> bool {
        match self.services.runner.capture(&CommandSpec::new("ssh-add").arg("-l")) {
            Ok(output) => {
                output.success()
                    && !output.stdout.trim().is_empty()
                    && !output.stdout.contains("no identities")
            }
            Err(e) => {
                tracing::debug!(error = %e, "ssh-add unavailable");
                false
            }
        }
    }

    /// Probe the code host. Success is judged on output text, not exit code.
    pub fn check_connection(&self) -> ConnectionStatus {
        let host = &self.services.config.git.host;
        let target = format!("git@{}", host);
        let spec = CommandSpec::new("ssh").args([
            "-T",
            "-o",
            "StrictHostKeyChecking=accept-new",
            "-o",
            "BatchMode=yes",
            "-o",
            "ConnectTimeout=10",
            target.as_str(),
        ]);

        let output = match self.services.runner.capture(&spec) {
            Ok(output) => output,
            Err(e) => {
                return ConnectionStatus {
                    ok: false,
                    message: format!("could not run ssh: {}", e),
                }
            }
        };

        let text = output.combined();
        if text.to_lowercase().contains(SUCCESS_MARKER) {
            let greeting = text
                .lines()
                .find(|l| l.to_lowercase().contains(SUCCESS_MARKER))
                .unwrap_or(SUCCESS_MARKER)
                .trim()
                .to_string();
            tracing::debug!(host, code = ?output.code, "ssh probe succeeded");
            return ConnectionStatus {
                ok: true,
                message: greeting,
            };
        }

        let message = if text.contains("Permission denied") {
            format!("{} rejected the key (is it added to your account?)", host)
        } else if text.contains("Could not resolve hostname") {
            format!("cannot resolve {}", host)
        } else {
            let detail = text.trim();
            if detail.is_empty() {
                format!("ssh exited with {:?}", output.code)
            } else {
                detail.lines().last().unwrap_or(detail).to_string()
            }
        };
        tracing::debug!(host, code = ?output.code, %message, "ssh probe failed");
        ConnectionStatus { ok: false, message }
    }

    /// Verify connectivity for a push in this run.
    pub fn verify(&self) -> Result<VerifiedRemote, String> {
        let status = self.check_connection();
        if status.ok {
            Ok(VerifiedRemote::ssh())
        } else {
            let agent = if self.check_agent() {
                "agent has identities"
            } else {
                "agent has no identities"
            };
            Err(format!("{}; {}", status.message, agent))
        }
    }

    /// Interactive setup: key, agent, registration, remote URL.
    pub fn setup_wizard(&self, repo: Option<&Git<'_>>) -> bool {
        let reporter = self.services.reporter;
        reporter.step("SSH setup");

        let has_key = self.check_key_exists();
        let has_agent = has_key && self.check_agent();
        let connection = self.check_connection();

        if has_key && has_agent && connection.ok {
            reporter.success(&format!("SSH already configured: {}", connection.message));
            self.ensure_ssh_remote(repo);
            return true;
        }

        self.report_check("SSH key", has_key, "no key in ~/.ssh");
        self.report_check("SSH agent", has_agent, "no identities loaded");
        self.report_check("GitHub connection", connection.ok, &connection.message);

        if !has_key && !self.generate_key() {
            return false;
        }

        self.ensure_agent();
        self.add_keys();

        if !self.check_connection().ok {
            self.show_public_key();
            if let Err(e) = self
                .services
                .prompter
                .pause("Press Enter after adding the key to GitHub")
            {
                tracing::debug!(error = %e, "pause failed");
            }

            let retry = self.check_connection();
            if !retry.ok {
                reporter.error(&format!("Still cannot authenticate: {}", retry.message));
                reporter.checklist(
                    "Troubleshooting:",
                    &[
                        "Confirm the key appears at https://github.com/settings/keys",
                        "Run `ssh -vT git@github.com` to see which key is offered",
                        "Run `shipit ssh` again once fixed",
                    ],
                );
                return false;
            }
        }

        reporter.success("Connected to GitHub over SSH");
        self.ensure_ssh_remote(repo);
        true
    }

    /// Non-interactive repair: start the agent, load keys, re-probe.
    pub fn quick_fix(&self) -> bool {
        let reporter = self.services.reporter;
        if !self.check_key_exists() {
            reporter.error("No SSH key found. Run `shipit ssh` for guided setup.");
            return false;
        }

        self.ensure_agent();
        self.add_keys();

        let status = self.check_connection();
        if status.ok {
            reporter.success(&format!("SSH fixed: {}", status.message));
        } else {
            reporter.warning(&format!("SSH still failing: {}", status.message));
        }
        status.ok
    }

    fn report_check(&self, name: &str, ok: bool, failure: &str) {
        if ok {
            self.services.reporter.success(name);
        } else {
            self.services
                .reporter
                .warning(&format!("{}: {}", name, failure));
        }
    }

    fn generate_key(&self) -> bool {
        let services = self.services;
        let manual = [
            "mkdir -p ~/.ssh",
            "ssh-keygen -t ed25519 -C \"you@example.com\"",
            "Run `shipit ssh` again",
        ];

        let generate = services
            .prompter
            .confirm("No SSH key found. Generate one now?", true)
            .unwrap_or(false);
        if !generate {
            services.reporter.checklist("Create a key manually:", &manual);
            return false;
        }

        let default_email = services
            .runner
            .capture(&CommandSpec::new("git").args(["config", "--get", "user.email"]))
            .ok()
            .filter(|o| o.success())
            .map(|o| o.stdout.trim().to_string())
            .filter(|s| !s.is_empty());

        let email = services
            .prompter
            .input("Email for the key label", default_email.as_deref())
            .ok()
            .flatten()
            .unwrap_or_else(|| "shipit".to_string());

        if let Err(e) = create_private_dir(&self.ssh_dir) {
            services.reporter.error(&format!(
                "Could not create {}: {}",
                self.ssh_dir.display(),
                e
            ));
            services.reporter.checklist("Create a key manually:", &manual);
            return false;
        }

        let key_path = self.ssh_dir.join(KEY_CANDIDATES[0]);
        let key_arg = key_path.to_string_lossy().into_owned();
        let spec = CommandSpec::new("ssh-keygen").args([
            "-t",
            "ed25519",
            "-C",
            email.as_str(),
            "-f",
            key_arg.as_str(),
            "-N",
            "",
        ]);

        match services.runner.stream(&spec) {
            Ok(output) if output.success() => {
                services
                    .reporter
                    .success(&format!("Generated {}", key_path.display()));
                true
            }
            Ok(output) => {
                services.reporter.error(&format!(
                    "ssh-keygen exited with {:?}",
                    output.code
                ));
                services.reporter.checklist("Create a key manually:", &manual);
                false
            }
            Err(e) => {
                services.reporter.error(&e.to_string());
                services.reporter.checklist("Create a key manually:", &manual);
                false
            }
        }
    }

    /// Start an agent when none is reachable and export its socket to this
    /// process so later ssh/git children can use it.
    fn ensure_agent(&self) {
        let probe = self
            .services
            .runner
            .capture(&CommandSpec::new("ssh-add").arg("-l"));
        // Exit code 2 means no agent could be contacted.
        let agent_running = matches!(probe, Ok(ref o) if o.code != Some(2));
        if agent_running {
            return;
        }

        match self
            .services
            .runner
            .capture(&CommandSpec::new("ssh-agent").arg("-s"))
        {
            Ok(output) if output.success() => {
                for (key, value) in parse_agent_env(&output.stdout) {
                    std::env::set_var(&key, &value);
                }
                tracing::debug!("started ssh-agent");
            }
            _ => {
                self.services.reporter.checklist(
                    "Start the agent manually:",
                    &["eval \"$(ssh-agent -s)\"", "ssh-add ~/.ssh/id_ed25519"],
                );
            }
        }
    }

    fn add_keys(&self) {
        for key in self.existing_keys() {
            let spec = CommandSpec::new("ssh-add").arg(key.to_string_lossy());
            match self.services.runner.stream(&spec) {
                Ok(output) if output.success() => {
                    tracing::debug!(key = %key.display(), "added key to agent");
                }
                Ok(_) | Err(_) => {
                    self.services
                        .reporter
                        .warning(&format!("Could not add {} to the agent", key.display()));
                }
            }
        }
    }

    fn show_public_key(&self) {
        let reporter = self.services.reporter;
        let public = self
            .existing_keys()
            .into_iter()
            .map(|k| PathBuf::from(format!("{}.pub", k.display())))
            .find_map(|p| std::fs::read_to_string(&p).ok());

        match public {
            Some(key) => {
                reporter.info("Your public key:");
                reporter.info(key.trim());
            }
            None => reporter.warning("Public key file not found next to the private key"),
        }
        reporter.checklist(
            "Register it with GitHub:",
            &[
                "Open https://github.com/settings/ssh/new",
                "Paste the public key above and give it a title",
                "Click \"Add SSH key\"",
            ],
        );
    }

    fn ensure_ssh_remote(&self, repo: Option<&Git<'_>>) {
        let Some(repo) = repo else {
            return;
        };
        match repo.rewrite_remote_to_ssh() {
            Ok(Some(url)) => self
                .services
                .reporter
                .success(&format!("Remote now uses SSH: {}", url)),
            Ok(None) => {}
            Err(e) => self
                .services
                .reporter
                .warning(&format!("Could not switch remote to SSH: {}", e)),
        }
    }
}

/// `ssh-keygen` will not create the key directory itself. ssh refuses keys
/// in a group- or world-readable directory, so it is created as 0700.
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(dir)
}

/// Extract `SSH_AUTH_SOCK` / `SSH_AGENT_PID` from `ssh-agent -s` output.
pub fn parse_agent_env(output: &str) -> Vec<(String, String)> {
    AGENT_VAR
        .captures_iter(output)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect()
}
