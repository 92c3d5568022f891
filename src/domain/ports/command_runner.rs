//! Command Runner Port
//!
//! Every external process Shipit starts (git, ssh, node, vercel, npm) goes
//! through this trait so the orchestration logic can run against a scripted
//! double in tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ShipitResult;

/// Argument marker whose value must never be echoed.
const SECRET_MARKER: &str = "x-access-token:";
/// Flag whose following argument is a secret.
const SECRET_FLAG: &str = "--token";

/// Argv-style description of one process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
    /// Kill the process if it runs longer than this.
    pub timeout: Option<Duration>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
            timeout: None,
        }
    }

    /// Run `command` through the platform shell.
    pub fn shell(command: &str) -> Self {
        if cfg!(windows) {
            Self::new("cmd").args(["/C", command])
        } else {
            Self::new("sh").args(["-c", command])
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full command line, unredacted.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Command line safe for logs and error messages.
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.clone()];
        let mut hide_next = false;
        for arg in &self.args {
            if hide_next || arg.contains(SECRET_MARKER) {
                parts.push("<redacted>".to_string());
            } else {
                parts.push(arg.clone());
            }
            hide_next = arg == SECRET_FLAG;
        }
        parts.join(" ")
    }
}

/// Exit status and (when captured) output of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn combined(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Process execution boundary.
pub trait CommandRunner {
    /// Run with stdio inherited so output streams live to the operator.
    fn stream(&self, spec: &CommandSpec) -> ShipitResult<CommandOutput>;

    /// Run with stdout/stderr captured.
    fn capture(&self, spec: &CommandSpec) -> ShipitResult<CommandOutput>;

    /// Whether `program` resolves on PATH.
    fn is_installed(&self, program: &str) -> bool;
}

#[cfg(test)]
pub use scripted::ScriptedRunner;

#[cfg(test)]
mod scripted {
    use std::cell::RefCell;

    use super::*;
    use crate::error::ShipitError;

    enum Reply {
        Exit(CommandOutput),
        SpawnError,
    }

    struct Rule {
        prefix: String,
        reply: Reply,
        once: bool,
    }

    /// Scripted runner for tests.
    ///
    /// Rules match on the unredacted command line prefix; the first match wins
    /// and `once` rules are consumed. Unmatched commands exit 0 silently.
    #[derive(Default)]
    pub struct ScriptedRunner {
        rules: RefCell<Vec<Rule>>,
        calls: RefCell<Vec<CommandSpec>>,
        missing: Vec<String>,
    }

    impl ScriptedRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn on(self, prefix: &str, code: i32) -> Self {
            self.on_output(prefix, code, "", "")
        }

        pub fn on_output(self, prefix: &str, code: i32, stdout: &str, stderr: &str) -> Self {
            self.push(prefix, Self::exit(code, stdout, stderr), false)
        }

        pub fn once(self, prefix: &str, code: i32) -> Self {
            self.once_output(prefix, code, "", "")
        }

        pub fn once_output(self, prefix: &str, code: i32, stdout: &str, stderr: &str) -> Self {
            self.push(prefix, Self::exit(code, stdout, stderr), true)
        }

        pub fn spawn_error(self, prefix: &str) -> Self {
            self.push(prefix, Reply::SpawnError, false)
        }

        pub fn not_installed(mut self, program: &str) -> Self {
            self.missing.push(program.to_string());
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().iter().map(CommandSpec::command_line).collect()
        }

        pub fn specs(&self) -> Vec<CommandSpec> {
            self.calls.borrow().clone()
        }

        pub fn called(&self, prefix: &str) -> bool {
            self.calls().iter().any(|c| c.starts_with(prefix))
        }

        pub fn count(&self, prefix: &str) -> usize {
            self.calls().iter().filter(|c| c.starts_with(prefix)).count()
        }

        fn exit(code: i32, stdout: &str, stderr: &str) -> Reply {
            Reply::Exit(CommandOutput {
                code: Some(code),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            })
        }

        fn push(self, prefix: &str, reply: Reply, once: bool) -> Self {
            self.rules.borrow_mut().push(Rule {
                prefix: prefix.to_string(),
                reply,
                once,
            });
            self
        }

        fn reply(&self, spec: &CommandSpec) -> ShipitResult<CommandOutput> {
            self.calls.borrow_mut().push(spec.clone());
            let line = spec.command_line();
            let mut rules = self.rules.borrow_mut();
            let Some(index) = rules.iter().position(|r| line.starts_with(&r.prefix)) else {
                return Ok(CommandOutput {
                    code: Some(0),
                    ..CommandOutput::default()
                });
            };
            let result = match &rules[index].reply {
                Reply::Exit(output) => Ok(output.clone()),
                Reply::SpawnError => Err(ShipitError::Spawn {
                    program: spec.program.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
                }),
            };
            if rules[index].once {
                rules.remove(index);
            }
            result
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn stream(&self, spec: &CommandSpec) -> ShipitResult<CommandOutput> {
            self.reply(spec)
        }

        fn capture(&self, spec: &CommandSpec) -> ShipitResult<CommandOutput> {
            self.reply(spec)
        }

        fn is_installed(&self, program: &str) -> bool {
            !self.missing.iter().any(|m| m == program)
        }
    }
}
