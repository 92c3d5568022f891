//! System process runner
//!
//! Spawns real processes with `std::process::Command`. Streaming runs inherit
//! stdio so the operator sees git/vercel output live; captured runs pipe it.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::domain::ports::{CommandOutput, CommandRunner, CommandSpec};
use crate::error::{ShipitError, ShipitResult};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Runner backed by the host OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        if let Some(dir) = &spec.cwd {
            cmd.current_dir(dir);
        }
        for (key, value) in &spec.env {
            cmd.env(key, value);
        }
        cmd
    }

    fn spawn(spec: &CommandSpec, mut cmd: Command) -> ShipitResult<Child> {
        tracing::debug!(command = %spec.display(), "spawning");
        cmd.spawn().map_err(|source| ShipitError::Spawn {
            program: spec.program.clone(),
            source,
        })
    }

    /// Wait for `child`, killing it once `timeout` elapses.
    fn wait(spec: &CommandSpec, child: &mut Child) -> ShipitResult<ExitStatus> {
        let Some(timeout) = spec.timeout else {
            return Ok(child.wait()?);
        };

        let started = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if started.elapsed() >= timeout {
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(command = %spec.display(), seconds = timeout.as_secs(), "timed out");
                return Err(ShipitError::TimedOut {
                    command: spec.display(),
                    seconds: timeout.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

fn drain(pipe: Option<impl Read + Send + 'static>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

impl CommandRunner for SystemRunner {
    fn stream(&self, spec: &CommandSpec) -> ShipitResult<CommandOutput> {
        let mut cmd = Self::command(spec);
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let mut child = Self::spawn(spec, cmd)?;
        let status = Self::wait(spec, &mut child)?;
        tracing::debug!(command = %spec.display(), code = ?status.code(), "finished");

        Ok(CommandOutput {
            code: status.code(),
            ..CommandOutput::default()
        })
    }

    fn capture(&self, spec: &CommandSpec) -> ShipitResult<CommandOutput> {
        let mut cmd = Self::command(spec);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = Self::spawn(spec, cmd)?;
        // Drain both pipes concurrently so a chatty process cannot block on a full pipe.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        let status = Self::wait(spec, &mut child)?;

        let output = CommandOutput {
            code: status.code(),
            stdout: stdout.join().unwrap_or_default(),
            stderr: stderr.join().unwrap_or_default(),
        };
        tracing::debug!(command = %spec.display(), code = ?output.code, "finished");
        Ok(output)
    }

    fn is_installed(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn capture_collects_stdout_and_exit_code() {
        let output = SystemRunner
            .capture(&CommandSpec::shell("echo hello; echo oops >&2; exit 3"))
            .unwrap();
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout.trim(), "hello");
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = SystemRunner
            .capture(&CommandSpec::new("definitely-not-a-real-binary-shipit"))
            .unwrap_err();
        assert!(matches!(err, ShipitError::Spawn { .. }));
    }

    #[test]
    fn timeout_kills_long_running_process() {
        let spec = CommandSpec::new("sleep")
            .arg("5")
            .timeout(Duration::from_millis(200));
        let err = SystemRunner.capture(&spec).unwrap_err();
        assert!(matches!(err, ShipitError::TimedOut { .. }));
    }

    #[test]
    fn is_installed_finds_sh() {
        assert!(SystemRunner.is_installed("sh"));
        assert!(!SystemRunner.is_installed("definitely-not-a-real-binary-shipit"));
    }
}
