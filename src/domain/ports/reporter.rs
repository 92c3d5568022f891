//! Reporter Port
//!
//! Operator-facing progress output for long orchestration runs.
//! Implementations can be:
//! - ConsoleReporter: icons and colors on stdout
//! - NoopReporter: silent operation

/// Severity of a reported line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// A pipeline stage is starting
    Step,
    Info,
    Success,
    Warning,
    Error,
}

pub trait Reporter {
    fn emit(&self, level: Level, message: &str);

    fn step(&self, message: &str) {
        self.emit(Level::Step, message);
    }

    fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    fn success(&self, message: &str) {
        self.emit(Level::Success, message);
    }

    fn warning(&self, message: &str) {
        self.emit(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    /// Numbered manual steps under a heading.
    fn checklist(&self, title: &str, steps: &[&str]) {
        self.emit(Level::Info, title);
        for (i, step) in steps.iter().enumerate() {
            self.emit(Level::Info, &format!("  {}. {}", i + 1, step));
        }
    }
}

/// No-op reporter for silent operation
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn emit(&self, _level: Level, _message: &str) {}
}

#[cfg(test)]
pub use recording::RecordingReporter;
