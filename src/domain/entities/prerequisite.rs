//! Prerequisite check results

use std::collections::BTreeMap;

/// Whether a failing check blocks the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    Critical,
    Advisory,
}

/// Outcome of a single prerequisite check.
#[derive(Debug, Clone, PartialEq)]
pub struct PrerequisiteResult {
    pub name: String,
    pub passed: bool,
    pub criticality: Criticality,
    pub message: String,
    /// Ordered manual steps that resolve a failure.
    pub remediation: Vec<String>,
}

impl PrerequisiteResult {
    pub fn pass(name: &str, criticality: Criticality, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            criticality,
            message: message.into(),
            remediation: Vec::new(),
        }
    }

    pub fn fail(
        name: &str,
        criticality: Criticality,
        message: impl Into<String>,
        remediation: &[&str],
    ) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            criticality,
            message: message.into(),
            remediation: remediation.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn is_critical(&self) -> bool {
        self.criticality == Criticality::Critical
    }
}

/// Result of running one automated remediation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixOutcome {
    Fixed { name: String },
    Failed { name: String, error: String },
}

impl FixOutcome {
    pub fn name(&self) -> &str {
        match self {
            FixOutcome::Fixed { name } | FixOutcome::Failed { name, .. } => name,
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, FixOutcome::Fixed { .. })
    }
}

/// Aggregate over every check in a run.
#[derive(Debug, Clone, Default)]
pub struct PrerequisiteSummary {
    pub results: Vec<PrerequisiteResult>,
    pub fixes: Vec<FixOutcome>,
}

impl PrerequisiteSummary {
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Advisory failures do not count against this.
    pub fn critical_passed(&self) -> bool {
        self.results.iter().filter(|r| r.is_critical()).all(|r| r.passed)
    }

    pub fn issues(&self) -> Vec<&PrerequisiteResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }

    pub fn failed_critical_names(&self) -> Vec<String> {
        self.results
            .iter()
            .filter(|r| r.is_critical() && !r.passed)
            .map(|r| r.name.clone())
            .collect()
    }

    pub fn by_name(&self) -> BTreeMap<&str, &PrerequisiteResult> {
        self.results.iter().map(|r| (r.name.as_str(), r)).collect()
    }

    pub fn failed_fixes(&self) -> Vec<&FixOutcome> {
        self.fixes.iter().filter(|f| !f.is_fixed()).collect()
    }
}
