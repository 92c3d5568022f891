//! Environment variable presence check and collection
//!
//! Values resolve from the process environment first, then `.env.local`,
//! then `.env`. Collected values are appended to `.env.local` only.

use std::fs;
use std::path::Path;

use super::Services;
use crate::domain::entities::{EnvironmentVariableSpec, ENV_CATALOG};
use crate::error::{ShipitError, ShipitResult};
use crate::infrastructure::env_file::{append_env_entries, lookup};
use crate::infrastructure::write_safe_file;

pub const LOCAL_ENV_FILE: &str = ".env.local";

const LOOKUP_ORDER: &[&str] = &[".env.local", ".env"];

/// Attempts per variable before giving up on an invalid value.
const MAX_ATTEMPTS: usize = 3;

#[derive(Debug, Clone)]
pub struct EnvVarStatus {
    pub spec: &'static EnvironmentVariableSpec,
    pub value: Option<String>,
}

impl EnvVarStatus {
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_valid(&self) -> bool {
        self.value.as_deref().is_some_and(|v| self.spec.validate(v))
    }

    /// Value for display; secrets show only their last four characters.
    pub fn display_value(&self) -> String {
        match &self.value {
            None => "(not set)".to_string(),
            Some(v) if self.spec.is_secret() => {
                let tail: String = v.chars().skip(v.chars().count().saturating_sub(4)).collect();
                format!("****{}", tail)
            }
            Some(v) => v.clone(),
        }
    }
}

pub fn resolve_value(services: Services<'_>, root: &Path, name: &str) -> Option<String> {
    (services.env)(name).or_else(|| lookup(root, LOOKUP_ORDER, name))
}

/// Status of every catalog entry, in catalog order.
pub fn check_environment(services: Services<'_>, root: &Path) -> Vec<EnvVarStatus> {
    ENV_CATALOG
        .iter()
        .map(|spec| EnvVarStatus {
            spec,
            value: resolve_value(services, root, spec.name),
        })
        .collect()
}

/// Make sure every required variable is available.
///
/// With `collect` set, missing required values are asked for and appended to
/// `.env.local`; without an operator that is a `MissingRequiredInput` error.
/// Without `collect`, missing values are only reported. Returns the names
/// that were written.
pub fn ensure_environment(
    services: Services<'_>,
    root: &Path,
    collect: bool,
) -> ShipitResult<Vec<String>> {
    let reporter = services.reporter;
    let statuses = check_environment(services, root);

    for status in &statuses {
        if status.is_set() && !status.is_valid() {
            reporter.warning(&format!(
                "{} looks invalid: {}",
                status.spec.name,
                status.spec.instructions.join("; ")
            ));
        } else if !status.is_set() && !status.spec.required {
            tracing::debug!(name = status.spec.name, "optional variable not set");
        }
    }

    let missing: Vec<&EnvVarStatus> = statuses
        .iter()
        .filter(|s| s.spec.required && !s.is_set())
        .collect();

    if missing.is_empty() {
        return Ok(Vec::new());
    }

    if !collect {
        for status in &missing {
            reporter.warning(&format!("{} is not set ({})", status.spec.name, status.spec.description));
        }
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for status in missing {
        let value = collect_value(services, status.spec)?;
        entries.push((status.spec.name.to_string(), value));
    }

    let written = append_env_entries(root, LOCAL_ENV_FILE, &entries)?;
    ensure_gitignored(root, LOCAL_ENV_FILE)?;
    for (name, _) in entries.iter().filter(|(k, _)| !written.contains(k)) {
        reporter.warning(&format!(
            "{} already has a value in {}; left unchanged",
            name, LOCAL_ENV_FILE
        ));
    }
    if !written.is_empty() {
        reporter.success(&format!("Saved {} value(s) to {}", written.len(), LOCAL_ENV_FILE));
    }

    Ok(written)
}

fn collect_value(services: Services<'_>, spec: &EnvironmentVariableSpec) -> ShipitResult<String> {
    let missing = || ShipitError::MissingRequiredInput {
        name: spec.name.to_string(),
    };

    if !services.prompter.is_interactive() {
        return Err(missing());
    }

    services
        .reporter
        .checklist(&format!("{} is required: {}", spec.name, spec.description), spec.instructions);

    for _ in 0..MAX_ATTEMPTS {
        let answer = if spec.is_secret() {
            services.prompter.secret(spec.name)?
        } else {
            services.prompter.input(spec.name, spec.default)?
        };

        let Some(value) = answer.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
            return Err(missing());
        };

        if spec.validate(&value) {
            return Ok(value);
        }
        services
            .reporter
            .warning(&format!("That does not look like a valid {}", spec.name));
    }

    Err(missing())
}

/// Append `entry` to `.gitignore` unless a line already matches it.
pub fn ensure_gitignored(root: &Path, entry: &str) -> ShipitResult<bool> {
    let path = root.join(".gitignore");
    let mut content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    let covered = content.lines().map(str::trim).any(|line| {
        line == entry || line == format!("/{}", entry) || line == ".env*" || line == ".env*.local"
    });
    if covered {
        return Ok(false);
    }

    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(entry);
    content.push('\n');
    write_safe_file(".gitignore", &content, root)?;
    Ok(true)
}
