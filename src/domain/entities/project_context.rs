//! Project context entity
//!
//! Built once per invocation by the discoverer and never mutated afterwards.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::domain::value_objects::{DeploymentStrategy, Framework};

/// Build command written by scaffolding tools that skip the real build.
pub const PLACEHOLDER_BUILD_COMMAND: &str = "echo 'Build completed'";

/// Parsed `package.json`.
///
/// The raw object is kept so rewrites preserve unknown fields and key order.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    raw: Map<String, Value>,
}

impl Manifest {
    /// Parse manifest text. Anything other than a JSON object is rejected.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        let raw: Map<String, Value> = serde_json::from_str(content)?;
        Ok(Self { raw })
    }

    pub fn name(&self) -> Option<&str> {
        self.raw.get("name").and_then(Value::as_str)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.raw.insert("name".to_string(), Value::String(name.into()));
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.raw
            .get("scripts")
            .and_then(Value::as_object)
            .and_then(|scripts| scripts.get(name))
            .and_then(Value::as_str)
    }

    /// Declared in `dependencies` or `devDependencies`.
    pub fn has_dependency(&self, dep: &str) -> bool {
        ["dependencies", "devDependencies"].iter().any(|section| {
            self.raw
                .get(*section)
                .and_then(Value::as_object)
                .is_some_and(|deps| deps.contains_key(dep))
        })
    }

    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut out = serde_json::to_string_pretty(&self.raw)?;
        out.push('\n');
        Ok(out)
    }
}

/// Whether `command` is a no-op standing in for a real build.
pub fn is_placeholder_build_command(command: &str) -> bool {
    let trimmed = command.trim();
    trimmed.is_empty() || trimmed == "true" || trimmed == ":" || trimmed.starts_with("echo")
}

/// Everything Shipit knows about the project it was pointed at.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub root: PathBuf,
    pub manifest: Option<Manifest>,
    /// Parse error for a `package.json` that exists but is unreadable.
    pub manifest_error: Option<String>,
    pub env_files: Vec<PathBuf>,
    pub docs: Vec<PathBuf>,
    pub is_git_repo: bool,
    pub framework: Option<Framework>,
    pub build_command: Option<String>,
    pub strategy: DeploymentStrategy,
}

impl ProjectContext {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn has_manifest(&self) -> bool {
        self.manifest.is_some()
    }

    pub fn project_name(&self) -> Option<&str> {
        self.manifest.as_ref().and_then(Manifest::name)
    }

    /// Full-stack framework paired with a build command that builds nothing.
    pub fn has_placeholder_build(&self) -> bool {
        let full_stack = self.framework.is_some_and(|f| f.is_full_stack());
        let placeholder = self
            .build_command
            .as_deref()
            .is_some_and(is_placeholder_build_command);
        full_stack && placeholder
    }
}
