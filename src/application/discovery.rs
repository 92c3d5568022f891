//! Project Context Discoverer
//!
//! Inspects the project root (non-recursively) and produces a `ProjectContext`.
//! Never writes and never fails: an unreadable manifest is recorded on the
//! context instead of aborting, so the orchestrator can decide what to do.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::entities::{Manifest, ProjectContext};
use crate::domain::value_objects::{DeploymentStrategy, Framework};

pub const MANIFEST_FILE: &str = "package.json";
pub const PROVIDER_CONFIG_FILE: &str = "vercel.json";

/// Environment files looked for at the root, in precedence order.
pub const ENV_FILE_CANDIDATES: &[&str] = &[
    ".env",
    ".env.local",
    ".env.development",
    ".env.development.local",
    ".env.production",
    ".env.production.local",
];

pub const DOC_CANDIDATES: &[&str] = &[
    "README.md",
    "README",
    "DEPLOYMENT.md",
    "CONTRIBUTING.md",
    "CHANGELOG.md",
    "docs",
];

/// Scan `root` and build its context.
pub fn discover_project_context(root: &Path) -> ProjectContext {
    let (manifest, manifest_error) = read_manifest(root);

    let framework = manifest
        .as_ref()
        .and_then(|m| Framework::from_dependencies(|dep| m.has_dependency(dep)))
        .or_else(|| Framework::from_config_files(root));

    let build_command = detect_build_command(root, manifest.as_ref());
    let strategy = DeploymentStrategy::infer(root, framework);

    let context = ProjectContext {
        root: root.to_path_buf(),
        manifest,
        manifest_error,
        env_files: existing(root, ENV_FILE_CANDIDATES),
        docs: existing(root, DOC_CANDIDATES),
        is_git_repo: root.join(".git").exists(),
        framework,
        build_command,
        strategy,
    };

    tracing::debug!(
        root = %root.display(),
        manifest = context.has_manifest(),
        framework = ?context.framework,
        strategy = %context.strategy,
        "discovered project context"
    );
    context
}

fn read_manifest(root: &Path) -> (Option<Manifest>, Option<String>) {
    let path = root.join(MANIFEST_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return (None, None),
        Err(e) => return (None, Some(e.to_string())),
    };

    match Manifest::parse(&content) {
        Ok(manifest) => (Some(manifest), None),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unparseable package.json");
            (None, Some(e.to_string()))
        }
    }
}

/// `vercel.json` `buildCommand` wins over the manifest's `build` script.
fn detect_build_command(root: &Path, manifest: Option<&Manifest>) -> Option<String> {
    let from_provider = fs::read_to_string(root.join(PROVIDER_CONFIG_FILE))
        .ok()
        .and_then(|content| serde_json::from_str::<Value>(&content).ok())
        .and_then(|value| {
            value
                .get("buildCommand")
                .and_then(Value::as_str)
                .map(String::from)
        });

    from_provider.or_else(|| {
        manifest
            .and_then(|m| m.script("build"))
            .map(|_| "npm run build".to_string())
    })
}

fn existing(root: &Path, candidates: &[&str]) -> Vec<PathBuf> {
    candidates
        .iter()
        .map(|name| root.join(name))
        .filter(|path| path.exists())
        .collect()
}
