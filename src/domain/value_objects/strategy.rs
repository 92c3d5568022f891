//! Deployment strategy inference
//!
//! Existing platform config files take precedence over framework heuristics.

use std::fmt;
use std::path::Path;

use super::framework::Framework;

/// Where the project appears to be meant to deploy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentStrategy {
    Vercel,
    Netlify,
    Docker,
    Fly,
    Static,
    AutoDetect,
}

/// `(platform config file, strategy)` in precedence order.
pub const PLATFORM_FILE_TABLE: &[(&str, DeploymentStrategy)] = &[
    ("vercel.json", DeploymentStrategy::Vercel),
    ("netlify.toml", DeploymentStrategy::Netlify),
    ("Dockerfile", DeploymentStrategy::Docker),
    ("fly.toml", DeploymentStrategy::Fly),
];

impl DeploymentStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            DeploymentStrategy::Vercel => "vercel",
            DeploymentStrategy::Netlify => "netlify",
            DeploymentStrategy::Docker => "docker",
            DeploymentStrategy::Fly => "fly",
            DeploymentStrategy::Static => "static",
            DeploymentStrategy::AutoDetect => "auto-detect",
        }
    }

    pub fn infer(root: &Path, framework: Option<Framework>) -> DeploymentStrategy {
        if let Some((_, strategy)) = PLATFORM_FILE_TABLE
            .iter()
            .find(|(file, _)| root.join(file).is_file())
        {
            return *strategy;
        }

        match framework {
            Some(Framework::NextJs) => DeploymentStrategy::Vercel,
            Some(f) if f.is_static() => DeploymentStrategy::Static,
            _ => DeploymentStrategy::AutoDetect,
        }
    }
}

impl fmt::Display for DeploymentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_file_beats_framework() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("netlify.toml"), "").unwrap();
        assert_eq!(
            DeploymentStrategy::infer(dir.path(), Some(Framework::NextJs)),
            DeploymentStrategy::Netlify
        );
    }

    #[test]
    fn vercel_json_is_checked_first() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Dockerfile"), "").unwrap();
        std::fs::write(dir.path().join("vercel.json"), "{}").unwrap();
        assert_eq!(
            DeploymentStrategy::infer(dir.path(), None),
            DeploymentStrategy::Vercel
        );
    }

    #[test]
    fn framework_fallbacks() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            DeploymentStrategy::infer(dir.path(), Some(Framework::NextJs)),
            DeploymentStrategy::Vercel
        );
        assert_eq!(
            DeploymentStrategy::infer(dir.path(), Some(Framework::Vite)),
            DeploymentStrategy::Static
        );
        assert_eq!(
            DeploymentStrategy::infer(dir.path(), Some(Framework::Express)),
            DeploymentStrategy::AutoDetect
        );
        assert_eq!(DeploymentStrategy::infer(dir.path(), None).label(), "auto-detect");
    }
}
