//! Error classification
//!
//! Maps a failure message onto a remediation category by substring.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    TokenConfig,
    Build,
    Other,
}

/// `(category, needles)` in match order; first hit wins.
const CATEGORY_TABLE: &[(ErrorCategory, &[&str])] = &[
    (
        ErrorCategory::Authentication,
        &["auth", "permission denied", "publickey", "not authenticated", "ssh_setup_required"],
    ),
    (ErrorCategory::TokenConfig, &["token", "config", "project.json"]),
    (ErrorCategory::Build, &["build", "compile"]),
];

pub fn classify_error(message: &str) -> ErrorCategory {
    let message = message.to_lowercase();
    CATEGORY_TABLE
        .iter()
        .find(|(_, needles)| needles.iter().any(|n| message.contains(n)))
        .map(|(category, _)| *category)
        .unwrap_or(ErrorCategory::Other)
}

impl ErrorCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::Authentication => "authentication",
            ErrorCategory::TokenConfig => "token/config",
            ErrorCategory::Build => "build",
            ErrorCategory::Other => "other",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ErrorCategory::Authentication => "Authentication problem. Try:",
            ErrorCategory::TokenConfig => "Token or configuration problem. Try:",
            ErrorCategory::Build => "Build problem. Try:",
            ErrorCategory::Other => "Deployment failed. Try:",
        }
    }

    pub fn remediation(&self) -> &'static [&'static str] {
        match self {
            ErrorCategory::Authentication => &[
                "Run `shipit ssh` to set up SSH access to GitHub",
                "Or set GITHUB_TOKEN in .env.local for HTTPS push",
                "Run `vercel login` if the provider CLI is not authenticated",
            ],
            ErrorCategory::TokenConfig => &[
                "Check VERCEL_TOKEN in .env.local (https://vercel.com/account/tokens)",
                "Run `shipit fix` to repair vercel.json and .vercel/project.json",
                "Run `vercel link` to relink the project",
            ],
            ErrorCategory::Build => &[
                "Run `npm run build` locally and fix the reported errors",
                "Run `npm install` to refresh dependencies",
                "Check buildCommand in vercel.json",
            ],
            ErrorCategory::Other => &[
                "Run `shipit doctor` for a full diagnostic",
                "Re-run with -v for detailed logs",
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_by_substring() {
        assert_eq!(
            classify_error("git@github.com: Permission denied (publickey)."),
            ErrorCategory::Authentication
        );
        assert_eq!(
            classify_error("SSH_SETUP_REQUIRED: agent has no identities"),
            ErrorCategory::Authentication
        );
        assert_eq!(
            classify_error("required value 'VERCEL_TOKEN' was not provided"),
            ErrorCategory::TokenConfig
        );
        assert_eq!(
            classify_error("invalid JSON in .vercel/project.json"),
            ErrorCategory::TokenConfig
        );
        assert_eq!(
            classify_error("build failed: 'npm run build' exited with exit code 1"),
            ErrorCategory::Build
        );
        assert_eq!(
            classify_error("deployment failed after 3 strategies"),
            ErrorCategory::Other
        );
    }

    #[test]
    fn authentication_wins_over_token() {
        assert_eq!(
            classify_error("Not authenticated: token expired"),
            ErrorCategory::Authentication
        );
    }

    #[test]
    fn every_category_has_remediation() {
        for category in [
            ErrorCategory::Authentication,
            ErrorCategory::TokenConfig,
            ErrorCategory::Build,
            ErrorCategory::Other,
        ] {
            assert!(!category.remediation().is_empty());
        }
    }
}
