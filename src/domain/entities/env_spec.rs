//! Environment variable catalog
//!
//! A fixed table drives both the presence check and interactive collection.

/// Description of one environment variable Shipit knows about.
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentVariableSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub default: Option<&'static str>,
    pub validator: fn(&str) -> bool,
    pub instructions: &'static [&'static str],
}

impl EnvironmentVariableSpec {
    pub fn validate(&self, value: &str) -> bool {
        (self.validator)(value)
    }

    /// Secrets are masked in output and collected with a hidden prompt.
    pub fn is_secret(&self) -> bool {
        self.name.ends_with("_TOKEN")
    }
}

fn any_value(value: &str) -> bool {
    !value.trim().is_empty()
}

fn vercel_token(value: &str) -> bool {
    value.len() >= 20 && !value.chars().any(char::is_whitespace)
}

fn github_token(value: &str) -> bool {
    ["ghp_", "github_pat_", "gho_"]
        .iter()
        .any(|prefix| value.starts_with(prefix))
}

fn node_env(value: &str) -> bool {
    matches!(value, "development" | "production" | "test")
}

fn port(value: &str) -> bool {
    value.parse::<u16>().is_ok_and(|p| p > 0)
}

pub const ENV_CATALOG: &[EnvironmentVariableSpec] = &[
    EnvironmentVariableSpec {
        name: "VERCEL_TOKEN",
        description: "Vercel API token used for non-interactive deploys",
        required: true,
        default: None,
        validator: vercel_token,
        instructions: &[
            "Open https://vercel.com/account/tokens",
            "Create a token scoped to your team",
            "Paste it here or add VERCEL_TOKEN=<token> to .env.local",
        ],
    },
    EnvironmentVariableSpec {
        name: "VERCEL_ORG_ID",
        description: "Vercel team/organization id",
        required: false,
        default: None,
        validator: any_value,
        instructions: &["Run `vercel link`, then copy orgId from .vercel/project.json"],
    },
    EnvironmentVariableSpec {
        name: "VERCEL_PROJECT_ID",
        description: "Vercel project id",
        required: false,
        default: None,
        validator: any_value,
        instructions: &["Run `vercel link`, then copy projectId from .vercel/project.json"],
    },
    EnvironmentVariableSpec {
        name: "GITHUB_TOKEN",
        description: "GitHub personal access token for HTTPS push fallback",
        required: false,
        default: None,
        validator: github_token,
        instructions: &[
            "Open https://github.com/settings/tokens",
            "Generate a token with the `repo` scope",
        ],
    },
    EnvironmentVariableSpec {
        name: "NODE_ENV",
        description: "Runtime environment",
        required: false,
        default: Some("production"),
        validator: node_env,
        instructions: &["Use one of: development, production, test"],
    },
    EnvironmentVariableSpec {
        name: "PORT",
        description: "Local server port",
        required: false,
        default: Some("3000"),
        validator: port,
        instructions: &["Use a number between 1 and 65535"],
    },
];

pub fn find_spec(name: &str) -> Option<&'static EnvironmentVariableSpec> {
    ENV_CATALOG.iter().find(|spec| spec.name == name)
}
