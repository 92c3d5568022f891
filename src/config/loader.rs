//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ShipitError, ShipitResult};

use super::types::{ColorMode, Config};

/// Project-level config file name
pub const PROJECT_CONFIG_FILE: &str = ".shipit.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ShipitResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ShipitError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Path of the config file that `load_or_default` would use, if any.
pub fn config_path(project_root: Option<&Path>) -> Option<PathBuf> {
    if let Some(root) = project_root {
        let project_config = root.join(PROJECT_CONFIG_FILE);
        if project_config.is_file() {
            return Some(project_config);
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join("shipit/config.toml"))
        .filter(|p| p.is_file())
}

/// Load from project config, user config, or defaults
pub fn load_or_default(project_root: Option<&Path>) -> Config {
    let config = match config_path(project_root) {
        Some(path) => match Config::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                Config::default()
            }
        },
        None => Config::default(),
    };
    with_env_overrides(config)
}

/// Apply environment variable overrides (SHIPIT_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

pub(crate) fn with_env_overrides_from(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> Config {
    // SHIPIT_COLOR
    if let Some(color) = get_env("SHIPIT_COLOR") {
        config.output.color = match color.to_lowercase().as_str() {
            "always" => ColorMode::Always,
            "never" => ColorMode::Never,
            _ => ColorMode::Auto,
        };
    }

    // NO_COLOR wins over everything
    if get_env("NO_COLOR").is_some() {
        config.output.color = ColorMode::Never;
    }

    // SHIPIT_DEPLOY_CLI
    if let Some(cli) = get_env("SHIPIT_DEPLOY_CLI").filter(|s| !s.trim().is_empty()) {
        config.deploy.cli = cli;
    }

    // SHIPIT_DEPLOY_TIMEOUT (seconds)
    if let Some(secs) = get_env("SHIPIT_DEPLOY_TIMEOUT").and_then(|s| s.parse().ok()) {
        config.deploy.timeout_secs = secs;
    }

    // SHIPIT_GIT_REMOTE
    if let Some(remote) = get_env("SHIPIT_GIT_REMOTE").filter(|s| !s.trim().is_empty()) {
        config.git.remote = remote;
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "output",
        "color",
        "unicode",
        "deploy",
        "cli",
        "runner",
        "timeout_secs",
        "git",
        "remote",
        "host",
        "runtime",
        "min_node_major",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

/// Simple Levenshtein distance for typo detection
fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    if a_bytes.is_empty() {
        return b_bytes.len();
    }
    if b_bytes.is_empty() {
        return a_bytes.len();
    }

    let mut prev_row: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_bytes.len() + 1];

    for (i, a_char) in a_bytes.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_bytes.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_bytes.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("remote", "remote"), 0);
        assert_eq!(levenshtein("remot", "remote"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn suggest_key_for_typo() {
        assert_eq!(suggest_key("timout_secs").as_deref(), Some("timeout_secs"));
        assert_eq!(suggest_key("completely_unrelated"), None);
    }
}
