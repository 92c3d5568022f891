use std::collections::HashMap;

use super::loader::with_env_overrides_from;
use super::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.deploy.cli, "vercel");
    assert_eq!(config.deploy.runner, "npx");
    assert_eq!(config.deploy.timeout_secs, 300);
    assert_eq!(config.git.remote, "origin");
    assert_eq!(config.git.host, "github.com");
    assert_eq!(config.runtime.min_node_major, 18);
    assert_eq!(config.output.color, ColorMode::Auto);
    assert!(config.output.unicode);
}

#[test]
fn load_partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(PROJECT_CONFIG_FILE);
    std::fs::write(
        &path,
        r#"
[deploy]
timeout_secs = 60

[git]
remote = "upstream"
"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.deploy.timeout_secs, 60);
    assert_eq!(config.deploy.cli, "vercel");
    assert_eq!(config.git.remote, "upstream");
    assert_eq!(config.git.host, "github.com");
}

#[test]
fn unknown_keys_produce_warnings_with_suggestions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(PROJECT_CONFIG_FILE);
    std::fs::write(&path, "[deploy]\ntimout_secs = 5\n").unwrap();

    let (config, warnings) = Config::load_with_warnings(&path).unwrap();
    assert_eq!(config.deploy.timeout_secs, 300);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "timout_secs");
    assert_eq!(warnings[0].line, Some(2));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("timeout_secs"));
}

#[test]
fn invalid_toml_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(PROJECT_CONFIG_FILE);
    std::fs::write(&path, "[deploy\n").unwrap();
    assert!(Config::load(&path).is_err());
}

#[test]
fn project_config_is_found_by_path() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(PROJECT_CONFIG_FILE), "").unwrap();
    assert_eq!(
        config_path(Some(dir.path())),
        Some(dir.path().join(PROJECT_CONFIG_FILE))
    );
}

#[test]
fn env_overrides_apply() {
    let config = with_env_overrides_from(
        Config::default(),
        env(&[
            ("SHIPIT_COLOR", "always"),
            ("SHIPIT_DEPLOY_CLI", "/opt/bin/vercel"),
            ("SHIPIT_DEPLOY_TIMEOUT", "42"),
            ("SHIPIT_GIT_REMOTE", "deploy"),
        ]),
    );
    assert_eq!(config.output.color, ColorMode::Always);
    assert_eq!(config.deploy.cli, "/opt/bin/vercel");
    assert_eq!(config.deploy.timeout_secs, 42);
    assert_eq!(config.git.remote, "deploy");
}

#[test]
fn no_color_beats_shipit_color() {
    let config = with_env_overrides_from(
        Config::default(),
        env(&[("SHIPIT_COLOR", "always"), ("NO_COLOR", "1")]),
    );
    assert_eq!(config.output.color, ColorMode::Never);
}

#[test]
fn malformed_timeout_is_ignored() {
    let config = with_env_overrides_from(
        Config::default(),
        env(&[("SHIPIT_DEPLOY_TIMEOUT", "soon")]),
    );
    assert_eq!(config.deploy.timeout_secs, 300);
}
