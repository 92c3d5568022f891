//! Provider configuration repairs
//!
//! Corrupt or missing provider files are regenerated rather than reported.
//! Every write goes through the path guard.

use std::fs;
use std::path::Path;

use serde_json::{json, Map, Value};

use super::discovery::{MANIFEST_FILE, PROVIDER_CONFIG_FILE};
use crate::domain::entities::{is_placeholder_build_command, Manifest};
use crate::domain::value_objects::{fix_package_name, is_valid_package_name, resolve_safe_path};
use crate::error::{ShipitError, ShipitResult};
use crate::infrastructure::write_safe_file;

/// Linked-project metadata directory.
pub const LINK_DIR: &str = ".vercel";
pub const LINK_FILE: &str = "project.json";

const LINK_KEYS: &[&str] = &["orgId", "projectId"];

fn read_object(path: &Path) -> Option<Map<String, Value>> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str::<Map<String, Value>>(&content).ok()
}

fn pretty(value: &impl serde::Serialize) -> ShipitResult<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

/// Write a minimal `vercel.json` when it is absent or not a JSON object.
///
/// Returns whether the file was written; a valid file is never touched.
pub fn ensure_provider_config(root: &Path) -> ShipitResult<bool> {
    let path = root.join(PROVIDER_CONFIG_FILE);
    if read_object(&path).is_some() {
        return Ok(false);
    }

    if path.exists() {
        tracing::warn!(path = %path.display(), "replacing invalid provider config");
    }
    write_safe_file(PROVIDER_CONFIG_FILE, &pretty(&json!({ "version": 2 }))?, root)?;
    Ok(true)
}

/// Remove `.vercel/` when its `project.json` is unusable.
///
/// Returns whether the directory was removed.
pub fn cleanup_linked_project(root: &Path) -> ShipitResult<bool> {
    let dir = resolve_safe_path(LINK_DIR, root)?;
    if !dir.is_dir() {
        return Ok(false);
    }

    let linked = read_object(&dir.join(LINK_FILE)).is_some_and(|project| {
        LINK_KEYS
            .iter()
            .all(|key| project.get(*key).and_then(Value::as_str).is_some_and(|v| !v.is_empty()))
    });
    if linked {
        return Ok(false);
    }

    fs::remove_dir_all(&dir)?;
    tracing::info!(path = %dir.display(), "removed stale linked project");
    Ok(true)
}

/// Rewrite the manifest `name` when the provider would reject it.
///
/// Returns `(old, new)` when a rewrite happened.
pub fn apply_package_name_fix(root: &Path) -> ShipitResult<Option<(String, String)>> {
    let path = root.join(MANIFEST_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ShipitError::MissingManifest {
                root: root.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };
    let mut manifest = Manifest::parse(&content).map_err(|e| ShipitError::InvalidJson {
        file: path.clone(),
        message: e.to_string(),
    })?;

    let Some(old) = manifest.name().map(str::to_string) else {
        return Ok(None);
    };
    if is_valid_package_name(&old) {
        return Ok(None);
    }

    let new = fix_package_name(&old);
    manifest.set_name(new.clone());
    write_safe_file(MANIFEST_FILE, &manifest.to_pretty_json()?, root)?;
    tracing::info!(%old, %new, "fixed package name");
    Ok(Some((old, new)))
}

/// Drop a no-op `buildCommand` from `vercel.json` so the framework default applies.
pub fn remove_placeholder_build_command(root: &Path) -> ShipitResult<bool> {
    let Some(mut config) = read_object(&root.join(PROVIDER_CONFIG_FILE)) else {
        return Ok(false);
    };

    let placeholder = config
        .get("buildCommand")
        .and_then(Value::as_str)
        .is_some_and(is_placeholder_build_command);
    if !placeholder {
        return Ok(false);
    }

    config.remove("buildCommand");
    write_safe_file(PROVIDER_CONFIG_FILE, &pretty(&config)?, root)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_is_created() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ensure_provider_config(dir.path()).unwrap());
        let written = fs::read_to_string(dir.path().join(PROVIDER_CONFIG_FILE)).unwrap();
        assert_eq!(written, "{\n  \"version\": 2\n}\n");
    }

    #[test]
    fn corrupt_config_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PROVIDER_CONFIG_FILE), "{ broken").unwrap();
        assert!(ensure_provider_config(dir.path()).unwrap());
        assert!(read_object(&dir.path().join(PROVIDER_CONFIG_FILE)).is_some());
    }

    #[test]
    fn ensure_step_is_byte_for_byte_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROVIDER_CONFIG_FILE);
        fs::write(&path, "{\"framework\":\"nextjs\",   \"version\": 2}").unwrap();

        assert!(!ensure_provider_config(dir.path()).unwrap());
        let first = fs::read(&path).unwrap();
        assert!(!ensure_provider_config(dir.path()).unwrap());
        assert_eq!(fs::read(&path).unwrap(), first);
        assert_eq!(first, b"{\"framework\":\"nextjs\",   \"version\": 2}");
    }

    #[test]
    fn link_missing_an_identifier_is_removed() {
        for body in [r#"{"orgId":"team_1"}"#, r#"{"projectId":"prj_1"}"#, "not json"] {
            let dir = tempfile::tempdir().unwrap();
            let link = dir.path().join(LINK_DIR);
            fs::create_dir(&link).unwrap();
            fs::write(link.join(LINK_FILE), body).unwrap();

            assert!(cleanup_linked_project(dir.path()).unwrap(), "{}", body);
            assert!(!link.exists());
        }
    }

    #[test]
    fn valid_link_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join(LINK_DIR);
        fs::create_dir(&link).unwrap();
        let body = r#"{"orgId":"team_1","projectId":"prj_1"}"#;
        fs::write(link.join(LINK_FILE), body).unwrap();

        assert!(!cleanup_linked_project(dir.path()).unwrap());
        assert_eq!(fs::read_to_string(link.join(LINK_FILE)).unwrap(), body);
    }

    #[test]
    fn no_link_directory_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!cleanup_linked_project(dir.path()).unwrap());
    }

    #[test]
    fn package_name_is_fixed_in_place() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"version":"0.1.0","name":"My__Cool_App","scripts":{"build":"next build"}}"#,
        )
        .unwrap();

        let change = apply_package_name_fix(dir.path()).unwrap();
        assert_eq!(change, Some(("My__Cool_App".to_string(), "my-cool-app".to_string())));

        let content = fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        assert!(content.find("version").unwrap() < content.find("name").unwrap());
        assert!(content.contains("\"build\": \"next build\""));
        assert_eq!(apply_package_name_fix(dir.path()).unwrap(), None);
    }

    #[test]
    fn package_name_fix_requires_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = apply_package_name_fix(dir.path()).unwrap_err();
        assert!(matches!(err, ShipitError::MissingManifest { .. }));
    }

    #[test]
    fn placeholder_build_command_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(PROVIDER_CONFIG_FILE),
            r#"{"version":2,"buildCommand":"echo 'Build completed'","framework":"nextjs"}"#,
        )
        .unwrap();

        assert!(remove_placeholder_build_command(dir.path()).unwrap());
        let config = read_object(&dir.path().join(PROVIDER_CONFIG_FILE)).unwrap();
        assert!(!config.contains_key("buildCommand"));
        assert_eq!(config.get("framework"), Some(&json!("nextjs")));
        assert!(!remove_placeholder_build_command(dir.path()).unwrap());
    }
}
