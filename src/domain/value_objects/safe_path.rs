//! Path Guard
//!
//! Every file write performed by Shipit goes through `resolve_safe_path`,
//! which guarantees the target stays inside the project root:
//! - Relative destinations are joined onto the root
//! - `.` and `..` components are resolved lexically (no filesystem access)
//! - The result must be a component-wise descendant of the root

use std::path::{Component, Path, PathBuf};

use crate::error::{ShipitError, ShipitResult};

/// Lexically normalize a path, resolving `.` and `..` without touching disk.
///
/// `..` at the filesystem root is dropped, matching how the OS resolves `/..`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                ) && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Resolve `destination` against `root` and reject anything that escapes it.
///
/// The root itself is normalized first, so callers may pass either an
/// absolute root or one relative to the current directory.
pub fn resolve_safe_path(destination: impl AsRef<Path>, root: impl AsRef<Path>) -> ShipitResult<PathBuf> {
    let destination = destination.as_ref();
    let root = absolute_root(root.as_ref())?;

    let joined = if destination.is_absolute() {
        destination.to_path_buf()
    } else {
        root.join(destination)
    };
    let resolved = normalize(&joined);

    // `Path::starts_with` compares whole components, so `/a/bc` is not under `/a/b`.
    if resolved.starts_with(&root) {
        Ok(resolved)
    } else {
        Err(ShipitError::OutOfRoot {
            path: destination.to_path_buf(),
            root,
        })
    }
}

fn absolute_root(root: &Path) -> ShipitResult<PathBuf> {
    if root.is_absolute() {
        Ok(normalize(root))
    } else {
        Ok(normalize(&std::env::current_dir()?.join(root)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        if cfg!(windows) {
            PathBuf::from(r"C:\work\app")
        } else {
            PathBuf::from("/work/app")
        }
    }

    #[test]
    fn relative_destination_resolves_under_root() {
        let resolved = resolve_safe_path("src/index.js", root()).unwrap();
        assert_eq!(resolved, root().join("src").join("index.js"));
    }

    #[test]
    fn inner_traversal_that_stays_inside_is_allowed() {
        let resolved = resolve_safe_path("src/../vercel.json", root()).unwrap();
        assert_eq!(resolved, root().join("vercel.json"));
    }

    #[test]
    fn parent_escape_is_rejected() {
        let err = resolve_safe_path("../secrets.txt", root()).unwrap_err();
        assert!(matches!(err, ShipitError::OutOfRoot { .. }));
    }

    #[test]
    fn deep_escape_is_rejected() {
        assert!(resolve_safe_path("a/b/../../../x", root()).is_err());
    }

    #[test]
    fn absolute_path_outside_root_is_rejected() {
        let outside = if cfg!(windows) { r"C:\etc\passwd" } else { "/etc/passwd" };
        assert!(resolve_safe_path(outside, root()).is_err());
    }

    #[test]
    fn absolute_path_inside_root_is_allowed() {
        let inside = root().join(".env");
        assert_eq!(resolve_safe_path(&inside, root()).unwrap(), inside);
    }

    #[test]
    fn sibling_with_shared_prefix_is_rejected() {
        let sibling = root().with_file_name("app-evil").join("file");
        assert!(resolve_safe_path(&sibling, root()).is_err());
    }

    #[test]
    fn root_itself_is_accepted() {
        assert_eq!(resolve_safe_path(".", root()).unwrap(), root());
    }

    #[test]
    fn normalize_collapses_cur_and_parent_dirs() {
        assert_eq!(normalize(Path::new("a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize(Path::new("../x")), PathBuf::from("../x"));
    }
}
