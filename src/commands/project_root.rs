use std::path::{Path, PathBuf};

/// Discover the project root directory from an invocation directory.
///
/// Heuristics (first match wins, walking upward from `start`):
/// - `package.json` (the manifest every deployable project has)
/// - `.git/` or `.git` file (git repo root / worktree)
///
/// Falls back to `start` when no markers are found.
pub(crate) fn discover_project_root(start: &Path) -> PathBuf {
    for dir in start.ancestors() {
        if dir.join("package.json").is_file() {
            return dir.to_path_buf();
        }
        if dir.join(".git").exists() {
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}

/// Absolute form of a CLI path argument.
pub(crate) fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn nearest_manifest_wins_over_outer_repository() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::create_dir_all(root.join("apps/web/src")).unwrap();
        std::fs::write(root.join("apps/web/package.json"), "{}").unwrap();

        let found = discover_project_root(&root.join("apps/web/src"));
        assert_eq!(found, root.join("apps/web"));
    }

    #[test]
    fn repository_root_is_used_without_manifest() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::create_dir_all(root.join("src")).unwrap();

        assert_eq!(discover_project_root(&root.join("src")), root);
    }

    #[test]
    fn falls_back_to_start() {
        let dir = tempdir().unwrap();
        let start = dir.path().join("empty");
        std::fs::create_dir_all(&start).unwrap();

        assert_eq!(discover_project_root(&start), start);
    }
}
