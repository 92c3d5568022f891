//! Misplaced-file scan
//!
//! Finds entries under the project whose resolved location (through
//! symlinks or `..` traversal) lies outside the root, and optionally pulls
//! copies of them into the root.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::value_objects::resolve_safe_path;
use crate::error::ShipitResult;

/// Directory names never descended into. Hidden directories are skipped too.
pub const SKIP_DIRS: &[&str] = &["node_modules", "target"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MisplacedFile {
    /// Entry as found in the tree
    pub path: PathBuf,
    /// Where it actually resolves
    pub resolved: PathBuf,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub moved: Vec<(PathBuf, PathBuf)>,
    /// Entries left in place, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

pub fn scan_misplaced(root: &Path) -> ShipitResult<Vec<MisplacedFile>> {
    let canonical_root = root.canonicalize()?;
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .ignore(false)
        .parents(false)
        .follow_links(false)
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_dir()) {
                return true;
            }
            let name = entry.file_name();
            let hidden = name.to_str().is_some_and(|n| n.starts_with('.'));
            !hidden && !SKIP_DIRS.iter().any(|d| name == *d)
        })
        .build();

    let mut found = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        let path = entry.path();
        let resolved = match path.canonicalize() {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "cannot resolve");
                continue;
            }
        };
        if !resolved.starts_with(&canonical_root) {
            found.push(MisplacedFile {
                path: path.to_path_buf(),
                resolved,
            });
        }
    }

    tracing::debug!(root = %root.display(), count = found.len(), "misplaced scan");
    Ok(found)
}

/// Copy each misplaced file to `root/<file name>` and remove the entry.
///
/// The first file claiming a name wins; later ones are skipped.
pub fn relocate(root: &Path, files: &[MisplacedFile]) -> ShipitResult<Relocation> {
    let mut relocation = Relocation::default();

    for file in files {
        if !file.resolved.is_file() {
            relocation
                .skipped
                .push((file.path.clone(), "not a regular file".to_string()));
            continue;
        }
        let Some(name) = file.path.file_name() else {
            relocation
                .skipped
                .push((file.path.clone(), "no file name".to_string()));
            continue;
        };

        let destination = resolve_safe_path(name, root)?;
        if destination.symlink_metadata().is_ok() {
            relocation.skipped.push((
                file.path.clone(),
                format!("{} already exists", destination.display()),
            ));
            continue;
        }

        fs::copy(&file.resolved, &destination)?;
        fs::remove_file(&file.path)?;
        tracing::info!(from = %file.path.display(), to = %destination.display(), "relocated");
        relocation.moved.push((file.path.clone(), destination));
    }

    Ok(relocation)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;

    struct Fixture {
        _outside: tempfile::TempDir,
        outside: PathBuf,
        root_dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let outside_dir = tempfile::tempdir().unwrap();
            let outside = outside_dir.path().canonicalize().unwrap();
            Self {
                _outside: outside_dir,
                outside,
                root_dir: tempfile::tempdir().unwrap(),
            }
        }

        fn root(&self) -> &Path {
            self.root_dir.path()
        }

        fn outside_file(&self, name: &str, content: &str) -> PathBuf {
            let path = self.outside.join(name);
            fs::write(&path, content).unwrap();
            path
        }
    }

    #[test]
    fn symlink_escaping_root_is_flagged() {
        let fx = Fixture::new();
        let target = fx.outside_file("secrets.env", "A=1");
        fs::create_dir(fx.root().join("src")).unwrap();
        symlink(&target, fx.root().join("src/secrets.env")).unwrap();
        fs::write(fx.root().join("src/index.js"), "").unwrap();

        let found = scan_misplaced(fx.root()).unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, fx.root().join("src/secrets.env"));
        assert_eq!(found[0].resolved, target);
    }

    #[test]
    fn internal_symlinks_and_skipped_dirs_are_ignored() {
        let fx = Fixture::new();
        let target = fx.outside_file("lib.js", "");
        fs::write(fx.root().join("a.js"), "").unwrap();
        symlink(fx.root().join("a.js"), fx.root().join("b.js")).unwrap();
        fs::create_dir(fx.root().join("node_modules")).unwrap();
        symlink(&target, fx.root().join("node_modules/lib.js")).unwrap();
        fs::create_dir(fx.root().join(".cache")).unwrap();
        symlink(&target, fx.root().join(".cache/lib.js")).unwrap();

        assert!(scan_misplaced(fx.root()).unwrap().is_empty());
    }

    #[test]
    fn hidden_file_escaping_root_is_flagged() {
        let fx = Fixture::new();
        let target = fx.outside_file("prod.env", "TOKEN=x");
        symlink(&target, fx.root().join(".env.production")).unwrap();

        let found = scan_misplaced(fx.root()).unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, fx.root().join(".env.production"));
        assert_eq!(found[0].resolved, target);
    }

    #[test]
    fn relocation_copies_into_root_and_removes_link() {
        let fx = Fixture::new();
        let target = fx.outside_file("notes.md", "hello");
        fs::create_dir(fx.root().join("docs")).unwrap();
        symlink(&target, fx.root().join("docs/notes.md")).unwrap();

        let found = scan_misplaced(fx.root()).unwrap();
        let result = relocate(fx.root(), &found).unwrap();

        let dest = fx.root().join("notes.md");
        assert_eq!(result.moved.len(), 1);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "hello");
        assert!(fs::symlink_metadata(fx.root().join("docs/notes.md")).is_err());
        assert!(target.exists());
    }

    #[test]
    fn first_writer_wins_on_name_collision() {
        let fx = Fixture::new();
        let first = fx.outside_file("config.json", "first");
        let other = tempfile::tempdir().unwrap();
        let second = other.path().join("config.json");
        fs::write(&second, "second").unwrap();

        fs::create_dir(fx.root().join("a")).unwrap();
        fs::create_dir(fx.root().join("b")).unwrap();
        symlink(&first, fx.root().join("a/config.json")).unwrap();
        symlink(&second, fx.root().join("b/config.json")).unwrap();

        let files = vec![
            MisplacedFile {
                path: fx.root().join("a/config.json"),
                resolved: first.clone(),
            },
            MisplacedFile {
                path: fx.root().join("b/config.json"),
                resolved: second.canonicalize().unwrap(),
            },
        ];
        let result = relocate(fx.root(), &files).unwrap();

        assert_eq!(result.moved.len(), 1);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(fs::read_to_string(fx.root().join("config.json")).unwrap(), "first");
        assert!(fs::symlink_metadata(fx.root().join("b/config.json")).is_ok());
    }
}
