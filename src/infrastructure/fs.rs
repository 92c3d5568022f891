//! Guarded file writes
//!
//! The only way Shipit writes project files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::resolve_safe_path;
use crate::error::ShipitResult;

/// Write `content` to `relative` under `root`, refusing paths that escape it.
///
/// Content goes to a temp file in the same directory first and is then
/// renamed over the target, so a crash never leaves a half-written file.
pub fn write_safe_file(
    relative: impl AsRef<Path>,
    content: &str,
    root: impl AsRef<Path>,
) -> ShipitResult<PathBuf> {
    let target = resolve_safe_path(relative, root)?;
    let dir = target
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist(&target).map_err(|e| e.error)?;

    tracing::debug!(path = %target.display(), bytes = content.len(), "wrote file");
    Ok(target)
}
