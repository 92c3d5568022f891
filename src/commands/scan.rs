//! Scan command: find and optionally pull in misplaced files.

use std::path::Path;

use anyhow::Result;

use super::{GlobalArgs, Session};
use crate::application::misplaced::{relocate, scan_misplaced};
use crate::domain::ports::Reporter;

pub fn cmd_scan(path: &Path, fix: bool, globals: GlobalArgs) -> Result<()> {
    let session = Session::open(path, globals)?;
    let reporter = session.reporter();
    let root = session.root.as_path();

    reporter.step(&format!("Scanning {}", root.display()));
    let found = scan_misplaced(root)?;
    if found.is_empty() {
        reporter.success("No files resolve outside the project");
        return Ok(());
    }

    reporter.warning(&format!("{} file(s) resolve outside the project:", found.len()));
    for file in &found {
        let shown = file.path.strip_prefix(root).unwrap_or(&file.path);
        reporter.info(&format!("  {} -> {}", shown.display(), file.resolved.display()));
    }

    let apply = fix
        || session
            .prompter()
            .confirm("Copy them into the project root?", false)?;
    if !apply {
        reporter.info("Left in place. Re-run with `shipit scan --fix` to relocate.");
        return Ok(());
    }

    let result = relocate(root, &found)?;
    for (from, to) in &result.moved {
        reporter.success(&format!("{} -> {}", from.display(), to.display()));
    }
    for (path, reason) in &result.skipped {
        reporter.warning(&format!("Skipped {}: {}", path.display(), reason));
    }
    Ok(())
}
