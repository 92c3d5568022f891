//! Fix command: repair common deployment problems in place.

use std::path::Path;

use anyhow::Result;

use super::{GlobalArgs, Session};
use crate::application::provider::{
    apply_package_name_fix, cleanup_linked_project, ensure_provider_config,
    remove_placeholder_build_command,
};
use crate::application::{discover_project_context, ensure_environment, Git, PrerequisiteChecker};
use crate::domain::entities::FixOutcome;
use crate::domain::ports::Reporter;
use crate::error::ShipitError;
use crate::ui::blocks::check_item::CheckItem;

pub fn cmd_fix(path: &Path, globals: GlobalArgs) -> Result<()> {
    let session = Session::open(path, globals)?;
    let services = session.services();
    let reporter = session.reporter();
    let root = session.root.as_path();

    reporter.step("Repairing project files");
    let mut changed = 0;

    // MissingManifest stops here, before git init.
    if let Some((old, new)) = apply_package_name_fix(root)? {
        reporter.success(&format!("Renamed package '{}' to '{}'", old, new));
        changed += 1;
    }
    let git = Git::new(services, root);
    if !git.is_repository() {
        git.init()?;
        reporter.success("Initialized git repository");
        changed += 1;
    }
    if cleanup_linked_project(root)? {
        reporter.success("Removed incomplete .vercel link (it will be recreated)");
        changed += 1;
    }
    if discover_project_context(root).has_placeholder_build() && remove_placeholder_build_command(root)? {
        reporter.success("Removed placeholder buildCommand from vercel.json");
        changed += 1;
    }
    if ensure_provider_config(root)? {
        reporter.success("Wrote minimal vercel.json");
        changed += 1;
    }
    if changed == 0 {
        reporter.info("Project files look fine");
    }

    reporter.step("Fixing prerequisites");
    let summary = PrerequisiteChecker::new(services, root).run(true);
    for fix in &summary.fixes {
        match fix {
            FixOutcome::Fixed { name } => reporter.success(&format!("Fixed {}", name)),
            FixOutcome::Failed { name, error } => {
                reporter.warning(&format!("Could not fix {}: {}", name, error))
            }
        }
    }
    for issue in summary.issues() {
        print!("{}", CheckItem::from(issue).render(session.ui.color, session.ui.unicode));
    }

    reporter.step("Checking environment");
    match ensure_environment(services, root, session.ui.interactive) {
        Ok(_) => {}
        Err(ShipitError::MissingRequiredInput { name }) => {
            reporter.warning(&format!("{} still missing; add it to .env.local", name));
        }
        Err(e) => return Err(e.into()),
    }

    if summary.critical_passed() {
        reporter.success("Ready to deploy");
    } else {
        reporter.warning(&format!(
            "Still missing: {}",
            summary.failed_critical_names().join(", ")
        ));
    }
    Ok(())
}
