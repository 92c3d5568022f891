//! Doctor command: read-only diagnostics.

use std::path::Path;

use anyhow::Result;

use super::{GlobalArgs, Session};
use crate::application::{check_environment, PrerequisiteChecker};
use crate::config::{config_path, Config};
use crate::ui::blocks::check_item::CheckItem;
use crate::ui::blocks::env_table::render_env_table;
use crate::ui::primitives::icon::Icon;

pub fn cmd_doctor(path: &Path, globals: GlobalArgs) -> Result<()> {
    let session = Session::open(path, globals)?;
    let ui = session.ui;

    println!("{} Shipit Doctor", Icon::Check.colored(ui.color, ui.unicode));
    println!("Project: {}\n", session.root.display());

    println!("Prerequisites");
    let summary = PrerequisiteChecker::new(session.services(), &session.root).run(false);
    for result in &summary.results {
        print!("{}", CheckItem::from(result).render(ui.color, ui.unicode));
    }

    println!("\nEnvironment");
    let statuses = check_environment(session.services(), &session.root);
    print!("{}", render_env_table(&statuses, ui.color, ui.unicode));

    println!("\nConfiguration");
    match config_path(Some(&session.root)) {
        None => println!("  {} using defaults", Icon::Info.colored(ui.color, ui.unicode)),
        Some(file) => match Config::load_with_warnings(&file) {
            Ok((_, warnings)) if warnings.is_empty() => println!(
                "  {} {}",
                Icon::Success.colored(ui.color, ui.unicode),
                file.display()
            ),
            Ok((_, warnings)) => {
                for w in warnings {
                    let location = w.line.map(|l| format!(":{}", l)).unwrap_or_default();
                    let hint = w
                        .suggestion
                        .map(|s| format!(" (did you mean '{}'?)", s))
                        .unwrap_or_default();
                    println!(
                        "  {} unknown key '{}' in {}{}{}",
                        Icon::Warning.colored(ui.color, ui.unicode),
                        w.key,
                        w.file.display(),
                        location,
                        hint
                    );
                }
            }
            Err(e) => println!("  {} {}", Icon::Error.colored(ui.color, ui.unicode), e),
        },
    }

    let failed = summary.failed_critical_names();
    let missing_env: Vec<&str> = statuses
        .iter()
        .filter(|s| s.spec.required && !s.is_set())
        .map(|s| s.spec.name)
        .collect();

    println!();
    if failed.is_empty() && missing_env.is_empty() {
        println!("{} Ready to deploy", Icon::Success.colored(ui.color, ui.unicode));
        return Ok(());
    }
    if !missing_env.is_empty() {
        println!(
            "{} Missing environment: {} (run `shipit fix`)",
            Icon::Warning.colored(ui.color, ui.unicode),
            missing_env.join(", ")
        );
    }
    if !failed.is_empty() {
        anyhow::bail!("critical checks failed: {}", failed.join(", "));
    }
    Ok(())
}
