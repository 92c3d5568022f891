//! Analyze command: what Shipit detects about a project.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{GlobalArgs, Session};
use crate::application::{check_environment, discover_project_context};
use crate::domain::entities::ProjectContext;
use crate::ui::blocks::env_table::render_env_table;
use crate::ui::primitives::icon::Icon;

pub fn cmd_analyze(path: &Path, globals: GlobalArgs) -> Result<()> {
    let session = Session::open(path, globals)?;
    let ui = session.ui;
    let context = discover_project_context(&session.root);

    println!("{} Project analysis", Icon::Check.colored(ui.color, ui.unicode));
    print!("{}", render_context(&context, ui.color, ui.unicode));

    println!("\nEnvironment");
    let statuses = check_environment(session.services(), &session.root);
    print!("{}", render_env_table(&statuses, ui.color, ui.unicode));
    Ok(())
}

fn names(paths: &[PathBuf], root: &Path) -> String {
    if paths.is_empty() {
        return "none".to_string();
    }
    paths
        .iter()
        .map(|p| p.strip_prefix(root).unwrap_or(p).display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn render_context(context: &ProjectContext, color: bool, unicode: bool) -> String {
    let root = context.root();
    let mut out = String::new();

    out.push_str(&format!("  Root:           {}\n", root.display()));
    let project = match (&context.manifest_error, context.project_name()) {
        (Some(_), _) => "package.json is not valid JSON",
        (None, Some(name)) => name,
        (None, None) if context.has_manifest() => "(unnamed)",
        (None, None) => "no package.json",
    };
    out.push_str(&format!("  Project:        {}\n", project));
    out.push_str(&format!(
        "  Framework:      {}\n",
        context.framework.map_or("unknown", |f| f.label())
    ));
    out.push_str(&format!("  Strategy:       {}\n", context.strategy.label()));
    out.push_str(&format!(
        "  Build command:  {}\n",
        context.build_command.as_deref().unwrap_or("none")
    ));
    out.push_str(&format!(
        "  Git repository: {}\n",
        if context.is_git_repo { "yes" } else { "no" }
    ));
    out.push_str(&format!("  Env files:      {}\n", names(&context.env_files, root)));
    out.push_str(&format!("  Docs:           {}\n", names(&context.docs, root)));

    if let Some(message) = &context.manifest_error {
        out.push_str(&format!(
            "  {} package.json: {}\n",
            Icon::Error.colored(color, unicode),
            message
        ));
    }
    if context.has_placeholder_build() {
        out.push_str(&format!(
            "  {} placeholder build command on a full-stack framework (run `shipit fix`)\n",
            Icon::Warning.colored(color, unicode)
        ));
    }
    out
}
