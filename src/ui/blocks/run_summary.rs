use crate::application::{RunReport, Transport};
use crate::ui::primitives::icon::Icon;
use crate::ui::theme;

/// Closing block after a successful run.
pub fn render_run_summary(report: &RunReport, production: bool, color: bool, unicode: bool) -> String {
    let target = if production { "production" } else { "preview" };
    let project = report.project.as_deref().unwrap_or("project");

    let mut out = String::new();
    out.push_str(&theme::rule(40, unicode));
    out.push('\n');
    out.push_str(&format!(
        "{} Deployed {} to {} in {}s\n",
        Icon::Success.colored(color, unicode),
        project,
        target,
        report.elapsed_secs()
    ));
    if let Some(url) = &report.deploy.url {
        out.push_str(&format!("  URL:       {}\n", url));
    }
    out.push_str(&format!("  Strategy:  {}\n", report.deploy.strategy));

    let transport = match report.transport {
        Transport::Ssh => "SSH",
        Transport::HttpsToken { .. } => "HTTPS token",
    };
    out.push_str(&format!("  Push via:  {}\n", transport));

    let commit = if report.committed {
        "created"
    } else {
        "skipped (clean tree)"
    };
    out.push_str(&format!("  Commit:    {}\n", commit));
    if !report.built {
        out.push_str("  Build:     none detected\n");
    }
    if !report.env_written.is_empty() {
        out.push_str(&format!("  Saved:     {}\n", report.env_written.join(", ")));
    }
    out
}
