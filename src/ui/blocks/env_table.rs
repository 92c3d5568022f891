use crate::application::env_vars::EnvVarStatus;
use crate::ui::primitives::icon::Icon;

/// One line per catalog variable. Secrets are masked.
pub fn render_env_table(statuses: &[EnvVarStatus], color: bool, unicode: bool) -> String {
    let width = statuses.iter().map(|s| s.spec.name.len()).max().unwrap_or(0);
    let mut out = String::new();

    for status in statuses {
        let (icon, note) = match (status.is_set(), status.is_valid(), status.spec.required) {
            (true, true, _) => (Icon::Success, String::new()),
            (true, false, _) => (Icon::Warning, " (invalid)".to_string()),
            (false, _, true) => (Icon::Error, " (required)".to_string()),
            (false, _, false) => match status.spec.default {
                Some(default) => (Icon::Info, format!(" (default {})", default)),
                None => (Icon::Info, " (optional)".to_string()),
            },
        };
        out.push_str(&format!(
            "  {} {:<width$}  {}{}\n",
            icon.colored(color, unicode),
            status.spec.name,
            status.display_value(),
            note,
            width = width
        ));
    }
    out
}
