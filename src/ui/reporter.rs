//! Console reporter
//!
//! Renders `Reporter` lines with the icons and colors from the theme.
//! Errors go to stderr, everything else to stdout.

use crossterm::style::Stylize;

use crate::domain::ports::{Level, Reporter};
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;

#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    color: bool,
    unicode: bool,
}

impl ConsoleReporter {
    pub fn new(ui: &UiContext) -> Self {
        Self {
            color: ui.color,
            unicode: ui.unicode,
        }
    }

    pub fn plain() -> Self {
        Self {
            color: false,
            unicode: false,
        }
    }

    pub fn format_line(&self, level: Level, message: &str) -> String {
        let icon = match level {
            Level::Step => Icon::Step,
            Level::Info => Icon::Info,
            Level::Success => Icon::Success,
            Level::Warning => Icon::Warning,
            Level::Error => Icon::Error,
        };
        let icon = icon.colored(self.color, self.unicode);

        match level {
            Level::Step if self.color => format!("\n{} {}", icon, message.bold()),
            Level::Step => format!("\n{} {}", icon, message),
            // Checklist rows are already indented; keep them aligned under the heading.
            Level::Info if message.starts_with("  ") => format!("  {}", message),
            _ => format!("{} {}", icon, message),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn emit(&self, level: Level, message: &str) {
        let line = self.format_line(level, message);
        match level {
            Level::Error => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_use_ascii_icons() {
        let r = ConsoleReporter::plain();
        assert_eq!(r.format_line(Level::Success, "Build succeeded"), "[OK] Build succeeded");
        assert_eq!(r.format_line(Level::Warning, "slow"), "[WARN] slow");
        assert_eq!(r.format_line(Level::Step, "Deploying"), "\n==> Deploying");
    }

    #[test]
    fn checklist_rows_stay_indented() {
        let r = ConsoleReporter::plain();
        assert_eq!(r.format_line(Level::Info, "  1. vercel login"), "    1. vercel login");
    }
}
