use crate::domain::entities::PrerequisiteResult;
use crate::ui::primitives::icon::Icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CheckItem {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub remediation: Vec<String>,
}

impl From<&PrerequisiteResult> for CheckItem {
    fn from(result: &PrerequisiteResult) -> Self {
        let status = match (result.passed, result.is_critical()) {
            (true, _) => CheckStatus::Pass,
            (false, true) => CheckStatus::Error,
            (false, false) => CheckStatus::Warning,
        };
        Self {
            name: result.name.clone(),
            status,
            message: result.message.clone(),
            remediation: result.remediation.clone(),
        }
    }
}

impl CheckItem {
    /// One line per check; remediation steps follow a failure.
    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let icon = match self.status {
            CheckStatus::Pass => Icon::Success,
            CheckStatus::Warning => Icon::Warning,
            CheckStatus::Error => Icon::Error,
        }
        .colored(supports_color, supports_unicode);

        let mut out = format!("  {} {} - {}\n", icon, self.name, self.message);
        if self.status != CheckStatus::Pass {
            let arrow = Icon::Arrow.colored(supports_color, supports_unicode);
            for step in &self.remediation {
                out.push_str(&format!("    {} {}\n", arrow, step));
            }
        }
        out
    }
}
