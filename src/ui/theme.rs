use crossterm::style::Color;

/// Design tokens for Shipit terminal output.
///
/// All icons and colors used by reporters and blocks come from here.
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const INFO: &str = "ℹ";
    pub const STEP: &str = "▶";
    pub const ARROW: &str = "↳";

    pub const DEPLOY: &str = "🚀";
    pub const CHECK: &str = "🔍";
    pub const KEY: &str = "🔑";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const INFO: &str = "[i]";
    pub const STEP: &str = "==>";
    pub const ARROW: &str = "[>]";

    pub const DEPLOY: &str = "[DEPLOY]";
    pub const CHECK: &str = "[CHECK]";
    pub const KEY: &str = "[SSH]";
}

pub mod borders {
    pub const HORIZONTAL: &str = "─";
}

pub mod borders_ascii {
    pub const HORIZONTAL: &str = "-";
}

/// Horizontal rule of `width` characters.
pub fn rule(width: usize, unicode: bool) -> String {
    let piece = if unicode {
        borders::HORIZONTAL
    } else {
        borders_ascii::HORIZONTAL
    };
    piece.repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_falls_back_to_ascii() {
        assert_eq!(rule(3, false), "---");
        assert_eq!(rule(2, true), "──");
    }
}
