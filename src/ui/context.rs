use crate::config::{ColorMode, Config};
use crate::presentation::ColorWhen;
use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub verbose: u8,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
    /// Prompts may be shown
    pub interactive: bool,
}

impl UiContext {
    pub fn new(verbose: u8, cli_color: Option<ColorWhen>, assume_yes: bool, config: &Config) -> Self {
        let caps = detect_capabilities();
        Self::from_caps(verbose, cli_color, assume_yes, config, caps)
    }

    pub(crate) fn from_caps(
        verbose: u8,
        cli_color: Option<ColorWhen>,
        assume_yes: bool,
        config: &Config,
        caps: TerminalCapabilities,
    ) -> Self {
        let unicode = config.output.unicode && caps.supports_unicode;

        let color = match cli_color {
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Auto) | None => match config.output.color {
                ColorMode::Never => false,
                ColorMode::Always => true,
                ColorMode::Auto => caps.supports_color && !caps.is_ci,
            },
        };

        Self {
            verbose,
            caps,
            color,
            unicode,
            interactive: caps.is_interactive && !assume_yes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ci_caps() -> TerminalCapabilities {
        TerminalCapabilities {
            is_tty: true,
            is_interactive: false,
            supports_color: true,
            supports_unicode: true,
            is_ci: true,
            width: 120,
        }
    }

    fn tty_caps() -> TerminalCapabilities {
        TerminalCapabilities {
            is_interactive: true,
            is_ci: false,
            ..ci_caps()
        }
    }

    #[test]
    fn ci_defaults_to_no_color_when_auto() {
        let ui = UiContext::from_caps(0, None, false, &Config::default(), ci_caps());
        assert!(!ui.color);
        assert!(!ui.interactive);
    }

    #[test]
    fn explicit_color_flag_wins_over_ci() {
        let ui = UiContext::from_caps(0, Some(ColorWhen::Always), false, &Config::default(), ci_caps());
        assert!(ui.color);
    }

    #[test]
    fn config_can_disable_unicode() {
        let mut config = Config::default();
        config.output.unicode = false;
        let ui = UiContext::from_caps(0, None, false, &config, tty_caps());
        assert!(!ui.unicode);
        assert!(ui.color);
    }

    #[test]
    fn yes_flag_turns_off_prompts() {
        let config = Config::default();
        assert!(UiContext::from_caps(0, None, false, &config, tty_caps()).interactive);
        assert!(!UiContext::from_caps(0, None, true, &config, tty_caps()).interactive);
    }
}
