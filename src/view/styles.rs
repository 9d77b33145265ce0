//! Log pane styling configuration.

use ratatui::style::{Color, Modifier, Style};

/// Background of the selected log line (`#3e4452`).
pub const SELECTED_LINE_BG: Color = Color::Rgb(0x3e, 0x44, 0x52);
/// Status bar background (`#fdd1ff`).
pub const BAR_BG: Color = Color::Rgb(0xfd, 0xd1, 0xff);
/// Status bar foreground (`#432445`).
pub const BAR_FG: Color = Color::Rgb(0x43, 0x24, 0x45);

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Colors are disabled when the `NO_COLOR` environment variable is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Read the color preference from the environment.
    pub fn from_env() -> Self {
        Self::new(std::env::var_os("NO_COLOR").is_none())
    }

    /// Explicit color preference.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== PaneStyles =====

/// Styles used by the log pane and its status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneStyles {
    /// Highlight for the selected log line
    pub selected_line: Style,
    /// Status bar background and default text
    pub toolbar: Style,
    /// ` Logs ` badge at the left of the status bar
    pub toolbar_logo: Style,
    /// Key hints in the status bar
    pub toolbar_key: Style,
}

impl PaneStyles {
    /// Create styles honoring the color configuration.
    ///
    /// Without colors the selection falls back to reverse video so it stays
    /// visible.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            let bar = Style::default().bg(BAR_BG).fg(BAR_FG);
            Self {
                selected_line: Style::default().bg(SELECTED_LINE_BG),
                toolbar: bar,
                toolbar_logo: bar.add_modifier(Modifier::BOLD),
                toolbar_key: bar.add_modifier(Modifier::UNDERLINED),
            }
        } else {
            Self {
                selected_line: Style::default().add_modifier(Modifier::REVERSED),
                toolbar: Style::default().add_modifier(Modifier::REVERSED),
                toolbar_logo: Style::default()
                    .add_modifier(Modifier::REVERSED | Modifier::BOLD),
                toolbar_key: Style::default().add_modifier(Modifier::REVERSED),
            }
        }
    }
}

impl Default for PaneStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::new(true))
    }
}
