//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Navigation
    /// Select the previous (older) log line. Default: k/↑
    ScrollUp,
    /// Select the next (newer) log line. Default: j/↓
    ScrollDown,
    /// Move the selection up by one window height. Default: Ctrl+u/Page Up
    PageUp,
    /// Move the selection down by one window height. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the oldest retained line and stop following. Default: g/Home
    ScrollToTop,
    /// Jump to the newest line without changing follow mode. Default: G/End
    ScrollToBottom,

    // Pane behavior
    /// Toggle follow mode (selection tracks the newest line). Default: f
    ToggleFollow,
    /// Toggle line wrapping for the log pane. Default: w
    ToggleWrap,
    /// Toggle the bottom status toolbar. Default: t
    ToggleToolbar,
    /// Drop every buffered line and reset statistics. Default: c
    ClearLogs,

    // Application
    /// Show or hide the key binding help overlay. Default: F1/?
    ToggleHelp,
    /// Exit the application. Default: q/Ctrl+c/Ctrl+q
    Quit,
}

/// Help overlay section an action is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HelpSection {
    /// Selection movement
    Navigation,
    /// Pane toggles and buffer operations
    LogPane,
    /// Help and quit
    Application,
}

impl HelpSection {
    /// Heading shown in the help overlay.
    pub fn title(self) -> &'static str {
        match self {
            HelpSection::Navigation => "Navigation",
            HelpSection::LogPane => "Log Pane",
            HelpSection::Application => "Application",
        }
    }
}

impl KeyAction {
    /// Every action, in help overlay order.
    pub const ALL: [KeyAction; 12] = [
        KeyAction::ScrollUp,
        KeyAction::ScrollDown,
        KeyAction::PageUp,
        KeyAction::PageDown,
        KeyAction::ScrollToTop,
        KeyAction::ScrollToBottom,
        KeyAction::ToggleFollow,
        KeyAction::ToggleWrap,
        KeyAction::ToggleToolbar,
        KeyAction::ClearLogs,
        KeyAction::ToggleHelp,
        KeyAction::Quit,
    ];

    /// One-line description shown in the help overlay.
    pub fn description(self) -> &'static str {
        match self {
            KeyAction::ScrollUp => "Select previous line",
            KeyAction::ScrollDown => "Select next line",
            KeyAction::PageUp => "Page up",
            KeyAction::PageDown => "Page down",
            KeyAction::ScrollToTop => "Jump to oldest line",
            KeyAction::ScrollToBottom => "Jump to newest line",
            KeyAction::ToggleFollow => "Toggle follow mode",
            KeyAction::ToggleWrap => "Toggle line wrapping",
            KeyAction::ToggleToolbar => "Toggle status bar",
            KeyAction::ClearLogs => "Clear all logs",
            KeyAction::ToggleHelp => "Toggle this help",
            KeyAction::Quit => "Quit",
        }
    }

    /// Section the action is listed under in the help overlay.
    pub fn help_section(self) -> HelpSection {
        if self.is_navigation() {
            return HelpSection::Navigation;
        }
        match self {
            KeyAction::ToggleHelp | KeyAction::Quit => HelpSection::Application,
            _ => HelpSection::LogPane,
        }
    }

    /// Whether this action only moves the selection.
    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            KeyAction::ScrollUp
                | KeyAction::ScrollDown
                | KeyAction::PageUp
                | KeyAction::PageDown
                | KeyAction::ScrollToTop
                | KeyAction::ScrollToBottom
        )
    }
}
