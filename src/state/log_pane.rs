//! Log pane state: buffer handle, viewport, renderer, and pane toggles.
//!
//! Pure state machine driven by [`KeyAction`]s and mouse input; the
//! terminal side lives in [`crate::view`].

use super::log_sink::LogSink;
use crate::model::KeyAction;
use crate::view_state::{
    CursorPosition, Fragment, RenderEngine, ViewportController, ViewportDimensions,
};
use ratatui::style::Style;
use tracing::debug;

#[cfg(test)]
#[path = "log_pane_tests.rs"]
mod tests;

/// Initial toggles for a log pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogPaneOptions {
    /// Track the newest line as it arrives
    pub follow: bool,
    /// Wrap lines wider than the pane
    pub wrap_lines: bool,
    /// Show the status bar under the pane
    pub show_toolbar: bool,
}

impl Default for LogPaneOptions {
    fn default() -> Self {
        Self {
            follow: true,
            wrap_lines: true,
            show_toolbar: true,
        }
    }
}

/// Data shown in the pane's status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarStatus {
    /// Follow mode is on
    pub following: bool,
    /// Line wrapping is on
    pub wrap_lines: bool,
    /// Retained line count
    pub total_count: usize,
    /// Human-readable buffer size
    pub byte_size: String,
    /// `name: count` pairs per channel
    pub channel_summary: String,
}

/// State for one log pane.
///
/// The buffer is shared with producers through [`LogSink`]; the viewport
/// and renderer belong to the UI thread alone.
#[derive(Debug)]
pub struct LogPaneState {
    sink: LogSink,
    viewport: ViewportController,
    renderer: RenderEngine,
    wrap_lines: bool,
    show_toolbar: bool,
}

impl LogPaneState {
    /// Create a pane over `sink`.
    ///
    /// # Arguments
    /// * `sink` - Shared buffer handle, usually also held by the tracing layer
    /// * `options` - Initial follow/wrap/toolbar toggles
    /// * `selected_style` - Highlight applied to the selected line
    pub fn new(sink: LogSink, options: LogPaneOptions, selected_style: Style) -> Self {
        Self {
            sink,
            viewport: ViewportController::new(options.follow),
            renderer: RenderEngine::new(selected_style),
            wrap_lines: options.wrap_lines,
            show_toolbar: options.show_toolbar,
        }
    }

    /// Apply a navigation or toggle action.
    ///
    /// Returns `true` if the action was handled here. `Quit` and
    /// `ToggleHelp` are left to the caller.
    pub fn handle_action(&mut self, action: KeyAction) -> bool {
        let total = self.sink.total_count();
        match action {
            KeyAction::ScrollUp => self.viewport.scroll_up(1, total),
            KeyAction::ScrollDown => self.viewport.scroll_down(1, total),
            KeyAction::PageUp => self.viewport.page_up(total),
            KeyAction::PageDown => self.viewport.page_down(total),
            KeyAction::ScrollToTop => self.viewport.scroll_to_top(),
            KeyAction::ScrollToBottom => self.viewport.scroll_to_bottom(total),
            KeyAction::ToggleFollow => self.viewport.toggle_follow(total),
            KeyAction::ToggleWrap => self.toggle_wrap(),
            KeyAction::ToggleToolbar => self.show_toolbar = !self.show_toolbar,
            KeyAction::ClearLogs => self.clear(),
            KeyAction::ToggleHelp | KeyAction::Quit => return false,
        }
        true
    }

    /// Record the pane's inner geometry.
    pub fn set_pane_size(&mut self, width: u16, height: u16) {
        let total = self.sink.total_count();
        self.viewport
            .set_pane_size(ViewportDimensions::new(width, height), total);
    }

    /// Render the visible window into fragments.
    pub fn draw(&mut self) -> Vec<Fragment> {
        self.renderer
            .draw(&self.sink, &mut self.viewport, self.wrap_lines)
    }

    /// Snap the selection to the tail if following.
    pub fn on_append(&mut self) {
        let total = self.sink.total_count();
        self.viewport.on_append(total);
    }

    /// Move the selection to a clicked line.
    ///
    /// `line` counts logical lines from the top of the last frame, the same
    /// unit as [`Self::cursor_position`]. The view maps screen rows to it.
    pub fn click(&mut self, line: usize) {
        let total = self.sink.total_count();
        let cursor = self.renderer.cursor_position();
        self.viewport.scroll_to_position(line, cursor, total);
    }

    /// Scroll by mouse wheel notches; negative is towards older lines.
    pub fn scroll_wheel(&mut self, delta: isize) {
        let total = self.sink.total_count();
        self.viewport.scroll(delta, total);
    }

    /// Drop all lines and return the selection to the top.
    pub fn clear(&mut self) {
        self.sink.clear();
        self.viewport.reset();
    }

    /// Flip line wrapping.
    pub fn toggle_wrap(&mut self) {
        self.wrap_lines = !self.wrap_lines;
        debug!(wrap_lines = self.wrap_lines, "Line wrapping toggled");
    }

    /// Gather status bar contents in one lock acquisition.
    pub fn toolbar_status(&self) -> ToolbarStatus {
        let (total_count, byte_size, channel_summary) = self.sink.with_buffer(|buffer| {
            (
                buffer.total_count(),
                buffer.human_readable_byte_size(),
                buffer.channel_counts_summary(),
            )
        });
        ToolbarStatus {
            following: self.viewport.is_following(),
            wrap_lines: self.wrap_lines,
            total_count,
            byte_size,
            channel_summary,
        }
    }

    /// Whether new lines arrived since the last frame.
    pub fn needs_redraw(&self) -> bool {
        self.sink.is_dirty()
    }

    /// Cursor location in the last frame (logical line, column).
    pub fn cursor_position(&self) -> CursorPosition {
        self.renderer.cursor_position()
    }

    /// Fragment index at which each logical line of the last frame begins.
    pub fn line_starts(&self) -> Vec<usize> {
        self.renderer.line_starts()
    }

    /// Indent of wrapped continuation rows in the last frame.
    pub fn continuation_indent(&self) -> usize {
        self.renderer.continuation_indent()
    }

    /// Whether long lines wrap.
    pub fn wrap_lines(&self) -> bool {
        self.wrap_lines
    }

    /// Whether the status bar is shown.
    pub fn show_toolbar(&self) -> bool {
        self.show_toolbar
    }

    /// Whether the selection tracks the newest line.
    pub fn is_following(&self) -> bool {
        self.viewport.is_following()
    }

    /// Buffer index of the selected line.
    pub fn selected_index(&self) -> usize {
        self.viewport.selected_index()
    }

    /// Shared buffer handle.
    pub fn sink(&self) -> &LogSink {
        &self.sink
    }

    /// Selection and window state.
    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }
}
