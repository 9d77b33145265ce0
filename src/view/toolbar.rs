//! Status bar rendered under the log pane.

use super::styles::PaneStyles;
use crate::state::ToolbarStatus;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

/// One-row status bar for the log pane.
///
/// Left side: ` Logs ` badge, focus marker, and the wrap/follow toggles with
/// their keys. Right side: line count, buffer size, and per-channel counts,
/// dropped when the row is too narrow to hold both sides.
pub struct Toolbar<'a> {
    status: &'a ToolbarStatus,
    styles: &'a PaneStyles,
}

impl<'a> Toolbar<'a> {
    /// Create a status bar for `status`.
    pub fn new(status: &'a ToolbarStatus, styles: &'a PaneStyles) -> Self {
        Self { status, styles }
    }

    /// Left-aligned part of the bar.
    pub fn left_line(&self) -> Line<'static> {
        let bar = self.styles.toolbar;
        let key = self.styles.toolbar_key;
        Line::from(vec![
            Span::styled(" Logs ", self.styles.toolbar_logo),
            Span::styled(" [FOCUSED] ", bar),
            Span::styled(checkbox(self.status.wrap_lines), bar),
            Span::styled("w", key),
            Span::styled(":Wrap ", bar),
            Span::styled(checkbox(self.status.following), bar),
            Span::styled("f", key),
            Span::styled(":Follow ", bar),
        ])
    }

    /// Right-aligned statistics text.
    pub fn right_text(&self) -> String {
        let mut text = format!(
            "{} lines  {}",
            self.status.total_count, self.status.byte_size
        );
        if !self.status.channel_summary.is_empty() {
            text.push_str("  ");
            text.push_str(&self.status.channel_summary);
        }
        text.push(' ');
        text
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x] "
    } else {
        "[ ] "
    }
}

impl Widget for Toolbar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, self.styles.toolbar);

        let left = self.left_line();
        let left_width = left.width();
        buf.set_line(area.x, area.y, &left, area.width);

        let right = self.right_text();
        let right_width = right.width();
        let width = usize::from(area.width);
        if left_width + right_width <= width {
            // right_width <= area.width, so the cast is lossless
            let x = area.x + (width - right_width) as u16;
            buf.set_string(x, area.y, right, self.styles.toolbar);
        }
    }
}
