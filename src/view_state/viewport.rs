//! Selection, follow mode, and visible-range computation for the log pane.
//!
//! The controller never touches the log buffer directly. Every operation
//! that depends on the buffer takes its current entry count, so the
//! controller stays free of locking and can be driven from the UI thread
//! while producers keep appending.

use super::types::{CursorPosition, ViewportDimensions, VisibleRange};
use tracing::debug;

/// Scroll position, follow mode, and window geometry for one log pane.
///
/// # Invariants
/// - `selected_index <= max(0, total - 1)` after every operation
/// - with follow on, `selected_index == total - 1` after `on_append`,
///   `set_pane_size`, and `compute_visible_range`
#[derive(Debug, Clone)]
pub struct ViewportController {
    selected_index: usize,
    follow: bool,
    window: ViewportDimensions,
    last_range: VisibleRange,
    current_range: VisibleRange,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ViewportController {
    /// Create a controller with the selection at index 0.
    pub fn new(follow: bool) -> Self {
        Self {
            selected_index: 0,
            follow,
            window: ViewportDimensions::default(),
            last_range: VisibleRange::default(),
            current_range: VisibleRange::default(),
        }
    }

    /// Currently highlighted entry index.
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Whether the selection tracks the newest line.
    pub fn is_following(&self) -> bool {
        self.follow
    }

    /// Last known pane geometry.
    pub fn window(&self) -> ViewportDimensions {
        self.window
    }

    /// Range returned by the previous `compute_visible_range` call.
    pub fn last_range(&self) -> VisibleRange {
        self.last_range
    }

    /// Range returned by the latest `compute_visible_range` call.
    pub fn current_range(&self) -> VisibleRange {
        self.current_range
    }

    /// Record the pane geometry reported by the host.
    pub fn set_pane_size(&mut self, dimensions: ViewportDimensions, total: usize) {
        if dimensions != self.window {
            debug!(
                width = dimensions.width,
                height = dimensions.height,
                "Log pane resized"
            );
        }
        self.window = dimensions;
        self.follow_tail(total);
    }

    /// Keep the selection on the newest entry after new lines arrive.
    pub fn on_append(&mut self, total: usize) {
        self.follow_tail(total);
    }

    /// Reset to the state of a freshly cleared buffer.
    pub fn reset(&mut self) {
        self.selected_index = 0;
        self.last_range = VisibleRange::default();
        self.current_range = VisibleRange::default();
    }

    /// Flip follow mode; turning it on snaps to the newest entry.
    pub fn toggle_follow(&mut self, total: usize) {
        self.follow = !self.follow;
        debug!(follow = self.follow, "Follow mode toggled");
        if self.follow {
            self.scroll_to_bottom(total);
        }
    }

    /// Select the oldest entry and stop following.
    pub fn scroll_to_top(&mut self) {
        // Stop following so the selection doesn't jump back to the bottom.
        self.follow = false;
        self.selected_index = 0;
    }

    /// Select the newest entry. Follow mode is left unchanged.
    pub fn scroll_to_bottom(&mut self, total: usize) {
        self.selected_index = last_index(total).unwrap_or(0);
    }

    /// Move the selection by `delta_lines`, clamped into `[0, last index]`.
    ///
    /// All user navigation funnels through here, so it always stops following.
    pub fn scroll(&mut self, delta_lines: isize, total: usize) {
        self.follow = false;

        let target = if delta_lines.is_negative() {
            self.selected_index.saturating_sub(delta_lines.unsigned_abs())
        } else {
            self.selected_index.saturating_add(delta_lines.unsigned_abs())
        };
        self.selected_index = target.min(last_index(total).unwrap_or(0));
    }

    /// Move the selection up (towards older entries).
    pub fn scroll_up(&mut self, lines: usize, total: usize) {
        self.scroll(-(to_delta(lines)), total);
    }

    /// Move the selection down (towards newer entries).
    pub fn scroll_down(&mut self, lines: usize, total: usize) {
        self.scroll(to_delta(lines), total);
    }

    /// Move the selection up by one window height (one line if unknown).
    pub fn page_up(&mut self, total: usize) {
        self.scroll_up(self.page_lines(), total);
    }

    /// Move the selection down by one window height (one line if unknown).
    pub fn page_down(&mut self, total: usize) {
        self.scroll_down(self.page_lines(), total);
    }

    /// Reposition the selection towards a pointer row.
    ///
    /// `cursor` is where the selected line rendered last frame; the selection
    /// moves by the row difference. Ignored while following so a click can't
    /// fight auto-scroll.
    pub fn scroll_to_position(&mut self, target_row: usize, cursor: CursorPosition, total: usize) {
        if self.follow {
            return;
        }
        let scroll_amount = to_delta(cursor.row) - to_delta(target_row);
        self.scroll(-scroll_amount, total);
    }

    /// Compute the inclusive index window to render.
    ///
    /// Explicit non-zero `available_width`/`available_height` override the
    /// last known pane geometry. The selected line is always inside the
    /// returned range and no index past the last entry is ever exposed.
    /// For an empty buffer the range is `0..=0` and callers must check
    /// `total` before indexing.
    pub fn compute_visible_range(
        &mut self,
        total: usize,
        available_width: Option<u16>,
        available_height: Option<u16>,
    ) -> VisibleRange {
        self.last_range = self.current_range;

        if let Some(width) = available_width.filter(|w| *w > 0) {
            self.window.width = width;
        }
        if let Some(height) = available_height.filter(|h| *h > 0) {
            self.window.height = height;
        }

        self.follow_tail(total);
        let last = last_index(total).unwrap_or(0);
        self.selected_index = self.selected_index.min(last);

        let (start, end) = if self.window.height > 0 {
            // Window rows are zero-indexed.
            let max_window_row = usize::from(self.window.height) - 1;
            (
                self.selected_index.saturating_sub(max_window_row),
                self.selected_index.max(max_window_row),
            )
        } else {
            (0, self.selected_index)
        };

        let range = VisibleRange::new(start, end.min(last));
        self.current_range = range;
        range
    }

    fn follow_tail(&mut self, total: usize) {
        if self.follow {
            self.scroll_to_bottom(total);
        }
    }

    fn page_lines(&self) -> usize {
        usize::from(self.window.height).max(1)
    }
}

/// Index of the newest entry, or `None` for an empty buffer.
pub fn last_index(total: usize) -> Option<usize> {
    total.checked_sub(1)
}

fn to_delta(lines: usize) -> isize {
    isize::try_from(lines).unwrap_or(isize::MAX)
}
