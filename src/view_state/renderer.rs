//! Projection of the log buffer onto a fixed-size window.
//!
//! [`RenderEngine::draw`] turns the visible slice of the buffer into one flat
//! fragment sequence. Work is split in two phases:
//!
//! 1. **Snapshot** (under the buffer lock): resolve the visible range, clone
//!    the `Arc`s of at most `window height + 1` lines, consume the dirty flag.
//! 2. **Layout** (lock released): parse styles, count wrapped rows newest to
//!    oldest, decorate the selected line, flatten.
//!
//! Producers are therefore never blocked by style parsing or width math.

use super::fragment::{parse_styled, Fragment};
use super::line_height::{effective_indent, line_height};
use super::types::{CursorPosition, ViewportDimensions};
use super::viewport::ViewportController;
use crate::model::StyledLine;
use crate::state::{LogBuffer, LogSink};
use ratatui::style::Style;
use std::collections::VecDeque;
use std::sync::Arc;

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;

/// Text returned for an empty buffer so the cursor has a line to rest on.
pub const EMPTY_BUFFER_TEXT: &str = " \n";

/// Everything layout needs, copied out of the buffer.
#[derive(Debug)]
struct FrameSnapshot {
    lines: Vec<Arc<StyledLine>>,
    first_index: usize,
    selected_index: usize,
    longest_prefix_width: usize,
    window: ViewportDimensions,
}

/// Stateful renderer for one log pane.
///
/// Keeps the per-line fragments of the last frame so the host can ask where
/// the cursor landed.
#[derive(Debug, Clone, Default)]
pub struct RenderEngine {
    line_fragment_cache: VecDeque<Vec<Fragment>>,
    selected_style: Style,
    continuation_indent: usize,
}

impl RenderEngine {
    /// Create a renderer that highlights the selected line with `selected_style`.
    pub fn new(selected_style: Style) -> Self {
        Self {
            selected_style,
            ..Self::default()
        }
    }

    /// Render the current window of a shared buffer.
    ///
    /// The buffer lock is held only while the snapshot is taken.
    pub fn draw(
        &mut self,
        sink: &LogSink,
        viewport: &mut ViewportController,
        wrap_lines: bool,
    ) -> Vec<Fragment> {
        let snapshot = sink.with_buffer_mut(|buffer| take_snapshot(buffer, viewport));
        self.layout(snapshot, wrap_lines)
    }

    /// Render the current window of a buffer owned by the caller.
    pub fn draw_buffer(
        &mut self,
        buffer: &mut LogBuffer,
        viewport: &mut ViewportController,
        wrap_lines: bool,
    ) -> Vec<Fragment> {
        let snapshot = take_snapshot(buffer, viewport);
        self.layout(snapshot, wrap_lines)
    }

    /// Where the cursor marker landed in the last frame.
    ///
    /// `row` counts logical lines from the top of the frame. Returns the
    /// origin when nothing has been drawn or the selected line was starved.
    pub fn cursor_position(&self) -> CursorPosition {
        for (row, line) in self.line_fragment_cache.iter().enumerate() {
            let mut column = 0;
            for fragment in line {
                if fragment.is_cursor_marker() {
                    return CursorPosition::new(column, row);
                }
                column += fragment.width();
            }
        }
        CursorPosition::default()
    }

    /// Per-line fragments of the last frame, oldest first.
    pub fn line_fragment_cache(&self) -> &VecDeque<Vec<Fragment>> {
        &self.line_fragment_cache
    }

    /// Index into the last frame's fragments at which each cached line
    /// begins, oldest first.
    pub fn line_starts(&self) -> Vec<usize> {
        self.line_fragment_cache
            .iter()
            .scan(0, |next, line| {
                let start = *next;
                *next += line.len();
                Some(start)
            })
            .collect()
    }

    /// Indent applied to wrapped continuation rows in the last frame.
    pub fn continuation_indent(&self) -> usize {
        self.continuation_indent
    }

    /// Highlight applied to the selected line.
    pub fn selected_style(&self) -> Style {
        self.selected_style
    }

    fn layout(&mut self, snapshot: Option<FrameSnapshot>, wrap_lines: bool) -> Vec<Fragment> {
        self.line_fragment_cache.clear();

        let Some(snapshot) = snapshot else {
            self.continuation_indent = 0;
            return vec![Fragment::plain(EMPTY_BUFFER_TEXT)];
        };

        let window_width = usize::from(snapshot.window.width);
        let window_height = usize::from(snapshot.window.height);
        let indent = effective_indent(window_width, snapshot.longest_prefix_width);
        self.continuation_indent = if wrap_lines { indent } else { 0 };

        let mut total_used_lines = 0;
        for (offset, line) in snapshot.lines.iter().enumerate().rev() {
            let index = snapshot.first_index + offset;
            let fragment_width = line.display_width();

            let wraps = wrap_lines && fragment_width > window_width;
            let rows = if wraps {
                line_height(fragment_width, window_width, snapshot.longest_prefix_width)
            } else {
                1
            };
            let used_lines = rows + line.line_break_count();

            let mut fragments = line_fragments(line);
            if index == snapshot.selected_index {
                let padding = if wraps {
                    let total_width = rows * window_width;
                    let content_width = indent * (rows - 1) + fragment_width;
                    total_width.saturating_sub(content_width)
                } else {
                    window_width.saturating_sub(fragment_width)
                };
                fragments = self.decorate_selected(fragments, padding);
            }

            self.line_fragment_cache.push_front(fragments);
            total_used_lines += used_lines;
            if total_used_lines > window_height {
                break;
            }
        }

        let mut flattened: Vec<Fragment> = self
            .line_fragment_cache
            .iter()
            .flatten()
            .cloned()
            .collect();
        if let Some(last) = flattened.last_mut() {
            let trimmed_len = last.text.trim_end_matches('\n').len();
            last.text.truncate(trimmed_len);
        }
        flattened
    }

    /// Prepend the cursor marker, pad to the window edge, apply highlight.
    fn decorate_selected(&self, mut fragments: Vec<Fragment>, padding: usize) -> Vec<Fragment> {
        if padding > 0 {
            let filler = Fragment::plain(format!("{}\n", " ".repeat(padding)));
            match fragments.last_mut() {
                Some(last) => *last = filler,
                None => fragments.push(filler),
            }
        }
        fragments.insert(0, Fragment::cursor_marker());
        for fragment in &mut fragments {
            fragment.style = self.selected_style.patch(fragment.style);
        }
        fragments
    }
}

/// Styled fragments for one stored line, terminated by its own line break.
fn line_fragments(line: &StyledLine) -> Vec<Fragment> {
    let mut fragments = parse_styled(line.styled_text());
    fragments.push(Fragment::plain("\n"));
    fragments
}

fn take_snapshot(buffer: &mut LogBuffer, viewport: &mut ViewportController) -> Option<FrameSnapshot> {
    buffer.take_dirty();
    let total = buffer.total_count();
    if total == 0 {
        return None;
    }

    let range = viewport.compute_visible_range(total, None, None);
    let window = viewport.window();
    // Every line takes at least one row, so the newest-first walk can never
    // consume more than `height + 1` lines.
    let first_index = range
        .start
        .max(range.end.saturating_sub(usize::from(window.height)));

    Some(FrameSnapshot {
        lines: buffer.snapshot(first_index, range.end),
        first_index,
        selected_index: viewport.selected_index(),
        longest_prefix_width: buffer.longest_prefix_width(),
        window,
    })
}
