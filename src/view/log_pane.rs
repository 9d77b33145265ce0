//! Log pane widget: lays rendered fragments out into terminal cells.

use crate::view_state::text_width::char_width;
use crate::view_state::Fragment;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

// ===== LogPaneView Widget =====

/// Log pane widget for a flat fragment sequence.
///
/// Splits the fragments on line breaks, wraps rows wider than the area
/// (continuation rows indented by `continuation_indent`) or clips them when
/// wrapping is off, and keeps the cursor row on screen when the content is
/// taller than the area.
pub struct LogPaneView<'a> {
    fragments: &'a [Fragment],
    wrap_lines: bool,
    continuation_indent: usize,
    line_starts: Option<&'a [usize]>,
}

/// Visual rows produced from a fragment sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneLayout {
    /// One entry per terminal row, top to bottom.
    pub rows: Vec<Line<'static>>,
    /// Row and column of the cursor marker, if present.
    pub cursor: Option<(usize, usize)>,
    /// Logical line each row belongs to, parallel to `rows`.
    pub row_lines: Vec<usize>,
}

/// What a render pass put on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedPane {
    /// Absolute cursor cell, if visible.
    pub cursor: Option<Position>,
    /// Logical line shown on each visible row, top to bottom.
    pub row_lines: Vec<usize>,
}

impl<'a> LogPaneView<'a> {
    /// Create a new LogPaneView widget.
    ///
    /// # Arguments
    /// * `fragments` - Output of the render engine for this frame
    /// * `wrap_lines` - Wrap rows wider than the pane instead of clipping
    /// * `continuation_indent` - Indent of wrapped continuation rows
    pub fn new(fragments: &'a [Fragment], wrap_lines: bool, continuation_indent: usize) -> Self {
        Self {
            fragments,
            wrap_lines,
            continuation_indent,
            line_starts: None,
        }
    }

    /// Fragment indices at which each logical line begins.
    ///
    /// Without them every line break starts a new logical line. With them,
    /// line breaks inside a multi-line message stay on the same logical line.
    pub fn with_line_starts(mut self, line_starts: &'a [usize]) -> Self {
        self.line_starts = Some(line_starts);
        self
    }

    /// Lay the fragments out for a pane `width` columns wide.
    pub fn layout(&self, width: u16) -> PaneLayout {
        let width = usize::from(width);
        let indent = self.continuation_indent.min(width.saturating_sub(1));
        let mut builder = RowBuilder::default();

        for (index, fragment) in self.fragments.iter().enumerate() {
            let starts_line = self
                .line_starts
                .is_some_and(|starts| index > 0 && starts.binary_search(&index).is_ok());
            if starts_line {
                builder.start_line();
            }
            if fragment.is_cursor_marker() {
                builder.mark_cursor();
                continue;
            }
            for c in fragment.text.chars() {
                if c == '\n' {
                    builder.new_row(0);
                    if self.line_starts.is_none() {
                        builder.start_line();
                    }
                    continue;
                }
                let char_columns = char_width(c);
                if char_columns == 0 {
                    continue;
                }
                let current = builder.current_width();
                if current + char_columns > width {
                    if !self.wrap_lines {
                        continue;
                    }
                    if builder.has_content() {
                        builder.new_row(indent);
                    }
                }
                builder.push(c, char_columns, fragment.style);
            }
        }

        builder.finish()
    }

    /// Render into `buf` and return the absolute cursor cell, if visible.
    pub fn render_with_cursor(self, area: Rect, buf: &mut Buffer) -> Option<Position> {
        self.render_frame(area, buf).cursor
    }

    /// Render into `buf`, reporting the cursor cell and the logical line
    /// behind each visible row.
    pub fn render_frame(self, area: Rect, buf: &mut Buffer) -> RenderedPane {
        if area.width == 0 || area.height == 0 {
            return RenderedPane::default();
        }

        let layout = self.layout(area.width);
        let height = usize::from(area.height);
        let mut skip = layout.rows.len().saturating_sub(height);
        if let Some((cursor_row, _)) = layout.cursor {
            skip = skip.min(cursor_row);
        }

        for (offset, row) in layout.rows.iter().skip(skip).take(height).enumerate() {
            // offset < area.height, so the cast is lossless
            let y = area.y + offset as u16;
            buf.set_line(area.x, y, row, area.width);
        }

        let cursor = layout.cursor.and_then(|(row, column)| {
            let y = u16::try_from(row - skip).ok()?;
            let x = u16::try_from(column).ok()?;
            (y < area.height && x < area.width).then(|| Position::new(area.x + x, area.y + y))
        });
        let row_lines = layout.row_lines.into_iter().skip(skip).take(height).collect();

        RenderedPane { cursor, row_lines }
    }
}

impl Widget for LogPaneView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_with_cursor(area, buf);
    }
}

/// One visual row under construction.
#[derive(Debug, Default)]
struct Row {
    spans: Vec<Span<'static>>,
    width: usize,
    indent: usize,
    line: usize,
}

#[derive(Debug, Default)]
struct RowBuilder {
    rows: Vec<Row>,
    cursor: Option<(usize, usize)>,
    line: usize,
}

impl RowBuilder {
    fn current(&mut self) -> &mut Row {
        if self.rows.is_empty() {
            self.rows.push(Row {
                line: self.line,
                ..Row::default()
            });
        }
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    fn current_width(&mut self) -> usize {
        self.current().width
    }

    fn has_content(&mut self) -> bool {
        let row = self.current();
        row.width > row.indent
    }

    fn new_row(&mut self, indent: usize) {
        // Materialize the row being closed so empty lines still take a row.
        self.current();
        let spans = if indent > 0 {
            vec![Span::raw(" ".repeat(indent))]
        } else {
            Vec::new()
        };
        self.rows.push(Row {
            spans,
            width: indent,
            indent,
            line: self.line,
        });
    }

    /// Begin the next logical line. A row with nothing on it yet moves along.
    fn start_line(&mut self) {
        self.line += 1;
        let line = self.line;
        let row = self.current();
        if row.spans.is_empty() {
            row.line = line;
        }
    }

    fn mark_cursor(&mut self) {
        let column = self.current_width();
        self.cursor = Some((self.rows.len() - 1, column));
    }

    fn push(&mut self, c: char, columns: usize, style: Style) {
        let row = self.current();
        row.width += columns;
        match row.spans.last_mut() {
            Some(span) if span.style == style => span.content.to_mut().push(c),
            _ => row.spans.push(Span::styled(c.to_string(), style)),
        }
    }

    fn finish(mut self) -> PaneLayout {
        // A trailing line break leaves an empty row nothing points at.
        let cursor_row = self.cursor.map(|(row, _)| row);
        if self.rows.len() > 1
            && self.rows.last().is_some_and(|row| row.spans.is_empty())
            && cursor_row != Some(self.rows.len() - 1)
        {
            self.rows.pop();
        }

        let row_lines = self.rows.iter().map(|row| row.line).collect();
        PaneLayout {
            rows: self.rows.into_iter().map(|row| Line::from(row.spans)).collect(),
            cursor: self.cursor,
            row_lines,
        }
    }
}
