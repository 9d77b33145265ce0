//! Core view-state value types

/// Viewport dimensions in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportDimensions {
    /// Width in terminal columns.
    pub width: u16,
    /// Height in terminal rows.
    pub height: u16,
}

impl ViewportDimensions {
    /// Create new viewport dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl Default for ViewportDimensions {
    /// Geometry assumed before the host has reported a pane size.
    fn default() -> Self {
        Self::new(80, 20)
    }
}

/// Inclusive range of buffer indices selected for rendering.
///
/// # Invariants
/// - `start <= end`
/// - `end <= last index` of the buffer when the buffer is non-empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleRange {
    /// Index of the oldest entry in the window (inclusive).
    pub start: usize,
    /// Index of the newest entry in the window (inclusive).
    pub end: usize,
}

impl VisibleRange {
    /// Create a new range.
    ///
    /// # Panics
    /// In debug builds, panics if `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "VisibleRange start {start} > end {end}");
        Self { start, end }
    }

    /// Number of entries in the range.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false; an inclusive range holds at least one index.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check if a specific index is inside the range.
    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

/// Cursor location within the rendered fragment lines.
///
/// `row` counts logical lines from the top of the last draw; `column` is the
/// display width preceding the cursor marker on that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    /// Display columns before the cursor marker
    pub column: usize,
    /// Logical line, counted from the first line of the frame
    pub row: usize,
}

impl CursorPosition {
    /// Cursor at `column` of logical line `row`.
    pub fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}
