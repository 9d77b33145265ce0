//! Wrapped line height calculation.

/// Number of terminal rows a line of `text_width` columns occupies when
/// wrapped into `screen_width` columns.
///
/// The first row holds `screen_width` columns. Every continuation row is
/// indented by `prefix_width`, leaving `screen_width - prefix_width` columns
/// for content (never less than one, so narrow panes still terminate).
///
/// # Contract
/// - `text_width == 0` occupies zero rows
/// - `text_width <= screen_width` occupies one row
/// - otherwise `1 + ceil((text_width - screen_width) / (screen_width - prefix_width))`
/// - pure and deterministic
pub fn line_height(text_width: usize, screen_width: usize, prefix_width: usize) -> usize {
    if text_width == 0 {
        return 0;
    }
    if text_width <= screen_width {
        return 1;
    }

    let remaining = text_width - screen_width;
    let continuation_width = continuation_width(screen_width, prefix_width);
    1 + remaining.div_ceil(continuation_width)
}

/// Columns available for content on a continuation row.
pub fn continuation_width(screen_width: usize, prefix_width: usize) -> usize {
    screen_width.saturating_sub(prefix_width).max(1)
}

/// Continuation indent actually applied for a given screen width.
///
/// Clamped so that at least one content column remains.
pub fn effective_indent(screen_width: usize, prefix_width: usize) -> usize {
    screen_width.saturating_sub(continuation_width(screen_width, prefix_width))
}
