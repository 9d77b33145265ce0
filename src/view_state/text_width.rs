//! Display-width measurement for styled text.
//!
//! Styled log text carries embedded SGR escape sequences (`ESC ... m`).
//! These functions strip them purely for measurement; stored content is
//! never altered.

use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthChar;

/// Matches a style-escape sequence: an ESC byte, any non-`m` bytes, then `m`.
static STYLE_SEQUENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b[^m]*m").expect("style sequence pattern is valid"));

/// Remove every style-escape sequence from `text`.
///
/// An unterminated escape (ESC with no closing `m`) is left in place; its
/// ESC byte measures as zero width.
pub fn strip_style_sequences(text: &str) -> std::borrow::Cow<'_, str> {
    STYLE_SEQUENCE.replace_all(text, "")
}

/// Terminal column width of `text` with style sequences excluded.
///
/// Line breaks and other control characters count as zero columns.
pub fn display_width(text: &str) -> usize {
    plain_width(&strip_style_sequences(text))
}

/// Terminal column width of text that contains no style sequences.
pub fn plain_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Column width of a single character (control characters are zero-width).
pub fn char_width(c: char) -> usize {
    if c.is_control() {
        0
    } else {
        c.width().unwrap_or(0)
    }
}
