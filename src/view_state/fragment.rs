//! Styled text fragments.
//!
//! A fragment is a run of text sharing one style. The render engine works
//! entirely in fragments; the ratatui widget converts them to cells at the
//! very end. A zero-width cursor marker fragment tells the host where the
//! terminal cursor belongs.

use super::text_width::plain_width;
use ratatui::style::{Color, Modifier, Style};
use regex::Regex;
use std::sync::LazyLock;

/// SGR sequence with its parameter list captured.
static SGR_SEQUENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b([^m]*)m").expect("SGR pattern is valid"));

/// A run of text with a single style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Style applied to every character of `text`.
    pub style: Style,
    /// Text content. May contain line breaks.
    pub text: String,
    cursor_marker: bool,
}

impl Fragment {
    /// Fragment with an explicit style.
    pub fn styled(style: Style, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
            cursor_marker: false,
        }
    }

    /// Fragment with the default style.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(Style::default(), text)
    }

    /// Zero-width sentinel marking where the terminal cursor should rest.
    pub fn cursor_marker() -> Self {
        Self {
            style: Style::default(),
            text: String::new(),
            cursor_marker: true,
        }
    }

    /// Whether this is the zero-width cursor sentinel.
    pub fn is_cursor_marker(&self) -> bool {
        self.cursor_marker
    }

    /// Display width of this fragment's text.
    pub fn width(&self) -> usize {
        plain_width(&self.text)
    }
}

/// Sum of display widths over a fragment list (line breaks excluded).
pub fn fragment_list_width(fragments: &[Fragment]) -> usize {
    fragments.iter().map(Fragment::width).sum()
}

/// Split styled text into fragments, translating SGR sequences into styles.
///
/// Only the `ESC [ params m` form changes style; any other `ESC ... m` run
/// is dropped without effect. Unknown parameters are ignored.
pub fn parse_styled(styled: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut style = Style::default();
    let mut cursor = 0;

    for captures in SGR_SEQUENCE.captures_iter(styled) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        if whole.start() > cursor {
            fragments.push(Fragment::styled(style, &styled[cursor..whole.start()]));
        }
        if let Some(params) = captures.get(1).and_then(|p| p.as_str().strip_prefix('[')) {
            apply_sgr(&mut style, params);
        }
        cursor = whole.end();
    }

    if cursor < styled.len() {
        fragments.push(Fragment::styled(style, &styled[cursor..]));
    }

    fragments
}

/// Apply one SGR parameter list (the part between `ESC [` and `m`).
fn apply_sgr(style: &mut Style, params: &str) {
    let codes: Vec<u16> = if params.is_empty() {
        vec![0]
    } else {
        params
            .split(';')
            .map(|p| p.parse::<u16>().unwrap_or(0))
            .collect()
    };

    let mut iter = codes.into_iter();
    while let Some(code) = iter.next() {
        match code {
            0 => *style = Style::default(),
            1 => *style = style.add_modifier(Modifier::BOLD),
            2 => *style = style.add_modifier(Modifier::DIM),
            3 => *style = style.add_modifier(Modifier::ITALIC),
            4 => *style = style.add_modifier(Modifier::UNDERLINED),
            5 => *style = style.add_modifier(Modifier::SLOW_BLINK),
            7 => *style = style.add_modifier(Modifier::REVERSED),
            8 => *style = style.add_modifier(Modifier::HIDDEN),
            9 => *style = style.add_modifier(Modifier::CROSSED_OUT),
            22 => *style = style.remove_modifier(Modifier::BOLD | Modifier::DIM),
            23 => *style = style.remove_modifier(Modifier::ITALIC),
            24 => *style = style.remove_modifier(Modifier::UNDERLINED),
            25 => *style = style.remove_modifier(Modifier::SLOW_BLINK),
            27 => *style = style.remove_modifier(Modifier::REVERSED),
            28 => *style = style.remove_modifier(Modifier::HIDDEN),
            29 => *style = style.remove_modifier(Modifier::CROSSED_OUT),
            30..=37 => style.fg = Some(basic_color(code - 30)),
            38 => style.fg = extended_color(&mut iter),
            39 => style.fg = None,
            40..=47 => style.bg = Some(basic_color(code - 40)),
            48 => style.bg = extended_color(&mut iter),
            49 => style.bg = None,
            90..=97 => style.fg = Some(bright_color(code - 90)),
            100..=107 => style.bg = Some(bright_color(code - 100)),
            _ => {}
        }
    }
}

/// Parse the tail of a `38;...` / `48;...` extended color.
fn extended_color(iter: &mut impl Iterator<Item = u16>) -> Option<Color> {
    match iter.next()? {
        5 => iter.next().map(|n| Color::Indexed(n.min(255) as u8)),
        2 => {
            let r = iter.next()?;
            let g = iter.next()?;
            let b = iter.next()?;
            Some(Color::Rgb(r.min(255) as u8, g.min(255) as u8, b.min(255) as u8))
        }
        _ => None,
    }
}

fn basic_color(index: u16) -> Color {
    match index {
        0 => Color::Black,
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Blue,
        5 => Color::Magenta,
        6 => Color::Cyan,
        _ => Color::Gray,
    }
}

fn bright_color(index: u16) -> Color {
    match index {
        0 => Color::DarkGray,
        1 => Color::LightRed,
        2 => Color::LightGreen,
        3 => Color::LightYellow,
        4 => Color::LightBlue,
        5 => Color::LightMagenta,
        6 => Color::LightCyan,
        _ => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_one_default_fragment() {
        let fragments = parse_styled("hello");
        assert_eq!(fragments, vec![Fragment::plain("hello")]);
    }

    #[test]
    fn empty_text_has_no_fragments() {
        assert!(parse_styled("").is_empty());
    }

    #[test]
    fn color_sequence_starts_new_fragment() {
        let fragments = parse_styled("a\x1b[31mb\x1b[0mc");
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[0], Fragment::plain("a"));
        assert_eq!(fragments[1].text, "b");
        assert_eq!(fragments[1].style.fg, Some(Color::Red));
        assert_eq!(fragments[2], Fragment::plain("c"));
    }

    #[test]
    fn combined_parameters_apply_in_order() {
        let fragments = parse_styled("\x1b[30;47mts\x1b[0m");
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].style.fg, Some(Color::Black));
        assert_eq!(fragments[0].style.bg, Some(Color::Gray));
    }

    #[test]
    fn bold_then_partial_reset() {
        let fragments = parse_styled("\x1b[1mB\x1b[22mN");
        assert!(fragments[0].style.add_modifier.contains(Modifier::BOLD));
        assert!(!fragments[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn indexed_and_rgb_colors() {
        let fragments = parse_styled("\x1b[38;5;208mi\x1b[48;2;1;2;3mr");
        assert_eq!(fragments[0].style.fg, Some(Color::Indexed(208)));
        assert_eq!(fragments[1].style.bg, Some(Color::Rgb(1, 2, 3)));
    }

    #[test]
    fn bright_colors_map_to_light_variants() {
        let fragments = parse_styled("\x1b[91mx");
        assert_eq!(fragments[0].style.fg, Some(Color::LightRed));
    }

    #[test]
    fn empty_parameter_list_resets() {
        let fragments = parse_styled("\x1b[31ma\x1b[mb");
        assert_eq!(fragments[1], Fragment::plain("b"));
    }

    #[test]
    fn non_csi_sequence_is_dropped_without_effect() {
        let fragments = parse_styled("a\x1bXm b");
        assert_eq!(fragments, vec![Fragment::plain("a"), Fragment::plain(" b")]);
    }

    #[test]
    fn cursor_marker_has_zero_width() {
        let marker = Fragment::cursor_marker();
        assert!(marker.is_cursor_marker());
        assert_eq!(marker.width(), 0);
    }

    #[test]
    fn fragment_list_width_ignores_newlines() {
        let fragments = vec![Fragment::plain("abc"), Fragment::plain("de\n")];
        assert_eq!(fragment_list_width(&fragments), 5);
    }
}
