//! Default formatter turning a tracing event into styled pane text.

use chrono::{DateTime, Local};
use tracing::Level;

/// Timestamp layout used in the pane prefix.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d %H:%M:%S";

const RESET: &str = "\x1b[0m";
const TIMESTAMP_STYLE: &str = "\x1b[30;47m";

/// Three-letter tag and SGR color for a level.
fn level_tag(level: &Level) -> (&'static str, &'static str) {
    match *level {
        Level::ERROR => ("ERR", "\x1b[31m"),
        Level::WARN => ("WRN", "\x1b[33m"),
        Level::INFO => ("INF", "\x1b[32m"),
        Level::DEBUG => ("DBG", "\x1b[34m"),
        _ => ("TRC", "\x1b[90m"),
    }
}

/// Format `<timestamp> <LVL> <message>` with embedded SGR styling.
///
/// The timestamp is black on white and the level tag is colored by
/// severity. The message itself is copied verbatim.
pub fn format_line(timestamp: DateTime<Local>, level: &Level, message: &str) -> String {
    let (tag, color) = level_tag(level);
    format!(
        "{TIMESTAMP_STYLE}{}{RESET} {color}{tag}{RESET} {message}",
        timestamp.format(TIMESTAMP_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::text_width::{display_width, strip_style_sequences};
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2021, 4, 18, 13, 5, 9)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn plain_text_is_timestamp_level_message() {
        let line = format_line(fixed_time(), &Level::INFO, "hello");
        assert_eq!(strip_style_sequences(&line), "20210418 13:05:09 INF hello");
    }

    #[test]
    fn prefix_is_twenty_two_columns() {
        let line = format_line(fixed_time(), &Level::WARN, "body");
        assert_eq!(display_width(&line) - display_width("body"), 22);
    }

    #[test]
    fn levels_use_distinct_tags() {
        let tags: Vec<String> = [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE]
            .iter()
            .map(|level| strip_style_sequences(&format_line(fixed_time(), level, "")).into_owned())
            .map(|text| text[18..21].to_string())
            .collect();
        assert_eq!(tags, vec!["ERR", "WRN", "INF", "DBG", "TRC"]);
    }

    #[test]
    fn error_tag_is_red() {
        let line = format_line(fixed_time(), &Level::ERROR, "boom");
        assert!(line.contains("\x1b[31mERR\x1b[0m"));
    }

    #[test]
    fn timestamp_is_black_on_white() {
        let line = format_line(fixed_time(), &Level::INFO, "x");
        assert!(line.starts_with("\x1b[30;47m20210418 13:05:09\x1b[0m"));
    }
}
