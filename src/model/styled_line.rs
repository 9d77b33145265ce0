//! A single formatted log event.

use crate::view_state::text_width::display_width;
use chrono::{DateTime, Local};
use std::sync::OnceLock;

/// One log event as stored in the [`LogBuffer`](crate::state::LogBuffer).
///
/// Immutable once created. Width metrics are derived lazily on first use
/// and cached, since most entries in a large buffer are never rendered.
#[derive(Debug, Clone)]
pub struct StyledLine {
    timestamp: DateTime<Local>,
    channel: String,
    raw_message: String,
    styled_text: String,
    display_width: OnceLock<usize>,
    prefix_width: OnceLock<usize>,
}

impl StyledLine {
    /// Create a new line from its source record parts.
    ///
    /// # Arguments
    /// * `channel` - Name of the originating logger/source
    /// * `timestamp` - When the source record was created
    /// * `raw_message` - Unformatted message body
    /// * `styled_text` - Fully formatted text including style sequences
    pub fn new(
        channel: impl Into<String>,
        timestamp: DateTime<Local>,
        raw_message: impl Into<String>,
        styled_text: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            channel: channel.into(),
            raw_message: raw_message.into(),
            styled_text: styled_text.into(),
            display_width: OnceLock::new(),
            prefix_width: OnceLock::new(),
        }
    }

    /// Placeholder line used when there is nothing to show.
    pub fn empty() -> Self {
        Self::new("", Local::now(), "", "")
    }

    /// When the line was produced.
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Producer name the line is counted under.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Message text without prefix or styling.
    pub fn raw_message(&self) -> &str {
        &self.raw_message
    }

    /// Formatted line as displayed, SGR sequences included.
    pub fn styled_text(&self) -> &str {
        &self.styled_text
    }

    /// Width of the styled text in terminal columns, style sequences excluded.
    pub fn display_width(&self) -> usize {
        *self
            .display_width
            .get_or_init(|| display_width(&self.styled_text))
    }

    /// Width of everything the formatter added around the raw message.
    ///
    /// Saturates at zero when a formatter shortens the message.
    pub fn prefix_width(&self) -> usize {
        *self.prefix_width.get_or_init(|| {
            self.display_width()
                .saturating_sub(display_width(&self.raw_message))
        })
    }

    /// Number of line breaks embedded in the raw message.
    pub fn line_break_count(&self) -> usize {
        self.raw_message.matches('\n').count()
    }

    /// Estimated memory footprint of this entry in bytes.
    ///
    /// Deterministic for a given line so that eviction subtracts exactly what
    /// append added.
    pub fn estimated_size(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.channel.len()
            + self.raw_message.len()
            + self.styled_text.len()
    }
}
