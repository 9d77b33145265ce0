//! Layout and timing constants for TUI rendering.

use std::time::Duration;

/// Height of the status bar under the log pane in lines.
pub const TOOLBAR_HEIGHT: u16 = 1;

/// How long the event loop waits for terminal input before checking for
/// pending redraw requests.
///
/// Bounds the latency of a throttled redraw request, so keep it well below
/// the default redraw interval.
pub const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Help popup width as a percentage of the terminal width.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 80;

/// Help popup height as a percentage of the terminal height.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;
