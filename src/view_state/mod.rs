//! View-state layer - Layout arithmetic for the log pane
//!
//! Everything here is terminal-agnostic: it turns buffer contents and pane
//! geometry into styled fragments and cursor positions. Converting those to
//! ratatui cells is the job of [`crate::view`].
//!
//! # Module Structure
//!
//! - `types`: ViewportDimensions, VisibleRange, CursorPosition
//! - `text_width`: style-sequence stripping and display-width measurement
//! - `fragment`: Fragment - styled text runs and SGR parsing
//! - `line_height`: wrapped row count for one line
//! - `viewport`: ViewportController - selection, follow mode, visible range
//! - `renderer`: RenderEngine - buffer window to flat fragment sequence
//! - `redraw`: RedrawThrottle - rate-limited host repaint requests

pub mod fragment;
pub mod line_height;
pub mod redraw;
pub mod renderer;
pub mod text_width;
pub mod types;
pub mod viewport;

pub use fragment::{fragment_list_width, parse_styled, Fragment};
pub use line_height::line_height;
pub use redraw::{NoopRedraw, RedrawThrottle, RedrawTrigger, DEFAULT_REDRAW_INTERVAL};
pub use renderer::RenderEngine;
pub use text_width::{display_width, strip_style_sequences};
pub use types::{CursorPosition, ViewportDimensions, VisibleRange};
pub use viewport::ViewportController;
