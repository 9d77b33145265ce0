//! logpane
//!
//! Bounded live log buffer with a follow-mode terminal log pane.
//!
//! Producers emit `tracing` events; [`logging::LogPaneLayer`] formats them
//! into [`model::StyledLine`]s and appends them to a shared
//! [`state::LogBuffer`]. The UI thread renders only the visible window
//! through [`view_state::RenderEngine`], and [`view_state::RedrawThrottle`]
//! coalesces redraw requests from bursts of appends.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;
