//! Log storage and pane state.
//!
//! `LogBuffer` is pure data; `LogSink` shares it across threads;
//! `LogPaneState` drives it from key and mouse input.

pub mod log_buffer;
pub mod log_pane;
pub mod log_sink;

// Re-export for convenience
pub use log_buffer::{human_readable_size, LogBuffer, DEFAULT_HISTORY_CAPACITY};
pub use log_pane::{LogPaneOptions, LogPaneState, ToolbarStatus};
pub use log_sink::LogSink;
