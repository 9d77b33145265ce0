//! Log producers.
//!
//! Anything that emits `tracing` events feeds the log pane through
//! [`crate::logging::LogPaneLayer`]. This module holds the built-in
//! producers that exist only to exercise the pane.

pub mod demo;

pub use demo::{DemoGenerator, DEMO_TARGET, DEFAULT_DEMO_RATE_HZ};
