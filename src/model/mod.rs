//! Domain model types (pure).
//!
//! All types in this module are pure data; nothing here locks, renders,
//! or performs I/O.

pub mod key_action;
pub mod styled_line;

// Re-export for convenience
pub use key_action::{HelpSection, KeyAction};
pub use styled_line::StyledLine;
