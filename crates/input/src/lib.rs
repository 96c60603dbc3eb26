//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Nothing here
//! knows about the game state; the binary feeds the actions to the core.

pub mod map;

pub use tui_bins_types as types;

pub use map::{handle_key_event, should_quit};
