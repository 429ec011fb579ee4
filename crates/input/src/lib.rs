//! Terminal input module (core-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Action`] and suppresses
//! held-key repeats, so each physical key press reaches the game exactly once.
//! Repeat filtering belongs here, at the input boundary; the core accepts any
//! interleaving of actions.

pub mod handler;
pub mod map;

pub use fold_tetris_types as types;

pub use handler::InputHandler;
pub use map::{map_key, should_quit};
