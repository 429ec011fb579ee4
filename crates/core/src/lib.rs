//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains every game rule as a state transition. It has no
//! dependencies on terminals, clocks, or I/O:
//!
//! - **Deterministic**: the same seed and action stream always produce the same states
//! - **Immutable**: every action maps a `&State` to a fresh `State`
//! - **Total**: invalid moves, blocked rotations and actions on a finished game are
//!   ordinary no-ops, never errors
//!
//! # Module Structure
//!
//! - [`rng`]: linear congruential hash, draw scaling and the tick clock
//! - [`pieces`]: units, blocks, the seven spawn shapes and the move/rotate transforms
//! - [`board`]: the locked-unit grid and row clearing
//! - [`collision`]: placement validation, wall kicks and hard-drop distance
//! - [`scoring`]: level/score gains and the level-to-speed curve
//! - [`game_state`]: the action dispatcher
//! - [`frame`]: previous/current frame pairs and render diffs
//!
//! # Example
//!
//! ```
//! use fold_tetris_core::{State, Timeline};
//! use fold_tetris_core::types::Action;
//!
//! let mut timeline = Timeline::new(State::new(42));
//! timeline.dispatch(Action::Move(-1));
//! timeline.dispatch(Action::RotateRight);
//! let frame = timeline.dispatch(Action::Tick { elapsed: 0, draw: 3 });
//!
//! assert!(!frame.current.game_end);
//! ```

pub mod board;
pub mod collision;
pub mod frame;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;

pub use fold_tetris_types as types;

pub use board::GameGrid;
pub use collision::{drop_distance, highest_block, valid_move, wall_kick};
pub use frame::{Frame, FrameDiff, Timeline};
pub use game_state::{reduce, State};
pub use pieces::{spawn_block, Block, Transform, Unit, UnitId};
pub use rng::{hash, scale, scaled_number, TickClock};
pub use scoring::{calculate_speed, display_level, level_gain, row_clear_score, tick_speed};
