//! Fold Tetris (workspace facade crate).
//!
//! Re-exports the member crates under one `fold_tetris::{core,engine,input,types}`
//! namespace; the implementation lives in dedicated crates under `crates/`.

pub use fold_tetris_core as core;
pub use fold_tetris_engine as engine;
pub use fold_tetris_input as input;
pub use fold_tetris_types as types;
