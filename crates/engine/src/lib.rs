//! Session runtime for fold-tetris.
//!
//! The core crate is a pure fold; this crate supplies everything around it:
//!
//! - [`config`]: environment and command-line configuration
//! - [`logging`]: log4rs file logger setup
//! - [`session`]: the tokio loop merging the tick clock with player input
//! - [`replay`]: headless, deterministic fold of a scripted input list

pub mod config;
pub mod logging;
pub mod replay;
pub mod session;

pub use fold_tetris_core as core;
pub use fold_tetris_types as types;

pub use config::{parse_args, Command, SessionConfig};
pub use logging::init_file_logger;
pub use replay::{replay, Script, ScriptError, ScriptEvent};
pub use session::{run_session, FrameSink, NullSink, SessionSummary};
