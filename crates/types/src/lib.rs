//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the core state machine, the input layer and the session driver alike.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows, with a two-row buffer so `y` may reach `GRID_HEIGHT + 1`
//! - **Spawn column offset**: `GRID_WIDTH / 2 - 1`
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_RATE_MS` | 100 | Fixed clock period |
//! | `BASE_SPEED_MS` | 850 | Gravity period at level 0 |
//! | `INITIAL_TICK_SPEED` | 1000 | Tick modulus before the first active tick |
//!
//! # Examples
//!
//! ```
//! use fold_tetris_types::{Action, PieceKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! assert_eq!(PieceKind::from_draw(1), PieceKind::O);
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//!
//! assert_eq!(Action::from_str("moveLeft"), Some(Action::Move(-1)));
//! assert_eq!(Action::RotateRight.as_str(), "rotateRight");
//!
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: i32 = 10;

/// Visible grid height in cells (20 rows)
pub const GRID_HEIGHT: i32 = 20;

/// Lowest row a unit may occupy (`GRID_HEIGHT + 1`).
pub const GRID_FLOOR_Y: i32 = GRID_HEIGHT + 1;

/// Sentinel returned by the highest-block search when nothing is below: the floor.
pub const FLOOR_SENTINEL: i32 = GRID_HEIGHT + 2;

/// A block whose highest unit locks above this row ends the game.
pub const GAME_OVER_ROW: i32 = 2;

/// Fixed clock period in milliseconds.
pub const TICK_RATE_MS: u64 = 100;

/// Gravity period at level 0 in milliseconds.
pub const BASE_SPEED_MS: f64 = 850.0;

/// Tick modulus of a fresh game; only `elapsed == 0` is active until it is recomputed.
pub const INITIAL_TICK_SPEED: u32 = 1000;

/// Points per cleared row.
pub const ROW_CLEAR_POINTS: u32 = 25;

/// The seven tetromino piece kinds, in random-draw order (`1..=7`).
///
/// Each piece carries a fixed color tag:
/// - **O**: yellow square
/// - **I**: cyan bar
/// - **J**: blue
/// - **L**: orange
/// - **S**: green
/// - **T**: purple
/// - **Z**: red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    J,
    L,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in draw order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Map a random draw in `1..=7` to a piece kind.
    ///
    /// Draws outside the range clamp to the nearest end, so every draw maps to a piece.
    ///
    /// ```
    /// use fold_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_draw(7), PieceKind::Z);
    /// assert_eq!(PieceKind::from_draw(0), PieceKind::O);
    /// assert_eq!(PieceKind::from_draw(99), PieceKind::Z);
    /// ```
    pub fn from_draw(draw: u32) -> Self {
        let idx = draw.clamp(1, 7) - 1;
        Self::ALL[idx as usize]
    }

    /// The draw value (`1..=7`) that selects this kind.
    pub fn draw(&self) -> u32 {
        match self {
            PieceKind::O => 1,
            PieceKind::I => 2,
            PieceKind::J => 3,
            PieceKind::L => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Color tag as a hex string
    pub fn colour(&self) -> &'static str {
        match self {
            PieceKind::O => "#ffff00",
            PieceKind::I => "#00ffff",
            PieceKind::J => "#0000ff",
            PieceKind::L => "#ffaa00",
            PieceKind::S => "#00ff00",
            PieceKind::T => "#9900ff",
            PieceKind::Z => "#ff0000",
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(PieceKind::O),
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "o",
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Commands folded over the game state, one at a time and in arrival order.
///
/// Input collaborators emit everything except `Tick`; the clock emits `Tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Shift the current block sideways by `amount` columns
    Move(i32),
    /// Hard drop the current block to its lowest valid position
    Drop,
    /// Rotate the current block 90 degrees counter-clockwise
    RotateLeft,
    /// Rotate the current block 90 degrees clockwise
    RotateRight,
    /// One clock firing: elapsed tick count and a fresh piece draw
    Tick { elapsed: u64, draw: u32 },
    /// Start over after the game has ended
    Restart,
}

impl Action {
    /// Parse an input action from its script name (case-insensitive).
    ///
    /// `Tick` is produced by the clock only and has no script name.
    ///
    /// ```
    /// use fold_tetris_types::Action;
    ///
    /// assert_eq!(Action::from_str("moveRight"), Some(Action::Move(1)));
    /// assert_eq!(Action::from_str("DROP"), Some(Action::Drop));
    /// assert_eq!(Action::from_str("tick"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Action::Move(-1)),
            "moveright" => Some(Action::Move(1)),
            "drop" => Some(Action::Drop),
            "rotateleft" => Some(Action::RotateLeft),
            "rotateright" => Some(Action::RotateRight),
            "restart" => Some(Action::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Move(amount) if *amount < 0 => "moveLeft",
            Action::Move(_) => "moveRight",
            Action::Drop => "drop",
            Action::RotateLeft => "rotateLeft",
            Action::RotateRight => "rotateRight",
            Action::Tick { .. } => "tick",
            Action::Restart => "restart",
        }
    }

    pub fn is_tick(&self) -> bool {
        matches!(self, Action::Tick { .. })
    }
}
