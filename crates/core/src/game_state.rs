//! Game state module - the action dispatcher
//!
//! [`State::apply`] is the single transition table: one exhaustive match over
//! [`Action`]. [`reduce`] wraps it with the game-over guard and is what the
//! fold over the action stream calls.
//!
//! Only `Tick` moves time forward: it clears rows, locks blocks, spawns pieces
//! and recomputes speed, and only on ticks where `elapsed % tick_speed == 0`.
//! Speed is taken from the level the tick started with, so a clear speeds the
//! game up one active tick later.

use log::{debug, trace};

use crate::board::GameGrid;
use crate::collision::{drop_distance, highest_block, rotate_or_kick, valid_move};
use crate::pieces::{spawn_block, Block, Transform};
use crate::rng::scaled_number;
use crate::scoring::{display_level, level_gain, row_clear_score, tick_speed};
use crate::types::{Action, PieceKind, GAME_OVER_ROW, INITIAL_TICK_SPEED};

/// One immutable game snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// Fractional level; half a level per cleared row
    pub level: f64,
    pub score: u32,
    pub highscore: u32,
    pub next_block: Block,
    pub current_block: Block,
    pub grid: GameGrid,
    pub game_end: bool,
    /// Tick modulus: a tick is active when `elapsed % tick_speed == 0`
    pub tick_speed: u32,
    /// Serial handed to the next generated block
    pub block_serial: u32,
}

impl State {
    /// Create the starting state for a seed.
    ///
    /// The preview comes from `seed + 1` and the falling block from `seed + 2`,
    /// raised one row so its first active tick brings it to the spawn row.
    pub fn new(seed: u32) -> Self {
        let next_kind = PieceKind::from_draw(scaled_number(seed.wrapping_add(1)));
        let current_kind = PieceKind::from_draw(scaled_number(seed.wrapping_add(2)));

        Self {
            level: 0.0,
            score: 0,
            highscore: 0,
            next_block: spawn_block(next_kind, 0),
            current_block: spawn_block(current_kind, 1).move_y(-1),
            grid: GameGrid::new(),
            game_end: false,
            tick_speed: INITIAL_TICK_SPEED,
            block_serial: 2,
        }
    }

    /// Level shown to the player
    pub fn display_level(&self) -> u32 {
        display_level(self.level)
    }

    /// Apply one action with no game-over guard
    pub fn apply(&self, action: Action) -> State {
        match action {
            Action::Move(amount) => self.moved(amount),
            Action::Drop => self.dropped(),
            Action::RotateLeft => self.rotated(Transform::RotateLeft),
            Action::RotateRight => self.rotated(Transform::RotateRight),
            Action::Tick { elapsed, draw } => self.ticked(elapsed, draw),
            Action::Restart => self.restarted(),
        }
    }

    /// Apply one action, skipping it when the game is over and would stay over
    pub fn reduce(&self, action: Action) -> State {
        reduce(self, action)
    }

    fn with_current(&self, current_block: Block) -> State {
        State {
            current_block,
            ..self.clone()
        }
    }

    fn moved(&self, amount: i32) -> State {
        let transform = Transform::MoveX(amount);
        if valid_move(&self.grid, &self.current_block, transform) {
            self.with_current(transform.apply(&self.current_block))
        } else {
            self.clone()
        }
    }

    fn dropped(&self) -> State {
        let distance = drop_distance(&self.grid, &self.current_block);
        self.with_current(self.current_block.move_y(distance))
    }

    fn rotated(&self, transform: Transform) -> State {
        self.with_current(rotate_or_kick(&self.grid, &self.current_block, transform))
    }

    fn restarted(&self) -> State {
        if !self.game_end {
            return self.clone();
        }

        debug!(
            "restart: score {} highscore {}",
            self.score,
            self.highscore.max(self.score)
        );
        State {
            level: 0.0,
            score: 0,
            highscore: self.highscore.max(self.score),
            grid: GameGrid::new(),
            game_end: false,
            ..self.clone()
        }
    }

    fn ticked(&self, elapsed: u64, draw: u32) -> State {
        if elapsed % self.tick_speed.max(1) as u64 != 0 {
            return self.clone();
        }

        let contact = !valid_move(&self.grid, &self.current_block, Transform::DOWN);
        let full_rows = self.grid.full_rows().len();
        let level = self.level + level_gain(full_rows);
        let score = self.score + row_clear_score(full_rows);
        let cleared = self.grid.cleared();

        if full_rows > 0 {
            debug!(
                "cleared {} rows at tick {}: score {}, level {}",
                full_rows, elapsed, score, level
            );
        }

        if contact {
            let kind = PieceKind::from_draw(draw);
            let game_end = highest_block(&self.current_block.units) < GAME_OVER_ROW;
            debug!(
                "locked block {} at tick {}, next {}",
                self.current_block.units[0].id.block,
                elapsed,
                kind.as_str()
            );
            if game_end {
                debug!("game over at tick {}: score {}", elapsed, score);
            }

            State {
                level,
                score,
                highscore: self.highscore,
                next_block: spawn_block(kind, self.block_serial),
                current_block: self.next_block.clone(),
                grid: cleared.with_locked(&self.current_block),
                game_end,
                tick_speed: tick_speed(self.level),
                block_serial: self.block_serial.wrapping_add(1),
            }
        } else {
            State {
                level,
                score,
                current_block: self.current_block.move_y(1),
                grid: cleared,
                game_end: false,
                tick_speed: tick_speed(self.level),
                ..self.clone()
            }
        }
    }
}

/// Fold step: apply `action` unless the game is over and would stay over.
///
/// Restart is the only action that clears `game_end`, so it is the only one that
/// gets through once a game has ended.
pub fn reduce(state: &State, action: Action) -> State {
    let next = state.apply(action);
    if state.game_end && next.game_end {
        trace!("game ended, skipping {}", action.as_str());
        return state.clone();
    }
    trace!("applied {}", action.as_str());
    next
}
