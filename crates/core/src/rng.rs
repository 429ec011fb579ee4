//! RNG module - deterministic piece draws
//!
//! A linear congruential hash with GCC's constants drives every random choice.
//! `hash` is pure, so the whole sequence is reproducible from one seed.
//!
//! The [`TickClock`] re-hashes a running seed on every clock firing, active or
//! not, so the draw sequence does not depend on the current game speed.

use crate::types::Action;

/// LCG multiplier
pub const LCG_MULTIPLIER: u64 = 1_103_515_245;

/// LCG increment
pub const LCG_INCREMENT: u64 = 12_345;

/// LCG modulus (2^31)
pub const LCG_MODULUS: u64 = 0x8000_0000;

/// Number of piece kinds a draw selects from
const DRAW_RANGE: u64 = 7;

/// One LCG step: `(A * seed + C) mod 2^31`.
///
/// The modulus divides 2^64, so wrapping arithmetic in `u64` is exact.
pub fn hash(seed: u32) -> u32 {
    let next = (seed as u64)
        .wrapping_mul(LCG_MULTIPLIER)
        .wrapping_add(LCG_INCREMENT)
        % LCG_MODULUS;
    next as u32
}

/// Scale a hash into `1..=7` via `ceil(hash * 7 / (M - 1))`.
///
/// A hash of exactly 0 scales to 0; piece selection clamps that into range.
pub fn scale(hash: u32) -> u32 {
    let numerator = hash as u64 * DRAW_RANGE;
    let denominator = LCG_MODULUS - 1;
    numerator.div_ceil(denominator) as u32
}

/// `scale(hash(seed))`
pub fn scaled_number(seed: u32) -> u32 {
    scale(hash(seed))
}

/// Fixed-rate clock state: running seed plus elapsed firing count.
///
/// Each call to [`TickClock::next_tick`] re-hashes the seed and emits
/// `Tick { elapsed, draw }`, with `elapsed` counting up from 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickClock {
    seed: u32,
    elapsed: u64,
}

impl TickClock {
    /// Create a clock whose first draw is `scaled_number(seed)`
    pub fn new(seed: u32) -> Self {
        Self { seed, elapsed: 0 }
    }

    /// Produce the next tick action and advance the clock
    pub fn next_tick(&mut self) -> Action {
        self.seed = hash(self.seed);
        let action = Action::Tick {
            elapsed: self.elapsed,
            draw: scale(self.seed),
        };
        self.elapsed += 1;
        action
    }

    /// Number of ticks emitted so far
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Current running seed (the last hash emitted)
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Iterator for TickClock {
    type Item = Action;

    fn next(&mut self) -> Option<Action> {
        Some(self.next_tick())
    }
}
