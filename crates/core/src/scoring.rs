//! Scoring module - level, score and speed progression
//!
//! Level grows by half a level per cleared row, so it is fractional after an odd
//! number of rows. The speed curve reads the fractional value; only the displayed
//! level is floored.

use crate::types::{BASE_SPEED_MS, ROW_CLEAR_POINTS, TICK_RATE_MS};

/// Level gained for clearing `rows` rows at once
pub fn level_gain(rows: usize) -> f64 {
    rows as f64 / 2.0
}

/// Score gained for clearing `rows` rows at once
pub fn row_clear_score(rows: usize) -> u32 {
    ROW_CLEAR_POINTS * rows as u32
}

/// Gravity period in milliseconds: `850 / 2^(level / 4)`
pub fn calculate_speed(level: f64) -> f64 {
    BASE_SPEED_MS / 2f64.powf(level / 4.0)
}

/// Tick modulus for a level: the gravity period in whole clock periods, rounded up.
///
/// Never below 1, so every tick is active once the curve bottoms out.
pub fn tick_speed(level: f64) -> u32 {
    let ticks = (calculate_speed(level) / TICK_RATE_MS as f64).ceil();
    ticks.max(1.0) as u32
}

/// Level shown to the player
pub fn display_level(level: f64) -> u32 {
    level.max(0.0).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_gain_is_half_per_row() {
        assert_eq!(level_gain(0), 0.0);
        assert_eq!(level_gain(1), 0.5);
        assert_eq!(level_gain(4), 2.0);
    }

    #[test]
    fn test_row_clear_score() {
        assert_eq!(row_clear_score(0), 0);
        assert_eq!(row_clear_score(1), 25);
        assert_eq!(row_clear_score(3), 75);
    }

    #[test]
    fn test_speed_curve() {
        assert_eq!(calculate_speed(0.0), 850.0);
        assert!((calculate_speed(4.0) - 425.0).abs() < 1e-9);
        assert!((calculate_speed(8.0) - 212.5).abs() < 1e-9);
    }

    #[test]
    fn test_tick_speed_steps() {
        assert_eq!(tick_speed(0.0), 9);
        assert_eq!(tick_speed(0.5), 8);
        assert_eq!(tick_speed(4.0), 5);
        assert_eq!(tick_speed(8.0), 3);
    }

    #[test]
    fn test_tick_speed_floor() {
        assert_eq!(tick_speed(1000.0), 1);
    }

    #[test]
    fn test_display_level_floors() {
        assert_eq!(display_level(0.0), 0);
        assert_eq!(display_level(2.5), 2);
        assert_eq!(display_level(3.0), 3);
    }
}
