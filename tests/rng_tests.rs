//! RNG tests - hash, draw scaling and the tick clock

use fold_tetris::core::{hash, scale, scaled_number, TickClock};
use fold_tetris::types::Action;

#[test]
fn test_hash_known_values() {
    assert_eq!(hash(0), 12345);
    assert_eq!(hash(1), 1_103_527_590);
}

#[test]
fn test_scale_known_values() {
    assert_eq!(scale(12345), 1);
    assert_eq!(scaled_number(0), 1);
    assert_eq!(scaled_number(1), 4);
}

#[test]
fn test_scaled_number_in_draw_range() {
    for seed in 1..5000u32 {
        let n = scaled_number(seed);
        assert!((1..=7).contains(&n), "seed {} drew {}", seed, n);
    }
}

#[test]
fn test_scaled_number_is_pure() {
    for seed in [0u32, 7, 42, 9999, u32::MAX] {
        assert_eq!(scaled_number(seed), scaled_number(seed));
    }
}

#[test]
fn test_tick_clock_counts_and_repeats() {
    let a: Vec<Action> = TickClock::new(42).take(50).collect();
    let b: Vec<Action> = TickClock::new(42).take(50).collect();
    assert_eq!(a, b);

    for (i, action) in a.iter().enumerate() {
        match action {
            Action::Tick { elapsed, .. } => assert_eq!(*elapsed, i as u64),
            other => panic!("clock produced {:?}", other),
        }
    }
}
