//! Collision module - placement checks, wall kicks and hard-drop distance

use crate::board::GameGrid;
use crate::pieces::{Block, Transform, Unit};
use crate::types::{FLOOR_SENTINEL, GRID_FLOOR_Y, GRID_WIDTH};

/// Check a transformed block against the walls, the floor and the grid.
///
/// There is no upper bound on `y`: blocks may poke above the visible top while
/// spawning.
pub fn valid_move(grid: &GameGrid, block: &Block, transform: Transform) -> bool {
    let moved = transform.apply(block);
    moved.units.iter().all(|u| {
        u.x >= 0 && u.x < GRID_WIDTH && u.y <= GRID_FLOOR_Y && !grid.is_occupied(u.x, u.y)
    })
}

/// Retry a failed transform with the block shifted one column left, then right.
///
/// Returns the first placement that works, or the untouched block.
pub fn wall_kick(grid: &GameGrid, block: &Block, transform: Transform) -> Block {
    for shift in [-1, 1] {
        let kicked = block.move_x(shift);
        if valid_move(grid, &kicked, transform) {
            return transform.apply(&kicked);
        }
    }
    block.clone()
}

/// Apply a rotation if it fits, otherwise try a kick, otherwise keep the block
pub fn rotate_or_kick(grid: &GameGrid, block: &Block, transform: Transform) -> Block {
    if valid_move(grid, block, transform) {
        transform.apply(block)
    } else {
        wall_kick(grid, block, transform)
    }
}

/// Smallest `y` among `units`, or [`FLOOR_SENTINEL`] when there are none
pub fn highest_block<'a>(units: impl IntoIterator<Item = &'a Unit>) -> i32 {
    units
        .into_iter()
        .map(|u| u.y)
        .fold(FLOOR_SENTINEL, i32::min)
}

/// Rows the block can fall before any unit meets the grid or the floor.
///
/// Each unit looks only at grid units in its own column below it; the block's
/// distance is the smallest of the four.
pub fn drop_distance(grid: &GameGrid, block: &Block) -> i32 {
    block
        .units
        .iter()
        .map(|u| highest_block(grid.column_below(u.x, u.y)) - u.y - 1)
        .min()
        .unwrap_or(0)
}
