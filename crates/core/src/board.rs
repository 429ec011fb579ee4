//! Board module - the grid of locked units
//!
//! The grid is a sequence of units rather than a cell array: units above the
//! visible top (negative `y`) are legal while a game is ending, and unit ids must
//! survive row compaction so renderers can track them.
//!
//! Coordinates: `x` in `0..GRID_WIDTH` (left to right), `y` grows downward with
//! the floor row at `GRID_HEIGHT + 1`.

use log::debug;

use crate::pieces::{Block, Unit};
use crate::types::GRID_WIDTH;

/// Locked units
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameGrid {
    units: Vec<Unit>,
}

impl GameGrid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self { units: Vec::new() }
    }

    /// Build a grid from existing units.
    ///
    /// Callers keep positions unique; the grid never places two units on one cell itself.
    pub fn from_units(units: Vec<Unit>) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Check if a unit sits at (x, y)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.units.iter().any(|u| u.x == x && u.y == y)
    }

    /// Units in column `x` strictly below row `y`
    pub fn column_below(&self, x: i32, y: i32) -> impl Iterator<Item = &Unit> + '_ {
        self.units.iter().filter(move |u| u.x == x && u.y > y)
    }

    /// Number of units on row `y`
    pub fn row_count(&self, y: i32) -> usize {
        self.units.iter().filter(|u| u.y == y).count()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i32) -> bool {
        self.row_count(y) == GRID_WIDTH as usize
    }

    /// Distinct rows whose unit count equals the grid width, sorted top to bottom
    pub fn full_rows(&self) -> Vec<i32> {
        let mut rows: Vec<i32> = self.units.iter().map(|u| u.y).collect();
        rows.sort_unstable();
        rows.dedup();
        rows.retain(|&y| self.is_row_full(y));
        rows
    }

    /// Remove every full row and drop the rows above them into the gaps.
    ///
    /// Each surviving unit moves down by the number of full rows strictly below it,
    /// so relative order is preserved and ids are kept.
    pub fn cleared(&self) -> GameGrid {
        let full = self.full_rows();
        if full.is_empty() {
            return self.clone();
        }

        debug!("clearing rows {:?}", full);
        let units = self
            .units
            .iter()
            .filter(|u| full.binary_search(&u.y).is_err())
            .map(|u| {
                let below = full.iter().filter(|&&row| row > u.y).count() as i32;
                Unit { y: u.y + below, ..*u }
            })
            .collect();
        GameGrid { units }
    }

    /// A new grid with the block's units appended
    pub fn with_locked(&self, block: &Block) -> GameGrid {
        let mut units = Vec::with_capacity(self.units.len() + block.units.len());
        units.extend_from_slice(&self.units);
        units.extend_from_slice(&block.units);
        GameGrid { units }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Unit> {
        self.units.iter()
    }
}

impl<'a> IntoIterator for &'a GameGrid {
    type Item = &'a Unit;
    type IntoIter = std::slice::Iter<'a, Unit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}

impl FromIterator<Unit> for GameGrid {
    fn from_iter<I: IntoIterator<Item = Unit>>(iter: I) -> Self {
        Self {
            units: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{spawn_block, UnitId};
    use crate::types::PieceKind;

    fn unit(serial: u32, x: i32, y: i32) -> Unit {
        Unit {
            id: UnitId {
                block: serial,
                slot: 0,
            },
            x,
            y,
            kind: PieceKind::I,
        }
    }

    fn row(y: i32, serial: u32) -> Vec<Unit> {
        (0..GRID_WIDTH).map(|x| unit(serial + x as u32, x, y)).collect()
    }

    #[test]
    fn test_full_rows_deduplicates() {
        let mut units = row(19, 0);
        units.extend(row(21, 100));
        units.push(unit(500, 3, 18));
        let grid = GameGrid::from_units(units);

        assert_eq!(grid.full_rows(), vec![19, 21]);
    }

    #[test]
    fn test_cleared_shifts_only_rows_above() {
        let mut units = row(20, 0);
        units.push(unit(100, 2, 19));
        units.push(unit(101, 7, 21));
        let grid = GameGrid::from_units(units).cleared();

        assert_eq!(grid.len(), 2);
        assert!(grid.is_occupied(2, 20));
        assert!(grid.is_occupied(7, 21));
        assert_eq!(grid.row_count(19), 0);
    }

    #[test]
    fn test_cleared_counts_every_full_row_below() {
        let mut units = row(21, 0);
        units.extend(row(19, 100));
        units.push(unit(200, 4, 20));
        units.push(unit(201, 4, 18));
        let grid = GameGrid::from_units(units).cleared();

        // 20 has one cleared row below it, 18 has two.
        assert!(grid.is_occupied(4, 21));
        assert!(grid.is_occupied(4, 20));
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_cleared_keeps_ids() {
        let mut units = row(21, 0);
        units.push(unit(77, 1, 3));
        let grid = GameGrid::from_units(units).cleared();
        assert_eq!(grid.units()[0].id.block, 77);
        assert_eq!(grid.units()[0].y, 4);
    }

    #[test]
    fn test_with_locked_appends_block() {
        let grid = GameGrid::new().with_locked(&spawn_block(PieceKind::O, 3));
        assert_eq!(grid.len(), 4);
        assert!(grid.is_occupied(4, 0));
        assert!(grid.is_occupied(5, 1));
    }

    #[test]
    fn test_column_below() {
        let grid = GameGrid::from_units(vec![unit(0, 2, 5), unit(1, 2, 9), unit(2, 3, 9)]);
        let ys: Vec<i32> = grid.column_below(2, 5).map(|u| u.y).collect();
        assert_eq!(ys, vec![9]);
    }
}
