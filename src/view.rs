//! BoardView: draws the playfield, the next-block preview and the stats panel.
//!
//! Frames whose diff is empty are skipped; any other frame redraws the whole board.

use std::io::{self, Stdout, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use fold_tetris::core::{Block, Frame, State, Unit};
use fold_tetris::engine::FrameSink;
use fold_tetris::types::{PieceKind, GRID_FLOOR_Y, GRID_WIDTH};

/// Rows drawn: 0 through the floor row
pub const BOARD_ROWS: usize = GRID_FLOOR_Y as usize + 1;
const BOARD_COLS: usize = GRID_WIDTH as usize;

const CELL_FILLED: &str = "[]";
const CELL_EMPTY: &str = " .";

// Terminal column where the side panel starts: border + 2 chars per cell + border + gap.
const PANEL_X: u16 = (BOARD_COLS * 2 + 4) as u16;

pub type Cells = [[Option<PieceKind>; BOARD_COLS]; BOARD_ROWS];

/// Grid and falling block as a row-major cell array.
///
/// Units above the top row or outside the walls are not drawn.
pub fn board_cells(state: &State) -> Cells {
    let mut cells = [[None; BOARD_COLS]; BOARD_ROWS];
    for u in state.grid.iter().chain(state.current_block.units.iter()) {
        if let Some(cell) = cell_mut(&mut cells, u) {
            *cell = Some(u.kind);
        }
    }
    cells
}

fn cell_mut<'a>(cells: &'a mut Cells, u: &Unit) -> Option<&'a mut Option<PieceKind>> {
    let x = usize::try_from(u.x).ok()?;
    let y = usize::try_from(u.y).ok()?;
    cells.get_mut(y)?.get_mut(x)
}

/// The preview block normalised into a 4x2 box
pub fn preview_cells(block: &Block) -> [[bool; 4]; 2] {
    let min_x = block.units.iter().map(|u| u.x).min().unwrap_or(0);
    let min_y = block.units.iter().map(|u| u.y).min().unwrap_or(0);
    let mut cells = [[false; 4]; 2];
    for u in &block.units {
        let (x, y) = ((u.x - min_x) as usize, (u.y - min_y) as usize);
        if let Some(cell) = cells.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = true;
        }
    }
    cells
}

/// Parse a `#rrggbb` colour tag
fn tag_colour(tag: &str) -> Color {
    let channel = |i: usize| {
        tag.get(i..i + 2)
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .unwrap_or(0xff)
    };
    Color::Rgb {
        r: channel(1),
        g: channel(3),
        b: channel(5),
    }
}

pub struct BoardView {
    stdout: Stdout,
    drawn: bool,
}

impl BoardView {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            drawn: false,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, state: &State) -> Result<()> {
        let cells = board_cells(state);
        for (y, row) in cells.iter().enumerate() {
            self.stdout.queue(cursor::MoveTo(0, y as u16))?;
            self.stdout.queue(Print('|'))?;
            for cell in row {
                match cell {
                    Some(kind) => {
                        self.stdout.queue(SetForegroundColor(tag_colour(kind.colour())))?;
                        self.stdout.queue(Print(CELL_FILLED))?;
                        self.stdout.queue(ResetColor)?;
                    }
                    None => {
                        self.stdout.queue(Print(CELL_EMPTY))?;
                    }
                }
            }
            self.stdout.queue(Print('|'))?;
        }
        let bottom = format!("+{}+", "-".repeat(BOARD_COLS * 2));
        self.stdout.queue(cursor::MoveTo(0, BOARD_ROWS as u16))?;
        self.stdout.queue(Print(bottom))?;

        self.draw_panel(state)?;
        self.stdout.flush()?;
        Ok(())
    }

    fn draw_panel(&mut self, state: &State) -> Result<()> {
        let next_colour = tag_colour(state.next_block.kind().colour());
        self.stdout.queue(cursor::MoveTo(PANEL_X, 0))?;
        self.stdout.queue(Print("next"))?;
        for (i, row) in preview_cells(&state.next_block).iter().enumerate() {
            self.stdout.queue(cursor::MoveTo(PANEL_X, 1 + i as u16))?;
            self.stdout.queue(SetForegroundColor(next_colour))?;
            for &filled in row {
                self.stdout.queue(Print(if filled { CELL_FILLED } else { "  " }))?;
            }
            self.stdout.queue(ResetColor)?;
        }

        let lines = [
            format!("score {}", state.score),
            format!("level {}", state.display_level()),
            format!("high  {}", state.highscore),
            if state.game_end {
                "GAME OVER (r to restart)".to_string()
            } else {
                String::new()
            },
            String::new(),
            "a/d move  s drop".to_string(),
            "q/e rotate  esc quit".to_string(),
        ];
        for (i, line) in lines.iter().enumerate() {
            self.stdout.queue(cursor::MoveTo(PANEL_X, 4 + i as u16))?;
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
            self.stdout.queue(Print(line))?;
        }
        Ok(())
    }
}

impl Default for BoardView {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSink for BoardView {
    fn frame(&mut self, frame: &Frame) -> Result<()> {
        if self.drawn && frame.diff().is_empty() {
            return Ok(());
        }
        self.drawn = true;
        self.draw(&frame.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fold_tetris::core::{spawn_block, GameGrid, UnitId};

    fn unit(x: i32, y: i32) -> Unit {
        Unit {
            id: UnitId { block: 90, slot: 0 },
            x,
            y,
            kind: PieceKind::L,
        }
    }

    #[test]
    fn test_board_cells_include_grid_and_falling_block() {
        let state = State {
            current_block: spawn_block(PieceKind::O, 1).move_y(3),
            grid: GameGrid::from_units(vec![unit(0, 21), unit(9, 20)]),
            ..State::new(5)
        };
        let cells = board_cells(&state);

        assert_eq!(cells[21][0], Some(PieceKind::L));
        assert_eq!(cells[20][9], Some(PieceKind::L));
        for (x, y) in [(4, 3), (5, 3), (4, 4), (5, 4)] {
            assert_eq!(cells[y][x], Some(PieceKind::O));
        }
        let filled = cells.iter().flatten().filter(|c| c.is_some()).count();
        assert_eq!(filled, 6);
    }

    #[test]
    fn test_units_above_the_top_are_hidden() {
        let state = State {
            current_block: spawn_block(PieceKind::I, 1).move_y(-1),
            ..State::new(5)
        };
        let cells = board_cells(&state);
        assert!(cells.iter().flatten().all(|c| c.is_none()));
    }

    #[test]
    fn test_preview_is_normalised() {
        assert_eq!(
            preview_cells(&spawn_block(PieceKind::T, 0)),
            [[true, true, true, false], [false, true, false, false]]
        );
        assert_eq!(
            preview_cells(&spawn_block(PieceKind::I, 0)),
            [[true, true, true, true], [false, false, false, false]]
        );
    }

    #[test]
    fn test_tag_colour() {
        assert_eq!(tag_colour("#ffaa00"), Color::Rgb { r: 0xff, g: 0xaa, b: 0x00 });
    }
}
