//! Pieces module - units, blocks and the transforms that move them
//!
//! A block is four units plus a floating-point rotation center. Pieces whose true
//! center falls between cells (O and I) carry a half-integer center, so rotating
//! about it still lands every unit on an integer cell.
//!
//! Transforms never consult the grid; whether a result is legal is decided in
//! [`crate::collision`].

use std::fmt;

use crate::types::{PieceKind, GRID_WIDTH};

/// Stable identity of a unit: the serial of the block it was generated in plus its slot.
///
/// Moves and rotations keep ids; locking keeps ids; clearing retires them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId {
    pub block: u32,
    pub slot: u8,
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.block, (b'a' + self.slot) as char)
    }
}

/// A single occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unit {
    pub id: UnitId,
    pub x: i32,
    pub y: i32,
    pub kind: PieceKind,
}

impl Unit {
    /// Color tag of the piece this unit came from
    pub fn colour(&self) -> &'static str {
        self.kind.colour()
    }
}

/// A tetromino: four units and the point it rotates around
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub units: [Unit; 4],
    pub cx: f64,
    pub cy: f64,
}

/// A pure block-to-block mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    MoveX(i32),
    MoveY(i32),
    RotateLeft,
    RotateRight,
}

impl Transform {
    /// One row down
    pub const DOWN: Transform = Transform::MoveY(1);

    pub fn apply(self, block: &Block) -> Block {
        match self {
            Transform::MoveX(amount) => block.move_x(amount),
            Transform::MoveY(amount) => block.move_y(amount),
            Transform::RotateLeft => block.rotate_left(),
            Transform::RotateRight => block.rotate_right(),
        }
    }
}

impl Block {
    fn map_units(&self, f: impl Fn(&Unit) -> (i32, i32)) -> [Unit; 4] {
        self.units.map(|u| {
            let (x, y) = f(&u);
            Unit { x, y, ..u }
        })
    }

    /// Translate every unit and the center along x
    pub fn move_x(&self, amount: i32) -> Block {
        Block {
            units: self.map_units(|u| (u.x + amount, u.y)),
            cx: self.cx + amount as f64,
            cy: self.cy,
        }
    }

    /// Translate every unit and the center along y
    pub fn move_y(&self, amount: i32) -> Block {
        Block {
            units: self.map_units(|u| (u.x, u.y + amount)),
            cx: self.cx,
            cy: self.cy + amount as f64,
        }
    }

    /// Rotate 90 degrees clockwise: `(x, y) -> (cx - (y - cy), cy + (x - cx))`
    pub fn rotate_right(&self) -> Block {
        let (cx, cy) = (self.cx, self.cy);
        Block {
            units: self.map_units(|u| {
                let (x, y) = (u.x as f64, u.y as f64);
                (to_cell(cx - (y - cy)), to_cell(cy + (x - cx)))
            }),
            cx,
            cy,
        }
    }

    /// Rotate 90 degrees counter-clockwise: `(x, y) -> (cx + (y - cy), cy - (x - cx))`
    pub fn rotate_left(&self) -> Block {
        let (cx, cy) = (self.cx, self.cy);
        Block {
            units: self.map_units(|u| {
                let (x, y) = (u.x as f64, u.y as f64);
                (to_cell(cx + (y - cy)), to_cell(cy - (x - cx)))
            }),
            cx,
            cy,
        }
    }

    pub fn transform(&self, t: Transform) -> Block {
        t.apply(self)
    }

    /// Kind of the piece (all four units share it)
    pub fn kind(&self) -> PieceKind {
        self.units[0].kind
    }

    /// Unit positions in slot order
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.units.map(|u| (u.x, u.y))
    }
}

// Offsets are whole or half cells, so results are exact before rounding.
fn to_cell(v: f64) -> i32 {
    v.round() as i32
}

/// Spawn shape: unit offsets and rotation center, before the spawn column shift.
struct PieceShape {
    cells: [(i32, i32); 4],
    center: (f64, f64),
}

fn shape(kind: PieceKind) -> PieceShape {
    match kind {
        PieceKind::O => PieceShape {
            cells: [(0, 0), (0, 1), (1, 0), (1, 1)],
            center: (0.5, 0.5),
        },
        PieceKind::I => PieceShape {
            cells: [(-1, 0), (0, 0), (1, 0), (2, 0)],
            center: (0.5, 0.5),
        },
        PieceKind::J => PieceShape {
            cells: [(-1, 0), (0, 0), (1, 0), (1, 1)],
            center: (0.0, 0.0),
        },
        PieceKind::L => PieceShape {
            cells: [(-1, 0), (0, 0), (1, 0), (-1, 1)],
            center: (0.0, 0.0),
        },
        PieceKind::S => PieceShape {
            cells: [(0, 1), (0, 0), (1, 0), (-1, 1)],
            center: (0.0, 1.0),
        },
        PieceKind::T => PieceShape {
            cells: [(-1, 0), (0, 0), (1, 0), (0, 1)],
            center: (0.0, 0.0),
        },
        PieceKind::Z => PieceShape {
            cells: [(-1, 0), (0, 0), (0, 1), (1, 1)],
            center: (0.0, 1.0),
        },
    }
}

/// Column added to every spawn offset
pub const SPAWN_COLUMN: i32 = GRID_WIDTH / 2 - 1;

/// Create a block of `kind` at the spawn position, tagging its units with `serial`
pub fn spawn_block(kind: PieceKind, serial: u32) -> Block {
    let PieceShape { cells, center } = shape(kind);
    let mut slot = 0u8;
    let units = cells.map(|(x, y)| {
        let unit = Unit {
            id: UnitId { block: serial, slot },
            x: x + SPAWN_COLUMN,
            y,
            kind,
        };
        slot += 1;
        unit
    });

    Block {
        units,
        cx: center.0 + SPAWN_COLUMN as f64,
        cy: center.1,
    }
}
