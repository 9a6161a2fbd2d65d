//! Pieces module - shape matrices, rotation, and horizontal kicks
//!
//! Every kind is described by a small square boolean matrix (4x4 for I, 2x2
//! for O, 3x3 for the rest). Rotation turns the matrix a quarter turn; a
//! rotation that would collide is retried at alternating horizontal offsets
//! before being rejected. There are no vertical kicks.

use crate::types::{PieceKind, RotateDir, BOARD_WIDTH, SPAWN_Y};

/// Largest matrix side (the I piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square occupancy matrix of a piece in local coordinates.
///
/// Only the top-left `size x size` corner of `rows` is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    rows: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build from row strings of `0`/`1`; the row count sets the size.
    const fn parse(src: &[&str]) -> Self {
        let mut rows = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < src.len() {
            let line = src[y].as_bytes();
            let mut x = 0;
            while x < line.len() {
                rows[y][x] = line[x] == b'1';
                x += 1;
            }
            y += 1;
        }
        Self {
            size: src.len() as u8,
            rows,
        }
    }

    /// Spawn orientation for `kind`.
    pub fn spawn(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => I_SHAPE,
            PieceKind::O => O_SHAPE,
            PieceKind::T => T_SHAPE,
            PieceKind::S => S_SHAPE,
            PieceKind::Z => Z_SHAPE,
            PieceKind::J => J_SHAPE,
            PieceKind::L => L_SHAPE,
        }
    }

    /// Side length of the matrix (also its width).
    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        let n = self.size as usize;
        col < n && row < n && self.rows[row][col]
    }

    /// Occupied cells as `(col, row)` offsets, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |row| {
            (0..n)
                .filter(move |&col| self.rows[row][col])
                .map(move |col| (col as i8, row as i8))
        })
    }

    /// The matrix turned a quarter turn.
    ///
    /// Transpose, then reverse each row (clockwise) or reverse the row order
    /// (counter-clockwise).
    pub fn rotated(&self, dir: RotateDir) -> Self {
        let n = self.size as usize;
        let mut out = Self {
            size: self.size,
            rows: [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
        };
        for y in 0..n {
            for x in 0..n {
                out.rows[y][x] = match dir {
                    RotateDir::Cw => self.rows[n - 1 - x][y],
                    RotateDir::Ccw => self.rows[x][n - 1 - y],
                };
            }
        }
        out
    }
}

const I_SHAPE: Shape = Shape::parse(&["0000", "1111", "0000", "0000"]);
const O_SHAPE: Shape = Shape::parse(&["11", "11"]);
const T_SHAPE: Shape = Shape::parse(&["010", "111", "000"]);
const S_SHAPE: Shape = Shape::parse(&["011", "110", "000"]);
const Z_SHAPE: Shape = Shape::parse(&["110", "011", "000"]);
const J_SHAPE: Shape = Shape::parse(&["100", "111", "000"]);
const L_SHAPE: Shape = Shape::parse(&["001", "111", "000"]);

/// Column that centers a matrix of `size` on the board.
pub fn spawn_x(size: u8) -> i8 {
    ((BOARD_WIDTH - size) / 2) as i8
}

/// A piece on the board: kind, current matrix, and matrix origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Fresh piece in spawn orientation, horizontally centered at `SPAWN_Y`.
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = Shape::spawn(kind);
        Self {
            kind,
            shape,
            x: spawn_x(shape.size()),
            y: SPAWN_Y,
        }
    }

    /// Board coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Same piece shifted by (dx, dy).
    pub fn offset(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Move back to the centered spawn column and row, keeping the matrix.
    pub fn reset_position(&mut self) {
        self.x = spawn_x(self.shape.size());
        self.y = SPAWN_Y;
    }
}

/// Rotate `piece` with horizontal kicks.
///
/// The rotated matrix is tried in place first. While it collides, x moves by
/// +1, -2, +3, -4, ... (so the tried columns are x, x+1, x-1, x+2, ...). Once
/// the next step would be larger than the matrix width the rotation is
/// rejected and `None` is returned; the caller keeps the original piece.
pub fn try_rotate(
    piece: &Piece,
    dir: RotateDir,
    collides: impl Fn(&Piece) -> bool,
) -> Option<Piece> {
    let mut candidate = Piece {
        shape: piece.shape.rotated(dir),
        ..*piece
    };
    let width = candidate.shape.size() as i8;

    let mut step: i8 = 1;
    while collides(&candidate) {
        candidate.x += step;
        step = -(step + step.signum());
        if step.abs() > width {
            return None;
        }
    }
    Some(candidate)
}
