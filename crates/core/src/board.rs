//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of the
//! piece that locked there. Storage is a flat row-major array so clears are
//! plain `copy_within` calls with no allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;
const BOARD_SIZE: usize = WIDTH * HEIGHT;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Row-major cells (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y), or None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Borrow row `y` (0 = top), or None below the floor.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= HEIGHT {
            return None;
        }
        let start = y * WIDTH;
        Some(&self.cells[start..start + WIDTH])
    }

    /// Iterate rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH)
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(|cell| cell.is_none()))
    }

    /// Fill a whole row with `kind`, leaving the listed columns empty.
    pub fn fill_row_except(&mut self, y: i8, kind: PieceKind, holes: &[i8]) {
        for x in 0..BOARD_WIDTH as i8 {
            let cell = if holes.contains(&x) { None } else { Some(kind) };
            self.set(x, y, cell);
        }
    }

    /// Whether `piece` overlaps a wall, the floor, or a locked cell.
    ///
    /// Cells above the top edge (y < 0) only count against the side walls;
    /// they never hit the grid.
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.cells().any(|(x, y)| {
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                return true;
            }
            y >= 0 && self.is_occupied(x, y)
        })
    }

    /// Write the piece's kind into every covered cell on or below row 0.
    pub fn merge(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            if y >= 0 {
                self.set(x, y, Some(piece.kind));
            }
        }
    }

    /// Remove every full row and return their indices (bottom to top, in
    /// pre-clear coordinates).
    ///
    /// Remaining rows keep their order and slide down; the freed rows at the
    /// top are emptied, so the board always keeps `BOARD_HEIGHT` rows. A
    /// single piece spans at most four rows, which bounds the result.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared = ArrayVec::new();
        let mut write_y = HEIGHT;

        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                if cleared.try_push(read_y).is_err() {
                    // More than four full rows can only come from a hand-built
                    // board; compact them anyway.
                    continue;
                }
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * WIDTH;
                    self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
                }
            }
        }

        self.cells[..write_y * WIDTH].fill(None);
        cleared
    }

    /// Remove every full row and return how many were removed.
    pub fn clear_lines(&mut self) -> u32 {
        // Counted up front: `clear_full_rows` reports at most four indices.
        let full = self.filled_rows();
        if full > 0 {
            self.clear_full_rows();
        }
        full
    }

    fn filled_rows(&self) -> u32 {
        (0..HEIGHT).filter(|&y| self.is_row_full(y)).count() as u32
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into a row-major 2D array.
    pub fn write_grid(&self, out: &mut [[Cell; WIDTH]; HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from rows drawn as text, bottom-aligned.
    ///
    /// Each string is one row; `.` is empty and a piece letter fills the
    /// cell. Fewer than 20 rows are padded with empty rows on top.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let top = HEIGHT.saturating_sub(rows.len());
        for (i, row) in rows.iter().enumerate().take(HEIGHT) {
            for (x, ch) in row.chars().enumerate().take(WIDTH) {
                let cell = PieceKind::from_str(&ch.to_string());
                board.set(x as i8, (top + i) as i8, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
