use crate::pieces::{Piece, Shape};
use crate::types::{Cell, GamePhase, LockEvent, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

pub type BoardGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Board cells covered at row offset `y` instead of the piece's own row.
    pub fn cells_at(&self, y: i8) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, y + dy))
    }
}

/// Read-only copy of everything the presentation layer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    /// None before the first start.
    pub active: Option<ActiveSnapshot>,
    /// Row the active piece would land on after a hard drop.
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub phase: GamePhase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub pieces_locked: u32,
    pub last_lock: Option<LockEvent>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            hold: None,
            can_hold: true,
            phase: GamePhase::Idle,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: 0,
            pieces_locked: 0,
            last_lock: None,
        }
    }
}
