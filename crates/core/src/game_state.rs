//! Game state module - owns the board, pieces, bag, and counters
//!
//! `GameState` is the only mutable aggregate in the game. It runs the
//! Idle -> Running -> GameOver lifecycle, applies input actions, and advances
//! the fall timer. Rejected moves and rotations leave the state untouched.

use crate::board::Board;
use crate::pieces::{try_rotate, Piece};
use crate::rng::PieceBag;
use crate::scoring::{apply_clear, drop_interval_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    bag: PieceBag,
    active: Piece,
    next: Piece,
    hold: Option<PieceKind>,
    can_hold: bool,
    phase: GamePhase,
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
    /// Milliseconds accumulated toward the next gravity step.
    drop_counter_ms: u32,
    pieces_locked: u32,
    /// Number of times `start` has been called.
    runs_started: u32,
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create an idle game. Pieces are already dealt so the first frame has
    /// something to show, but nothing moves until `start`.
    pub fn new(config: GameConfig) -> Self {
        // Counters and pieces are placeholders until `reset` deals.
        let mut state = Self {
            config,
            board: Board::new(),
            bag: PieceBag::new(config.seed),
            active: Piece::spawn(PieceKind::I),
            next: Piece::spawn(PieceKind::I),
            hold: None,
            can_hold: true,
            phase: GamePhase::Idle,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: 0,
            drop_counter_ms: 0,
            pieces_locked: 0,
            runs_started: 0,
            last_event: None,
        };
        state.reset();
        state
    }

    /// Clear the board and counters and deal a fresh bag.
    ///
    /// The bag's RNG keeps running across resets, so consecutive runs from
    /// one seed differ from each other but replay identically.
    fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = drop_interval_ms(1, self.config.base_drop_ms);
        self.drop_counter_ms = 0;
        self.hold = None;
        self.can_hold = true;
        self.pieces_locked = 0;
        self.last_event = None;
        self.bag.shuffle_bag();
        self.active = self.bag.next_piece();
        self.next = self.bag.next_piece();
    }

    /// Reset everything and begin a run. Valid from every phase.
    pub fn start(&mut self) {
        self.reset();
        self.phase = GamePhase::Running;
        self.runs_started = self.runs_started.wrapping_add(1);
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_counter_ms(&self) -> u32 {
        self.drop_counter_ms
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn runs_started(&self) -> u32 {
        self.runs_started
    }

    pub fn seed(&self) -> u32 {
        self.bag.seed()
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);

        let dealt = self.phase != GamePhase::Idle;
        out.active = dealt.then(|| ActiveSnapshot::from(self.active));
        out.ghost_y = dealt.then(|| self.landing_y());
        out.next = self.next.kind;
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.phase = self.phase;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
        out.pieces_locked = self.pieces_locked;
        out.last_lock = self.last_event;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Shift the active piece horizontally; false if blocked.
    pub(crate) fn try_move(&mut self, dx: i8) -> bool {
        let moved = self.active.offset(dx, 0);
        if self.board.collides(&moved) {
            return false;
        }
        self.active = moved;
        true
    }

    /// Rotate with horizontal kicks; false if every kick collides.
    pub(crate) fn try_rotate(&mut self, dir: RotateDir) -> bool {
        let board = &self.board;
        match try_rotate(&self.active, dir, |p| board.collides(p)) {
            Some(rotated) => {
                self.active = rotated;
                true
            }
            None => false,
        }
    }

    /// Move down one row, or lock if the row below is blocked.
    ///
    /// Returns true if the piece moved. Always restarts the fall timer.
    /// Does nothing unless the game is running.
    pub fn soft_drop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let moved = self.active.offset(0, 1);
        let fell = if self.board.collides(&moved) {
            self.lock_piece();
            false
        } else {
            self.active = moved;
            true
        };
        self.drop_counter_ms = 0;
        fell
    }

    /// Drop to the landing row and lock. Returns the rows travelled, or 0
    /// when the game is not running.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.is_running() {
            return 0;
        }
        let landing = self.landing_y();
        let distance = (landing - self.active.y).max(0) as u32;
        self.active.y = landing;
        self.lock_piece();
        distance
    }

    /// Row the active piece stops on when dropped straight down.
    ///
    /// Steps downward until the piece collides and backs off one row, so a
    /// piece that already overlaps something reports the row above itself.
    pub fn landing_y(&self) -> i8 {
        let mut ghost = self.active;
        while !self.board.collides(&ghost) {
            ghost.y += 1;
        }
        ghost.y - 1
    }

    /// Swap the active piece with the hold slot.
    ///
    /// Allowed once per lock. An empty slot takes the active kind and the
    /// next piece comes in; otherwise the held kind returns as a fresh
    /// spawn-orientation piece. Either way the new active piece starts at the
    /// spawn position.
    pub fn hold(&mut self) -> bool {
        if !self.is_running() || !self.can_hold {
            return false;
        }

        let current = self.active.kind;
        self.active = match self.hold {
            Some(held) => Piece::spawn(held),
            None => {
                let incoming = self.next;
                self.next = self.bag.next_piece();
                incoming
            }
        };
        self.hold = Some(current);
        self.active.reset_position();
        self.can_hold = false;
        true
    }

    /// Merge the active piece, clear lines, and bring in the next piece.
    ///
    /// If the incoming piece already collides at its spawn position the run
    /// is over. Only reached from a running game through the drops.
    pub(crate) fn lock_piece(&mut self) {
        self.board.merge(&self.active);
        let cleared = self.board.clear_lines();

        let mut points = 0;
        if let Some(result) = apply_clear(
            cleared,
            self.level,
            self.lines,
            self.config.lines_per_level,
            self.config.base_drop_ms,
        ) {
            points = result.points;
            self.score = self.score.saturating_add(result.points);
            self.lines = result.lines;
            self.level = result.level;
            self.drop_interval_ms = result.drop_interval_ms;
        }

        self.active = self.next;
        self.next = self.bag.next_piece();
        self.can_hold = true;
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let game_over = self.board.collides(&self.active);
        if game_over {
            self.phase = GamePhase::GameOver;
        }

        self.last_event = Some(LockEvent {
            lines_cleared: cleared,
            points,
            game_over,
        });
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Accumulate `elapsed_ms` on the fall timer and soft-drop once if the
    /// interval has been reached. Returns true if gravity fired.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_running() {
            return false;
        }

        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms >= self.drop_interval_ms {
            self.soft_drop();
            return true;
        }
        false
    }

    /// Apply a game action. Returns true if it changed anything.
    ///
    /// `Start` works in every phase; all other actions are ignored unless
    /// the game is running.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if action == GameAction::Start {
            self.start();
            return true;
        }
        if !self.is_running() {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.try_move(-1),
            GameAction::MoveRight => self.try_move(1),
            GameAction::SoftDrop => {
                self.soft_drop();
                true
            }
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::RotateCw => self.try_rotate(RotateDir::Cw),
            GameAction::RotateCcw => self.try_rotate(RotateDir::Ccw),
            GameAction::Hold => self.hold(),
            GameAction::Start => true,
        }
    }

    /// One frame: apply queued actions in order, then run one fall check.
    ///
    /// Returns true if gravity fired this frame.
    pub fn advance<I>(&mut self, elapsed_ms: u32, actions: I) -> bool
    where
        I: IntoIterator<Item = GameAction>,
    {
        for action in actions {
            self.apply_action(action);
        }
        self.tick(elapsed_ms)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
