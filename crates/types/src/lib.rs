//! Shared types and constants for blockfall.
//!
//! Everything here is plain data with no dependencies, so the same definitions
//! can be used by the simulation core, the terminal renderer, and the input
//! mapping without pulling in any of them.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! Pieces spawn with their matrix origin at `y = -1`, so the top row of a
//! spawn matrix may sit above the visible board.
//!
//! # Timing and Leveling
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Fall interval at level 1 |
//! | `DROP_STEP_MS` | 80 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Fastest fall interval |
//! | `LINES_PER_LEVEL` | 10 | Cleared lines per level step |
//! | `TICK_MS` | 16 | Frame period of the terminal front end |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, GameConfig, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! let config = GameConfig::default();
//! assert_eq!(config.lines_per_level, 10);
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Row at which every new piece's matrix origin is placed.
pub const SPAWN_Y: i8 = -1;

/// Frame period used by the terminal loop (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Fall interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Fall interval reduction per level gained
pub const DROP_STEP_MS: u32 = 80;

/// Absolute minimum fall interval (100ms)
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Cleared lines needed to gain one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table.
///
/// Base points for clearing N lines at once, multiplied by the current level
/// (levels start at 1):
/// - 1 line: 100
/// - 2 lines: 300
/// - 3 lines: 500
/// - 4 lines: 800
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in the order a fresh bag is filled before shuffling.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase letter used in panels and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDir {
    Cw,
    Ccw,
}

impl RotateDir {
    pub fn reverse(self) -> Self {
        match self {
            RotateDir::Cw => RotateDir::Ccw,
            RotateDir::Ccw => RotateDir::Cw,
        }
    }
}

/// Lifecycle phase of a run.
///
/// - **Idle**: a fresh state waiting for the first `Start`
/// - **Running**: accepting input and falling on the timer
/// - **GameOver**: terminal until the next `Start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Idle,
    Running,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Running => "running",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// Actions the state machine accepts.
///
/// Everything except `Start` is ignored unless the game is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell, locking it if it cannot move
    SoftDrop,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Swap the active piece with the hold slot (once per lock)
    Hold,
    /// Reset everything and begin a new run
    Start,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCCW"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("pause"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "start" => Some(GameAction::Start),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Start => "start",
        }
    }
}

/// Outcome of a single lock, kept for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// Points awarded for the clear (0 when nothing cleared).
    pub points: u32,
    /// The piece promoted after this lock could not be placed.
    pub game_over: bool,
}

/// Startup configuration for a game.
///
/// Board dimensions are fixed at compile time ([`BOARD_WIDTH`],
/// [`BOARD_HEIGHT`]); these values can be chosen per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Lines cleared per level step. Must be non-zero.
    pub lines_per_level: u32,
    /// Fall interval at level 1 in milliseconds.
    pub base_drop_ms: u32,
    /// Seed for the bag shuffler.
    pub seed: u32,
}

impl GameConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lines_per_level: LINES_PER_LEVEL,
            base_drop_ms: BASE_DROP_MS,
            seed: 1,
        }
    }
}
