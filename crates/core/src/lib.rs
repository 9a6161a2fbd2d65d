//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules, state machine, and frame timing of the game.
//! It has no dependencies on terminals or other I/O, so the same state can be
//! driven by the interactive front end, by tests, or by benchmarks.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision detection and line clearing
//! - [`pieces`]: shape matrices, quarter-turn rotation, horizontal kicks
//! - [`rng`]: seeded seven-piece bag
//! - [`scoring`]: line clear points, levels, and fall interval
//! - [`game_state`]: the Idle / Running / GameOver state machine
//! - [`snapshot`]: read-only copy of the state for presenters
//! - [`game_loop`]: action queue plus the [`Renderer`] seam
//!
//! # Game Rules
//!
//! - Pieces spawn centered with their matrix origin one row above the board.
//! - Rotation tries the turned matrix in place, then at x+1, x-1, x+2, ...
//!   and gives up once the offset passes the matrix width.
//! - Hold swaps the active piece with the hold slot once per lock.
//! - Locking clears full rows, scores `[0, 100, 300, 500, 800][lines] * level`,
//!   and raises the level every ten lines.
//! - The run ends when a freshly promoted piece overlaps the stack.
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{GameAction, GameConfig, GamePhase};
//!
//! let mut game = GameState::new(GameConfig::with_seed(12345));
//! assert_eq!(game.phase(), GamePhase::Idle);
//!
//! game.apply_action(GameAction::Start);
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.pieces_locked(), 1);
//! assert!(game.is_running());
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) (or
//! [`GameLoop::frame`](game_loop::GameLoop::frame)) every frame with the
//! elapsed milliseconds. The piece falls one row each time the accumulated
//! time reaches the level's interval: 1000ms at level 1, 80ms faster per
//! level, never below 100ms.

pub mod board;
pub mod game_loop;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_loop::{FrameReport, GameLoop, Renderer};
pub use game_state::GameState;
pub use pieces::{try_rotate, Piece, Shape};
pub use rng::{PieceBag, SimpleRng};
pub use scoring::{apply_clear, drop_interval_ms, level_for_lines, line_clear_score, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
