//! Terminal presentation for blockfall.
//!
//! Rendering goes snapshot -> [`GameView`] -> [`FrameBuffer`] ->
//! [`TerminalRenderer`]. The view is pure and unit-testable; only the
//! renderer touches the terminal. [`TerminalPresenter`] bundles the two
//! behind the core's [`Renderer`](crate::core::Renderer) trait.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{overlay_text, piece_color, AnchorY, GameView, Viewport};
pub use renderer::{encode_into, TerminalPresenter, TerminalRenderer};
