//! Terminal input mapping.
//!
//! Translates `crossterm` key events into [`crate::types::GameAction`]s and
//! recognizes the quit chord. There is no key-state tracking: every press or
//! terminal auto-repeat becomes exactly one action, the same as a browser
//! keydown.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
