//! Terminal input module.
//!
//! Maps `crossterm` key events into [`UiAction`]s and turns those into drag
//! gestures over the playfield with [`DragController`]. The controller reads a
//! [`crate::core::GameSnapshot`] and never touches the game directly; the host
//! forwards the resulting [`DragEvent`]s.

pub mod drag;
pub mod map;

pub use slide_blocks_core as core;
pub use slide_blocks_types as types;

pub use drag::{DragController, DragEvent};
pub use map::{handle_key_event, should_quit, UiAction};
