//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the pure [`GameView`] draws a
//! [`crate::core::GameSnapshot`] into a [`FrameBuffer`], and the
//! [`TerminalRenderer`] flushes frames to the terminal as diffs.
//!
//! Goals:
//! - Keep `core` deterministic and free of terminal I/O
//! - Allow precise control over aspect ratio (2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use slide_blocks_core as core;
pub use slide_blocks_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Overlay, TransitionFrame, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
