//! Slide Blocks (workspace facade crate).
//!
//! Re-exports the workspace crates as `slide_blocks::{core,input,term,types}`
//! and hosts the pieces of the binary that are worth testing on their own:
//! logging setup and the headless simulator.

pub mod logging;
pub mod simulate;

pub use slide_blocks_core as core;
pub use slide_blocks_input as input;
pub use slide_blocks_term as term;
pub use slide_blocks_types as types;
