//! Error types for configuration and player moves.
//!
//! Configuration errors are programming or setup defects and are reported once,
//! at construction. Move errors are rejections of a single request; the game
//! state is left untouched when one is returned.

use thiserror::Error;

use crate::types::BlockId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("matrix must have between {min} and {max} columns, got {got}")]
    Columns { got: u8, min: u8, max: usize },
    #[error("matrix must have at least one row")]
    Rows,
    #[error("block palette is empty")]
    EmptyPalette,
    #[error("block palette has {0} colors, at most 255 are supported")]
    PaletteTooLarge(usize),
    #[error("invalid hex color {0:?}, expected #RRGGBB")]
    InvalidColor(String),
    #[error("factor must be within 0..=1, got {0}")]
    InvalidFactor(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no block with id {0}")]
    UnknownBlock(BlockId),
    #[error("block {0} is still in the staging row")]
    StagingRow(BlockId),
    #[error("column {column} puts block {id} outside the matrix")]
    OutOfBounds { id: BlockId, column: u8 },
    #[error("column {column} overlaps a neighbor of block {id}")]
    Overlaps { id: BlockId, column: u8 },
    #[error("a simulation phase is still running")]
    Busy,
    #[error("the game is over")]
    GameOver,
}
