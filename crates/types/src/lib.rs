//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no required dependencies, so they can be used
//! by the simulation core, the terminal renderer and the headless simulator alike.
//!
//! # Grid
//!
//! The playfield is a fixed grid of columns and rows:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_MATRIX_COLUMNS` | 8 | Cells per row |
//! | `DEFAULT_MATRIX_ROWS` | 10 | Playfield rows before the game is over |
//! | `MAX_MATRIX_COLUMNS` | 16 | Upper bound accepted by configuration |
//! | `MIN_VISIBLE_ROW_COUNT` | 3 | Playfield rows kept populated by spawning |
//! | `TRANSITION_MS` | 75 | Default duration of one visual transition |
//!
//! Row indices grow upward. Row 0 ([`STAGING_ROW`]) holds the upcoming row that
//! is not yet part of the playfield, row 1 ([`FLOOR_ROW`]) is the bottom-most
//! resting row.
//!
//! # Examples
//!
//! ```
//! use slide_blocks_types::{Block, BlockId, Columns, TaskKind};
//!
//! let a = Block::new(BlockId(1), 0, 1, Columns::Three, 0);
//! let b = Block::new(BlockId(2), 2, 2, Columns::Two, 1);
//! assert!(a.overlaps(&b));
//! assert_eq!(a.end_column(), 3);
//!
//! assert_eq!(Columns::from_u8(4), Some(Columns::Four));
//! assert_eq!(TaskKind::AddNewRow.as_str(), "addNewRow");
//! ```

use std::fmt;

/// Default number of columns in the grid
pub const DEFAULT_MATRIX_COLUMNS: u8 = 8;

/// Default number of playfield rows
pub const DEFAULT_MATRIX_ROWS: u8 = 10;

/// Widest grid the row generator supports
pub const MAX_MATRIX_COLUMNS: usize = 16;

/// Narrowest grid the row generator supports (largest gap plus one block)
pub const MIN_MATRIX_COLUMNS: u8 = 4;

/// Number of playfield rows kept populated by queued spawns
pub const MIN_VISIBLE_ROW_COUNT: u8 = 3;

/// Default duration of a row shift, fall or clear transition
pub const TRANSITION_MS: u32 = 75;

/// Number of colors in the default block palette
pub const BLOCK_COLOR_COUNT: u8 = 5;

/// Row holding the upcoming blocks
pub const STAGING_ROW: u16 = 0;

/// Bottom-most playfield row
pub const FLOOR_ROW: u16 = 1;

/// Stable identifier of a block for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BlockId(pub u32);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Width of a block in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "u8", try_from = "u8"))]
pub enum Columns {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

impl Columns {
    /// All widths, narrowest first
    pub const ALL: [Columns; 4] = [Columns::One, Columns::Two, Columns::Three, Columns::Four];

    /// Parse a width from a cell count
    ///
    /// ```
    /// use slide_blocks_types::Columns;
    ///
    /// assert_eq!(Columns::from_u8(1), Some(Columns::One));
    /// assert_eq!(Columns::from_u8(0), None);
    /// assert_eq!(Columns::from_u8(5), None);
    /// ```
    pub fn from_u8(n: u8) -> Option<Self> {
        match n {
            1 => Some(Columns::One),
            2 => Some(Columns::Two),
            3 => Some(Columns::Three),
            4 => Some(Columns::Four),
            _ => None,
        }
    }

    /// Width in cells
    #[inline]
    pub fn get(self) -> u8 {
        self as u8
    }
}

impl From<Columns> for u8 {
    fn from(value: Columns) -> Self {
        value.get()
    }
}

impl TryFrom<u8> for Columns {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Columns::from_u8(value).ok_or_else(|| format!("block width must be 1..=4, got {value}"))
    }
}

/// A horizontal run of 1-4 contiguous cells on one row.
///
/// Pixel positions are a presentation concern; the simulation only tracks grid
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub id: BlockId,
    /// Left edge column (0-based)
    pub column_index: u8,
    /// 0 = staging, 1 = floor, growing upward
    pub row_index: u16,
    pub columns: Columns,
    /// Index into the color palette (visual grouping only)
    pub color_index: u8,
}

impl Block {
    pub fn new(id: BlockId, column_index: u8, row_index: u16, columns: Columns, color_index: u8) -> Self {
        Self {
            id,
            column_index,
            row_index,
            columns,
            color_index,
        }
    }

    /// One past the right-most occupied column
    #[inline]
    pub fn end_column(&self) -> u8 {
        self.column_index + self.columns.get()
    }

    /// True when both blocks share at least one column
    ///
    /// Rows are ignored: this answers "would one rest on the other".
    #[inline]
    pub fn overlaps(&self, other: &Block) -> bool {
        self.column_index.max(other.column_index) < self.end_column().min(other.end_column())
    }

    /// True while the block sits in the staging row
    #[inline]
    pub fn is_staged(&self) -> bool {
        self.row_index == STAGING_ROW
    }

    /// True when the block fits inside a grid `matrix_columns` wide
    #[inline]
    pub fn fits(&self, matrix_columns: u8) -> bool {
        self.end_column() <= matrix_columns
    }
}

/// The three simulation phases that flow through the task queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskKind {
    ApplyGravity,
    RemoveCompletedRows,
    AddNewRow,
}

impl TaskKind {
    /// Stable camelCase name (used in logs)
    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::ApplyGravity => "applyGravity",
            TaskKind::RemoveCompletedRows => "removeCompletedRows",
            TaskKind::AddNewRow => "addNewRow",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
