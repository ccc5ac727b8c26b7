//! Horizontal move limits for a block inside its row.

use std::ops::RangeInclusive;

use crate::error::MoveError;
use crate::types::{Block, BlockId};

/// Columns the block's left edge may take without leaving the matrix or
/// crossing a neighbor on the same row.
///
/// Returns `None` when no block has the given id.
pub fn move_range(blocks: &[Block], id: BlockId, matrix_columns: u8) -> Option<RangeInclusive<u8>> {
    let block = blocks.iter().find(|b| b.id == id)?;
    let neighbors = || {
        blocks
            .iter()
            .filter(move |other| other.id != block.id && other.row_index == block.row_index)
    };

    let left = neighbors()
        .filter(|other| other.column_index < block.column_index)
        .map(Block::end_column)
        .max()
        .unwrap_or(0);
    let right = neighbors()
        .filter(|other| other.column_index > block.column_index)
        .map(|other| other.column_index)
        .min()
        .unwrap_or(matrix_columns);

    let last = right.saturating_sub(block.columns.get()).max(left);
    Some(left..=last)
}

/// Check a requested move, returning the block it applies to.
pub fn validate_move(
    blocks: &[Block],
    id: BlockId,
    column_index: u8,
    matrix_columns: u8,
) -> Result<Block, MoveError> {
    let block = *blocks
        .iter()
        .find(|b| b.id == id)
        .ok_or(MoveError::UnknownBlock(id))?;
    if block.is_staged() {
        return Err(MoveError::StagingRow(id));
    }
    if column_index as u16 + block.columns.get() as u16 > matrix_columns as u16 {
        return Err(MoveError::OutOfBounds {
            id,
            column: column_index,
        });
    }
    let range = move_range(blocks, id, matrix_columns).ok_or(MoveError::UnknownBlock(id))?;
    if !range.contains(&column_index) {
        return Err(MoveError::Overlaps {
            id,
            column: column_index,
        });
    }
    Ok(block)
}
