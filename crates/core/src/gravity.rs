//! Gravity engine - settles blocks onto whatever supports them
//!
//! Pure over plain block data: no timers, no queue, no animation handles.
//! A block rests one row above the highest overlapping block beneath it, or on
//! the floor when nothing overlaps. The staging row never supports anything
//! and is never moved.

use crate::types::{Block, FLOOR_ROW, STAGING_ROW};

/// Recompute every block's resting row.
///
/// Blocks are processed bottom-up (stable sort on `row_index`, ties keep input
/// order), so each block sees the already-settled rows of the blocks below it.
/// The result is returned in that processing order.
pub fn apply_gravity(blocks: &[Block]) -> Vec<Block> {
    let mut ordered = blocks.to_vec();
    ordered.sort_by_key(|b| b.row_index);

    for i in 0..ordered.len() {
        let block = ordered[i];
        if block.row_index <= FLOOR_ROW {
            continue;
        }

        let support = ordered
            .iter()
            .filter(|below| {
                below.row_index != STAGING_ROW
                    && below.row_index < block.row_index
                    && block.overlaps(below)
            })
            .map(|below| below.row_index)
            .max();

        ordered[i].row_index = support.map_or(FLOOR_ROW, |row| row + 1);
    }

    ordered
}

/// True when a gravity pass would not move any block
pub fn is_settled(blocks: &[Block]) -> bool {
    let settled = apply_gravity(blocks);
    settled.iter().all(|after| {
        blocks
            .iter()
            .find(|before| before.id == after.id)
            .is_some_and(|before| before.row_index == after.row_index)
    })
}
