//! Row bookkeeping - completed-row clearing and row counts
//!
//! A row is completed when the widths of its blocks add up to the matrix
//! width. The staging row is never considered: it always carries a gap.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{Block, STAGING_ROW};

/// Result of a row-clear pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowClear {
    /// Blocks that survived, in input order
    pub blocks: Vec<Block>,
    /// Removed rows, ascending
    pub cleared_rows: Vec<u16>,
}

impl RowClear {
    pub fn cleared_any(&self) -> bool {
        !self.cleared_rows.is_empty()
    }
}

/// Playfield rows whose blocks cover exactly `matrix_columns` cells, ascending
pub fn completed_rows(blocks: &[Block], matrix_columns: u8) -> Vec<u16> {
    let mut widths: BTreeMap<u16, u32> = BTreeMap::new();
    for block in blocks.iter().filter(|b| b.row_index != STAGING_ROW) {
        *widths.entry(block.row_index).or_default() += block.columns.get() as u32;
    }
    widths
        .into_iter()
        .filter(|&(_, width)| width == matrix_columns as u32)
        .map(|(row, _)| row)
        .collect()
}

/// Remove every block that sits on a completed row.
pub fn remove_completed_rows(blocks: &[Block], matrix_columns: u8) -> RowClear {
    let cleared_rows = completed_rows(blocks, matrix_columns);
    let blocks = blocks
        .iter()
        .filter(|b| cleared_rows.binary_search(&b.row_index).is_err())
        .copied()
        .collect();
    RowClear {
        blocks,
        cleared_rows,
    }
}

/// Distinct rows occupied by any block, staging row included
pub fn count_rows(blocks: &[Block]) -> usize {
    blocks.iter().map(|b| b.row_index).collect::<BTreeSet<_>>().len()
}

/// Distinct playfield rows (staging row excluded)
pub fn count_visible_rows(blocks: &[Block]) -> usize {
    blocks
        .iter()
        .filter(|b| b.row_index != STAGING_ROW)
        .map(|b| b.row_index)
        .collect::<BTreeSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BlockId, Columns};

    fn block(id: u32, column: u8, row: u16, columns: Columns) -> Block {
        Block::new(BlockId(id), column, row, columns, 0)
    }

    #[test]
    fn test_full_row_is_removed() {
        let blocks = vec![
            block(1, 0, 1, Columns::Four),
            block(2, 4, 1, Columns::Four),
            block(3, 0, 2, Columns::Two),
        ];
        let clear = remove_completed_rows(&blocks, 8);
        assert_eq!(clear.cleared_rows, vec![1]);
        assert_eq!(clear.blocks, vec![block(3, 0, 2, Columns::Two)]);
        assert!(clear.cleared_any());
    }

    #[test]
    fn test_partial_rows_are_kept() {
        let blocks = vec![block(1, 0, 1, Columns::Four), block(2, 5, 1, Columns::Three)];
        let clear = remove_completed_rows(&blocks, 8);
        assert!(clear.cleared_rows.is_empty());
        assert_eq!(clear.blocks, blocks);
    }

    #[test]
    fn test_staging_row_never_clears() {
        let blocks = vec![block(1, 0, 0, Columns::Four), block(2, 4, 0, Columns::Four)];
        assert!(completed_rows(&blocks, 8).is_empty());
    }

    #[test]
    fn test_several_rows_clear_at_once() {
        let blocks = vec![
            block(1, 0, 1, Columns::Four),
            block(2, 4, 1, Columns::Four),
            block(3, 0, 2, Columns::Three),
            block(4, 3, 2, Columns::One),
            block(5, 4, 2, Columns::Four),
            block(6, 0, 3, Columns::One),
        ];
        let clear = remove_completed_rows(&blocks, 8);
        assert_eq!(clear.cleared_rows, vec![1, 2]);
        assert_eq!(clear.blocks.len(), 1);
    }

    #[test]
    fn test_row_counts() {
        let blocks = vec![
            block(1, 0, 0, Columns::One),
            block(2, 0, 1, Columns::One),
            block(3, 2, 1, Columns::One),
            block(4, 0, 4, Columns::One),
        ];
        assert_eq!(count_rows(&blocks), 3);
        assert_eq!(count_visible_rows(&blocks), 2);
        assert_eq!(count_rows(&[]), 0);
    }
}
