//! Row generator - produces the randomized rows that enter from the bottom
//!
//! A row always spans the full matrix width: its blocks plus exactly one
//! contiguous gap of 1-3 cells. Gap sizes are biased toward a single cell
//! (6/3/1 out of 10) so most rows are one move away from completion.

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::{Block, BlockId, Columns, MAX_MATRIX_COLUMNS};

/// Weighted gap sizes, drawn uniformly by index.
const GAP_OPTIONS: [u8; 10] = [1, 1, 1, 1, 1, 1, 2, 2, 2, 3];

/// Once this many single-cell blocks exist, later draws start at width 2.
const SINGLE_CELL_LIMIT: usize = 3;

/// Deterministic row source with its own id counter.
#[derive(Debug, Clone)]
pub struct RowGenerator {
    rng: SimpleRng,
    matrix_columns: u8,
    color_count: u8,
    next_id: u32,
}

impl RowGenerator {
    /// `matrix_columns` must lie within `MIN_MATRIX_COLUMNS..=MAX_MATRIX_COLUMNS`
    /// and `color_count` must be non-zero (see [`crate::GameConfig::validate`]).
    pub fn new(seed: u32, matrix_columns: u8, color_count: u8) -> Self {
        debug_assert!(matrix_columns as usize <= MAX_MATRIX_COLUMNS);
        debug_assert!(color_count > 0);
        Self {
            rng: SimpleRng::new(seed),
            matrix_columns,
            color_count,
            next_id: 1,
        }
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    /// Generate one row of blocks at `row_index`, ordered left to right.
    pub fn generate_row(&mut self, row_index: u16) -> Vec<Block> {
        let gaps_count = self.draw_gap_count();
        let mut remaining = self.matrix_columns - gaps_count;

        let mut drawn: ArrayVec<(Columns, u8), MAX_MATRIX_COLUMNS> = ArrayVec::new();
        while remaining > 0 {
            let color_index = self.rng.range_inclusive(0, self.color_count as u32 - 1) as u8;

            let max_width = remaining.min(4);
            let singles = drawn.iter().filter(|(w, _)| *w == Columns::One).count();
            let min_width = if singles >= SINGLE_CELL_LIMIT { 2 } else { 1 };
            // With one cell left the bound collapses to 1 so the row never overflows.
            let min_width = min_width.min(max_width);

            let width = self.rng.range_inclusive(min_width as u32, max_width as u32) as u8;
            let Some(columns) = Columns::from_u8(width) else {
                break;
            };
            remaining -= width;
            drawn.push((columns, color_index));
        }

        let gap_slot = self.rng.range_inclusive(0, drawn.len().saturating_sub(1) as u32) as usize;

        let mut column_index = 0u8;
        let mut row = Vec::with_capacity(drawn.len());
        for (slot, (columns, color_index)) in drawn.into_iter().enumerate() {
            if slot == gap_slot {
                column_index += gaps_count;
            }
            row.push(Block::new(
                self.allocate_id(),
                column_index,
                row_index,
                columns,
                color_index,
            ));
            column_index += columns.get();
        }
        row
    }

    fn draw_gap_count(&mut self) -> u8 {
        let idx = self.rng.range_inclusive(0, GAP_OPTIONS.len() as u32 - 1) as usize;
        GAP_OPTIONS[idx]
    }

    fn allocate_id(&mut self) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

/// Cells of `[0, matrix_columns)` not covered by `row`, as `(start, len)` runs.
pub fn gap_runs(row: &[Block], matrix_columns: u8) -> Vec<(u8, u8)> {
    let mut covered = [false; MAX_MATRIX_COLUMNS];
    for block in row {
        for c in block.column_index..block.end_column().min(matrix_columns) {
            covered[c as usize] = true;
        }
    }

    let mut runs = Vec::new();
    let mut c = 0u8;
    while c < matrix_columns {
        if covered[c as usize] {
            c += 1;
            continue;
        }
        let start = c;
        while c < matrix_columns && !covered[c as usize] {
            c += 1;
        }
        runs.push((start, c - start));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_spans_matrix_with_single_gap() {
        let mut generator = RowGenerator::new(42, 8, 5);
        for _ in 0..200 {
            let row = generator.generate_row(0);
            let covered: u8 = row.iter().map(|b| b.columns.get()).sum();
            let runs = gap_runs(&row, 8);

            assert_eq!(runs.len(), 1, "row {:?} should have one gap run", row);
            let (_, gap_len) = runs[0];
            assert!((1..=3).contains(&gap_len));
            assert_eq!(covered + gap_len, 8);
        }
    }

    #[test]
    fn test_row_blocks_are_ordered_and_disjoint() {
        let mut generator = RowGenerator::new(9, 8, 5);
        for _ in 0..200 {
            let row = generator.generate_row(3);
            for pair in row.windows(2) {
                assert!(pair[0].end_column() <= pair[1].column_index);
            }
            assert!(row.iter().all(|b| b.row_index == 3));
            assert!(row.iter().all(|b| b.fits(8)));
        }
    }

    #[test]
    fn test_ids_are_unique_across_rows() {
        let mut generator = RowGenerator::new(1, 8, 5);
        let mut ids: Vec<BlockId> = (0..50).flat_map(|_| generator.generate_row(0)).map(|b| b.id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_same_seed_same_rows() {
        let mut a = RowGenerator::new(2024, 8, 5);
        let mut b = RowGenerator::new(2024, 8, 5);
        for _ in 0..20 {
            assert_eq!(a.generate_row(0), b.generate_row(0));
        }
    }

    #[test]
    fn test_colors_stay_in_palette() {
        let mut generator = RowGenerator::new(5, 8, 2);
        for _ in 0..100 {
            assert!(generator.generate_row(0).iter().all(|b| b.color_index < 2));
        }
    }

    #[test]
    fn test_single_cell_blocks_are_capped() {
        let mut generator = RowGenerator::new(77, 16, 5);
        for _ in 0..300 {
            let row = generator.generate_row(0);
            let singles = row.iter().filter(|b| b.columns == Columns::One).count();
            // The fourth single can only appear as the forced final one-cell remainder.
            assert!(singles <= SINGLE_CELL_LIMIT + 1, "too many singles in {:?}", row);
        }
    }

    #[test]
    fn test_narrowest_grid_still_leaves_a_block() {
        let mut generator = RowGenerator::new(11, 4, 5);
        for _ in 0..100 {
            let row = generator.generate_row(0);
            assert!(!row.is_empty());
            assert_eq!(gap_runs(&row, 4).len(), 1);
        }
    }
}
