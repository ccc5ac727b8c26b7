//! Row generator behavior through the public API

use slide_blocks::core::{gap_runs, RowGenerator};
use slide_blocks::types::{Columns, STAGING_ROW};

fn width(row: &[slide_blocks::types::Block]) -> u32 {
    row.iter().map(|b| b.columns.get() as u32).sum()
}

#[test]
fn test_row_leaves_exactly_one_gap() {
    let mut gen = RowGenerator::new(2024, 8, 5);
    for _ in 0..200 {
        let row = gen.generate_row(STAGING_ROW);
        let gaps = gap_runs(&row, 8);
        assert_eq!(gaps.len(), 1, "row {row:?}");
        let (_, len) = gaps[0];
        assert!((1..=3).contains(&len));
        assert_eq!(width(&row) + len as u32, 8);
    }
}

#[test]
fn test_blocks_are_ordered_and_in_bounds() {
    let mut gen = RowGenerator::new(7, 10, 5);
    for _ in 0..100 {
        let row = gen.generate_row(STAGING_ROW);
        assert!(row.iter().all(|b| b.fits(10) && b.row_index == STAGING_ROW));
        assert!(row.windows(2).all(|w| w[0].end_column() <= w[1].column_index));
        assert!(row.iter().all(|b| b.color_index < 5));
    }
}

#[test]
fn test_single_cell_blocks_are_limited() {
    let mut gen = RowGenerator::new(99, 16, 5);
    for _ in 0..200 {
        let row = gen.generate_row(STAGING_ROW);
        let singles = row.iter().filter(|b| b.columns == Columns::One).count();
        // Three singles at most, plus one forced by the last free cell.
        assert!(singles <= 4, "row {row:?}");
    }
}

#[test]
fn test_same_seed_same_rows() {
    let mut a = RowGenerator::new(42, 8, 5);
    let mut b = RowGenerator::new(42, 8, 5);
    for _ in 0..20 {
        assert_eq!(a.generate_row(STAGING_ROW), b.generate_row(STAGING_ROW));
    }

    let mut c = RowGenerator::new(43, 8, 5);
    let rows_a: Vec<_> = (0..20).map(|_| a.generate_row(STAGING_ROW)).collect();
    let rows_c: Vec<_> = (0..20).map(|_| c.generate_row(STAGING_ROW)).collect();
    assert_ne!(rows_a, rows_c);
}

#[test]
fn test_ids_are_never_reused() {
    let mut gen = RowGenerator::new(5, 8, 5);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..50 {
        for block in gen.generate_row(STAGING_ROW) {
            assert!(seen.insert(block.id));
        }
    }
}
