//! Gravity and row clearing over plain block data

use slide_blocks::core::{apply_gravity, completed_rows, is_settled, remove_completed_rows};
use slide_blocks::types::{Block, BlockId, Columns};

fn block(id: u32, column: u8, row: u16, columns: Columns) -> Block {
    Block::new(BlockId(id), column, row, columns, 0)
}

fn row_of(blocks: &[Block], id: u32) -> Option<u16> {
    blocks.iter().find(|b| b.id == BlockId(id)).map(|b| b.row_index)
}

#[test]
fn test_unsupported_block_falls_to_floor() {
    let blocks = vec![block(1, 3, 5, Columns::Two), block(2, 0, 0, Columns::Four)];
    let settled = apply_gravity(&blocks);
    assert_eq!(row_of(&settled, 1), Some(1));
    // Staging blocks neither move nor support anything.
    assert_eq!(row_of(&settled, 2), Some(0));
}

#[test]
fn test_block_rests_on_highest_overlap() {
    let blocks = vec![
        block(1, 0, 1, Columns::Two),
        block(2, 4, 1, Columns::Four),
        block(3, 6, 2, Columns::One),
        block(4, 1, 6, Columns::Four),
    ];
    let settled = apply_gravity(&blocks);
    // Columns 1..5 overlap block 1 (row 1) and block 2 (row 1).
    assert_eq!(row_of(&settled, 4), Some(2));
    assert_eq!(row_of(&settled, 3), Some(2));
}

#[test]
fn test_stack_collapses_in_order() {
    let blocks = vec![
        block(1, 2, 3, Columns::Two),
        block(2, 2, 7, Columns::One),
        block(3, 3, 9, Columns::Three),
    ];
    let settled = apply_gravity(&blocks);
    assert_eq!(row_of(&settled, 1), Some(1));
    assert_eq!(row_of(&settled, 2), Some(2));
    assert_eq!(row_of(&settled, 3), Some(2));
}

#[test]
fn test_gravity_is_idempotent() {
    let blocks = vec![
        block(1, 0, 4, Columns::Three),
        block(2, 2, 2, Columns::Two),
        block(3, 5, 8, Columns::Three),
        block(4, 4, 5, Columns::Four),
    ];
    let by_id = |mut v: Vec<Block>| {
        v.sort_by_key(|b| b.id);
        v
    };
    let once = apply_gravity(&blocks);
    assert!(is_settled(&once));
    assert_eq!(by_id(apply_gravity(&once)), by_id(once));
    assert!(!is_settled(&blocks));
}

#[test]
fn test_full_row_of_two_wide_fours_is_removed() {
    let blocks = vec![
        block(1, 0, 1, Columns::Four),
        block(2, 4, 1, Columns::Four),
        block(3, 0, 2, Columns::Two),
    ];
    assert_eq!(completed_rows(&blocks, 8), vec![1]);

    let clear = remove_completed_rows(&blocks, 8);
    assert_eq!(clear.cleared_rows, vec![1]);
    assert_eq!(clear.blocks, vec![block(3, 0, 2, Columns::Two)]);
}

#[test]
fn test_staging_and_partial_rows_survive() {
    let blocks = vec![
        block(1, 0, 0, Columns::Four),
        block(2, 4, 0, Columns::Four),
        block(3, 0, 1, Columns::Four),
        block(4, 5, 1, Columns::Three),
    ];
    let clear = remove_completed_rows(&blocks, 8);
    assert!(!clear.cleared_any());
    assert_eq!(clear.blocks, blocks);
}

#[test]
fn test_clear_then_gravity_drops_rows_above() {
    let blocks = vec![
        block(1, 0, 1, Columns::Four),
        block(2, 4, 1, Columns::Four),
        block(3, 0, 2, Columns::Four),
        block(4, 4, 2, Columns::Four),
        block(5, 2, 3, Columns::Two),
    ];
    let clear = remove_completed_rows(&blocks, 8);
    assert_eq!(clear.cleared_rows, vec![1, 2]);
    let settled = apply_gravity(&clear.blocks);
    assert_eq!(settled, vec![block(5, 2, 1, Columns::Two)]);
}
