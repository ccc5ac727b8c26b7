use serde::Serialize;

use crate::shadow::ShadowState;
use crate::types::{Block, BlockId};

/// Read-only view of a game, taken between ticks.
///
/// Consumed by the terminal renderer and printed as JSON lines by the
/// headless simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub matrix_columns: u8,
    pub matrix_rows: u8,
    /// Playfield blocks (row 1 and up)
    pub blocks: Vec<Block>,
    /// Staging-row blocks, left to right
    pub upcoming: Vec<Block>,
    pub game_over: bool,
    pub has_queued_task: bool,
    pub shadow: ShadowState,
    pub epoch: u32,
    pub seed: u32,
    pub rows_cleared: u32,
    pub moves: u32,
}

impl GameSnapshot {
    /// True when the player may start a drag
    pub fn playable(&self) -> bool {
        !self.game_over && !self.has_queued_task
    }

    /// Block covering `(column, row)`, staging row included
    pub fn block_at(&self, column: u8, row: u16) -> Option<&Block> {
        self.blocks
            .iter()
            .chain(self.upcoming.iter())
            .find(|b| b.row_index == row && b.column_index <= column && column < b.end_column())
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks
            .iter()
            .chain(self.upcoming.iter())
            .find(|b| b.id == id)
    }

    /// Highest occupied playfield row, 0 when the playfield is empty
    pub fn top_row(&self) -> u16 {
        self.blocks.iter().map(|b| b.row_index).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Columns;

    fn snapshot() -> GameSnapshot {
        GameSnapshot {
            matrix_columns: 8,
            matrix_rows: 10,
            blocks: vec![
                Block::new(BlockId(1), 0, 1, Columns::Three, 0),
                Block::new(BlockId(2), 4, 3, Columns::Two, 1),
            ],
            upcoming: vec![Block::new(BlockId(3), 1, 0, Columns::Four, 2)],
            game_over: false,
            has_queued_task: false,
            shadow: ShadowState::default(),
            epoch: 2,
            seed: 9,
            rows_cleared: 1,
            moves: 4,
        }
    }

    #[test]
    fn test_lookup_covers_every_cell_of_a_block() {
        let snap = snapshot();
        assert_eq!(snap.block_at(2, 1).map(|b| b.id), Some(BlockId(1)));
        assert_eq!(snap.block_at(3, 1), None);
        assert_eq!(snap.block_at(4, 0).map(|b| b.id), Some(BlockId(3)));
        assert_eq!(snap.block(BlockId(2)).map(|b| b.row_index), Some(3));
        assert_eq!(snap.top_row(), 3);
    }

    #[test]
    fn test_playable_only_when_idle() {
        let mut snap = snapshot();
        assert!(snap.playable());
        snap.has_queued_task = true;
        assert!(!snap.playable());
        snap.has_queued_task = false;
        snap.game_over = true;
        assert!(!snap.playable());
    }

    #[test]
    fn test_serializes_to_flat_json() {
        let v = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(v["matrix_columns"], 8);
        assert_eq!(v["blocks"][0]["id"], 1);
        assert_eq!(v["blocks"][1]["row_index"], 3);
        assert_eq!(v["upcoming"][0]["column_index"], 1);
        assert_eq!(v["shadow"]["visible"], false);
        assert_eq!(v["moves"], 4);
    }
}
