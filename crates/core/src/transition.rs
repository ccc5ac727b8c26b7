//! Visual transitions - the seam between the simulation and the renderer
//!
//! The engines only ever produce new block collections. This module diffs an
//! old collection against a new one (by block id) and turns the difference into
//! a [`TransitionBatch`] for a [`TransitionDriver`] to play. The game waits for
//! the driver to report the batch finished before it lets the next phase run.

use std::collections::HashMap;

use crate::types::{Block, BlockId};

/// Identifier of one started batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Every block moves up one row to make room for a new row
    Shift,
    /// Blocks drop onto their supports
    Fall,
    /// Completed rows scale to nothing
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Move { id: BlockId, from_row: u16, to_row: u16 },
    Vanish { id: BlockId, row: u16 },
}

impl Motion {
    pub fn id(&self) -> BlockId {
        match *self {
            Motion::Move { id, .. } | Motion::Vanish { id, .. } => id,
        }
    }
}

/// A set of motions that play together and finish together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionBatch {
    pub id: TransitionId,
    pub kind: TransitionKind,
    pub motions: Vec<Motion>,
    pub duration_ms: u32,
}

/// Row changes for every block present in both collections
pub fn diff_rows(old: &[Block], new: &[Block]) -> Vec<Motion> {
    let before: HashMap<BlockId, u16> = old.iter().map(|b| (b.id, b.row_index)).collect();
    new.iter()
        .filter_map(|after| {
            let from_row = *before.get(&after.id)?;
            (from_row != after.row_index).then_some(Motion::Move {
                id: after.id,
                from_row,
                to_row: after.row_index,
            })
        })
        .collect()
}

/// Blocks present in `old` but missing from `new`
pub fn removed_blocks(old: &[Block], new: &[Block]) -> Vec<Motion> {
    let kept: HashMap<BlockId, ()> = new.iter().map(|b| (b.id, ())).collect();
    old.iter()
        .filter(|b| !kept.contains_key(&b.id))
        .map(|b| Motion::Vanish {
            id: b.id,
            row: b.row_index,
        })
        .collect()
}

/// The rendering collaborator.
///
/// `start` begins playing a batch; `advance` moves the clock forward and
/// reports every batch that has completed since the last call.
pub trait TransitionDriver {
    fn start(&mut self, batch: &TransitionBatch);

    fn advance(&mut self, elapsed_ms: u32) -> Vec<TransitionId>;

    /// Abandon all running batches without reporting them
    fn cancel_all(&mut self) {}
}

/// Finishes every batch on the next `advance`, whatever the elapsed time.
#[derive(Debug, Clone, Default)]
pub struct InstantDriver {
    pending: Vec<TransitionId>,
}

impl TransitionDriver for InstantDriver {
    fn start(&mut self, batch: &TransitionBatch) {
        self.pending.push(batch.id);
    }

    fn advance(&mut self, _elapsed_ms: u32) -> Vec<TransitionId> {
        std::mem::take(&mut self.pending)
    }

    fn cancel_all(&mut self) {
        self.pending.clear();
    }
}

/// Finishes each batch once its duration has elapsed.
///
/// Keeps the running batches around so a renderer can interpolate.
#[derive(Debug, Clone, Default)]
pub struct TimedDriver {
    running: Vec<(TransitionBatch, u32)>,
}

impl TimedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Running batches with their progress in `0.0..=1.0`
    pub fn running(&self) -> impl Iterator<Item = (&TransitionBatch, f32)> {
        self.running.iter().map(|(batch, elapsed)| {
            let progress = if batch.duration_ms == 0 {
                1.0
            } else {
                (*elapsed as f32 / batch.duration_ms as f32).min(1.0)
            };
            (batch, progress)
        })
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }
}

impl TransitionDriver for TimedDriver {
    fn start(&mut self, batch: &TransitionBatch) {
        self.running.push((batch.clone(), 0));
    }

    fn advance(&mut self, elapsed_ms: u32) -> Vec<TransitionId> {
        let mut finished = Vec::new();
        self.running.retain_mut(|(batch, elapsed)| {
            *elapsed = elapsed.saturating_add(elapsed_ms);
            if *elapsed >= batch.duration_ms {
                finished.push(batch.id);
                false
            } else {
                true
            }
        });
        finished
    }

    fn cancel_all(&mut self) {
        self.running.clear();
    }
}
