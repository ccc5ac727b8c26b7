//! Game controller - owns the block collection and sequences the phases
//!
//! Every mutation of the grid goes through one of three phases (add a row,
//! apply gravity, remove completed rows) queued on the session's
//! [`TaskQueue`]. The host drives the game by calling [`Game::tick`] from its
//! event loop; each tick first lets the [`TransitionDriver`] report finished
//! transitions (which resume the waiting phase chain) and then executes at most
//! one scheduled queue step. Player input enters through [`Game::move_block`]
//! and [`Game::restart`].
//!
//! # Example
//!
//! ```
//! use slide_blocks_core::{Game, GameConfig};
//!
//! let mut game = Game::new(GameConfig::default(), 7).unwrap();
//! game.restart();
//! game.run_until_idle(1_000);
//!
//! assert!(!game.has_queued_task());
//! assert!(!game.upcoming().is_empty());
//! ```

use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::error::{ConfigError, MoveError};
use crate::generator::RowGenerator;
use crate::gravity;
use crate::moves::validate_move;
use crate::queue::{HookId, Step, Task, TaskQueue};
use crate::rows;
use crate::shadow::{ShadowState, ShadowUpdate};
use crate::snapshot::GameSnapshot;
use crate::transition::{
    diff_rows, removed_blocks, InstantDriver, Motion, TransitionBatch, TransitionDriver,
    TransitionId, TransitionKind,
};
use crate::types::{Block, BlockId, TaskKind, STAGING_ROW};

/// A queued phase together with the block snapshot it operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    ApplyGravity(Vec<Block>),
    RemoveCompletedRows(Vec<Block>),
    AddNewRow,
}

impl Phase {
    pub fn kind(&self) -> TaskKind {
        match self {
            Phase::ApplyGravity(_) => TaskKind::ApplyGravity,
            Phase::RemoveCompletedRows(_) => TaskKind::RemoveCompletedRows,
            Phase::AddNewRow => TaskKind::AddNewRow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The block already sits at the requested column; nothing was queued
    Unchanged,
    /// The block moved and a gravity pass is queued
    Queued,
}

/// What to do once the awaited transition finishes
#[derive(Debug, Clone, PartialEq, Eq)]
enum Resume {
    RunNext,
    /// Publish the post-clear collection, then continue
    CommitClear(Vec<Block>),
}

pub struct Game<D = InstantDriver> {
    config: GameConfig,
    generator: RowGenerator,
    queue: TaskQueue<Phase>,
    driver: D,
    blocks: Vec<Block>,
    game_over: bool,
    has_queued_task: bool,
    shadow: ShadowState,
    /// Session counter; bumped by `restart`
    epoch: u32,
    awaiting: Option<(TransitionId, Resume)>,
    next_transition_id: u32,
    rows_cleared: u32,
    moves: u32,
}

impl Game<InstantDriver> {
    /// Headless game whose transitions finish on the next tick.
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        Self::with_driver(config, seed, InstantDriver::default())
    }
}

impl<D: TransitionDriver> Game<D> {
    /// Create an idle game with an empty grid; call [`Game::restart`] to start it.
    pub fn with_driver(config: GameConfig, seed: u32, driver: D) -> Result<Self, ConfigError> {
        config.validate()?;
        let generator = RowGenerator::new(seed, config.matrix_columns, config.color_count());
        Ok(Self {
            config,
            generator,
            queue: TaskQueue::new(),
            driver,
            blocks: Vec::new(),
            game_over: false,
            has_queued_task: false,
            shadow: ShadowState::default(),
            epoch: 0,
            awaiting: None,
            next_transition_id: 0,
            rows_cleared: 0,
            moves: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Blocks waiting in the staging row
    pub fn upcoming(&self) -> Vec<Block> {
        let mut upcoming: Vec<Block> = self.blocks.iter().copied().filter(Block::is_staged).collect();
        upcoming.sort_by_key(|b| b.column_index);
        upcoming
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// True from the moment work is queued until the queue drains
    pub fn has_queued_task(&self) -> bool {
        self.has_queued_task
    }

    /// True while any phase is queued, scheduled or waiting on a transition
    pub fn is_busy(&self) -> bool {
        self.has_queued_task || self.awaiting.is_some() || self.queue.has_scheduled_step()
    }

    pub fn shadow(&self) -> ShadowState {
        self.shadow
    }

    pub fn set_shadow_state(&mut self, update: ShadowUpdate) {
        self.shadow.merge(update);
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn seed(&self) -> u32 {
        self.generator.seed()
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Kinds of the queued phases, in execution order
    pub fn pending_phases(&self) -> Vec<TaskKind> {
        self.queue.pending_kinds().collect()
    }

    pub fn count_pending(&self, kind: TaskKind) -> usize {
        self.queue.count_tasks_of_type(kind)
    }

    pub fn register_on_filled(&mut self, hook: impl FnMut() + 'static) -> HookId {
        self.queue.register_on_filled(hook)
    }

    pub fn register_on_drained(&mut self, hook: impl FnMut() + 'static) -> HookId {
        self.queue.register_on_drained(hook)
    }

    pub fn unregister_on_filled(&mut self, id: HookId) -> bool {
        self.queue.unregister_on_filled(id)
    }

    pub fn unregister_on_drained(&mut self, id: HookId) -> bool {
        self.queue.unregister_on_drained(id)
    }

    /// Replace the whole block collection.
    ///
    /// Meant for setting up positions (tests, replays) on an idle game; it
    /// does not queue any phase.
    #[doc(hidden)]
    pub fn set_blocks(&mut self, blocks: Vec<Block>) {
        debug_assert!(!self.is_busy(), "set_blocks while a phase chain is running");
        self.replace_blocks(blocks);
    }

    /// Start a new session.
    ///
    /// Pending phases of the previous session are dropped and any transition
    /// still playing is abandoned, so nothing from before the restart can touch
    /// the new grid.
    pub fn restart(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        let dropped = self.queue.flush();
        self.driver.cancel_all();
        self.awaiting = None;

        self.blocks.clear();
        self.game_over = false;
        self.shadow = ShadowState::default();
        self.rows_cleared = 0;
        self.moves = 0;
        info!(epoch = self.epoch, dropped, "restart");

        self.enqueue_low_priority(Phase::AddNewRow);
        self.queue.run_next();
    }

    /// Slide a block to a new column and queue the phases that follow.
    pub fn move_block(&mut self, id: BlockId, column_index: u8) -> Result<MoveOutcome, MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        if self.is_busy() {
            return Err(MoveError::Busy);
        }
        let block = validate_move(&self.blocks, id, column_index, self.config.matrix_columns)?;
        if block.column_index == column_index {
            return Ok(MoveOutcome::Unchanged);
        }

        debug!(block = %id, from = block.column_index, to = column_index, "move block");
        let updated: Vec<Block> = self
            .blocks
            .iter()
            .map(|b| if b.id == id { Block { column_index, ..*b } } else { *b })
            .collect();
        self.replace_blocks(updated.clone());
        self.moves += 1;

        self.enqueue(Phase::ApplyGravity(updated));
        self.enqueue_low_priority(Phase::AddNewRow);
        self.queue.run_next();
        Ok(MoveOutcome::Queued)
    }

    /// Queue an extra row spawn behind any running chain.
    ///
    /// A running chain reaches the spawn on its own; only an idle game
    /// schedules a step here.
    pub fn add_new_row(&mut self) -> Result<(), MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        let idle = !self.is_busy();
        self.enqueue(Phase::AddNewRow);
        if idle {
            self.queue.run_next();
        }
        Ok(())
    }

    /// Advance the game clock.
    ///
    /// Returns true when a transition finished or a queue step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let mut progressed = false;
        for id in self.driver.advance(elapsed_ms) {
            progressed |= self.finish_transition(id);
        }

        match self.queue.step() {
            Step::Run(task) => {
                self.dispatch(task);
                true
            }
            Step::Drained => {
                self.has_queued_task = false;
                self.check_if_game_is_over();
                true
            }
            Step::Idle => progressed,
        }
    }

    /// Tick (at the configured transition duration) until the game is idle.
    ///
    /// Returns the number of ticks used; stops after `max_ticks`.
    pub fn run_until_idle(&mut self, max_ticks: usize) -> usize {
        let step_ms = self.config.transition_ms;
        let mut ticks = 0;
        while self.is_busy() && ticks < max_ticks {
            self.tick(step_ms);
            ticks += 1;
        }
        ticks
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let (mut upcoming, mut blocks): (Vec<Block>, Vec<Block>) =
            self.blocks.iter().copied().partition(Block::is_staged);
        blocks.sort_by_key(|b| (b.row_index, b.column_index));
        upcoming.sort_by_key(|b| b.column_index);

        GameSnapshot {
            matrix_columns: self.config.matrix_columns,
            matrix_rows: self.config.matrix_rows,
            blocks,
            upcoming,
            game_over: self.game_over,
            has_queued_task: self.has_queued_task,
            shadow: self.shadow,
            epoch: self.epoch,
            seed: self.seed(),
            rows_cleared: self.rows_cleared,
            moves: self.moves,
        }
    }

    fn dispatch(&mut self, task: Task<Phase>) {
        if task.epoch != self.epoch {
            debug!(phase = %task.kind, epoch = task.epoch, "skipping stale phase");
            self.queue.run_next();
            return;
        }

        debug!(phase = %task.kind, epoch = task.epoch, "run phase");
        match task.payload {
            Phase::ApplyGravity(blocks) => self.apply_gravity(blocks),
            Phase::RemoveCompletedRows(blocks) => self.remove_completed_rows(blocks),
            Phase::AddNewRow => self.add_row_phase(),
        }
    }

    fn add_row_phase(&mut self) {
        let mut shifted: Vec<Block> = self
            .blocks
            .iter()
            .map(|b| Block {
                row_index: b.row_index + 1,
                ..*b
            })
            .collect();
        shifted.extend(self.generator.generate_row(STAGING_ROW));

        let motions = diff_rows(&self.blocks, &shifted);
        self.replace_blocks(shifted.clone());
        self.enqueue(Phase::ApplyGravity(shifted));
        self.await_transition(TransitionKind::Shift, motions, Resume::RunNext);
    }

    fn apply_gravity(&mut self, blocks: Vec<Block>) {
        let settled = gravity::apply_gravity(&blocks);
        let motions = diff_rows(&self.blocks, &settled);
        self.replace_blocks(settled.clone());

        // Always followed by a clear pass: a sideways move can complete a row
        // without anything falling.
        self.enqueue(Phase::RemoveCompletedRows(settled));
        self.await_transition(TransitionKind::Fall, motions, Resume::RunNext);
    }

    fn remove_completed_rows(&mut self, blocks: Vec<Block>) {
        let clear = rows::remove_completed_rows(&blocks, self.config.matrix_columns);
        if !clear.cleared_any() {
            self.replace_blocks(clear.blocks);
            self.queue_add_row_if_needed();
            self.queue.run_next();
            return;
        }

        debug!(rows = ?clear.cleared_rows, "clear rows");
        self.rows_cleared += clear.cleared_rows.len() as u32;
        let vanished = removed_blocks(&blocks, &clear.blocks);
        self.enqueue(Phase::ApplyGravity(clear.blocks.clone()));
        self.await_transition(
            TransitionKind::Clear,
            vanished,
            Resume::CommitClear(clear.blocks),
        );
    }

    /// Keep the playfield populated without stacking redundant spawns.
    fn queue_add_row_if_needed(&mut self) {
        let visible = rows::count_visible_rows(&self.blocks);
        let pending = self.queue.count_tasks_of_type(TaskKind::AddNewRow);
        if visible + pending < self.config.min_visible_rows as usize + 1 {
            trace!(visible, pending, "queue row spawn");
            self.enqueue_low_priority(Phase::AddNewRow);
        }
    }

    fn check_if_game_is_over(&mut self) {
        let rows = rows::count_rows(&self.blocks);
        if rows > self.config.matrix_rows as usize {
            self.game_over = true;
            info!(rows, moves = self.moves, rows_cleared = self.rows_cleared, "game over");
        }
    }

    fn await_transition(&mut self, kind: TransitionKind, motions: Vec<Motion>, resume: Resume) {
        if motions.is_empty() {
            self.resume(resume);
            return;
        }

        let id = TransitionId(self.next_transition_id);
        self.next_transition_id = self.next_transition_id.wrapping_add(1);
        let batch = TransitionBatch {
            id,
            kind,
            motions,
            duration_ms: self.config.transition_ms,
        };
        debug!(id = id.0, ?kind, motions = batch.motions.len(), "start transition");
        self.driver.start(&batch);
        self.awaiting = Some((id, resume));
    }

    fn finish_transition(&mut self, id: TransitionId) -> bool {
        match self.awaiting.take() {
            Some((awaited, resume)) if awaited == id => {
                debug!(id = id.0, "transition finished");
                self.resume(resume);
                true
            }
            other => {
                trace!(id = id.0, "ignoring unawaited transition");
                self.awaiting = other;
                false
            }
        }
    }

    fn resume(&mut self, resume: Resume) {
        if let Resume::CommitClear(blocks) = resume {
            self.replace_blocks(blocks);
            self.queue_add_row_if_needed();
        }
        self.queue.run_next();
    }

    fn enqueue(&mut self, phase: Phase) {
        let task = Task::new(phase.kind(), self.epoch, phase);
        if self.queue.enqueue(task) {
            self.has_queued_task = true;
        }
    }

    fn enqueue_low_priority(&mut self, phase: Phase) {
        let task = Task::new(phase.kind(), self.epoch, phase);
        if self.queue.enqueue_low_priority_task(task) {
            self.has_queued_task = true;
        }
    }

    fn replace_blocks(&mut self, blocks: Vec<Block>) {
        debug_assert!(
            layout_is_valid(&blocks, self.config.matrix_columns),
            "block layout violates grid invariants: {blocks:?}"
        );
        self.blocks = blocks;
    }
}

/// Every block inside the grid, unique ids, no two blocks of a row overlapping.
pub fn layout_is_valid(blocks: &[Block], matrix_columns: u8) -> bool {
    blocks.iter().enumerate().all(|(i, a)| {
        a.fits(matrix_columns)
            && blocks[i + 1..]
                .iter()
                .all(|b| a.id != b.id && (a.row_index != b.row_index || !a.overlaps(b)))
    })
}
