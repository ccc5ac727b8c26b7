//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the whole simulation: the grid rules, the phase queue
//! and the controller that sequences them. It has **no dependencies** on
//! terminal I/O, making it:
//!
//! - **Deterministic**: the same seed produces the same rows and the same game
//! - **Testable**: every engine is a pure function over plain block data
//! - **Portable**: runs behind the terminal front end or fully headless
//!
//! # Module Structure
//!
//! - [`generator`]: randomized rows with exactly one gap
//! - [`gravity`]: settles blocks onto overlapping supports
//! - [`rows`]: completed-row detection and removal, row counts
//! - [`moves`]: horizontal drag limits and move validation
//! - [`queue`]: the two-lane task queue with filled/drained hooks
//! - [`transition`]: transition batches and the driver seam to the renderer
//! - [`game`]: the controller owning the block collection
//! - [`config`]: grid size, timing and palette
//!
//! # Phase chain
//!
//! ```text
//! move_block ─► ApplyGravity ─► RemoveCompletedRows ─┬─► (rows cleared) ApplyGravity ─► ...
//!     │                                              └─► (nothing cleared) maybe AddNewRow
//!     └─► AddNewRow (low priority) ─► ApplyGravity ─► ...
//! ```
//!
//! Game over is checked once the queue drains, never mid-chain.
//!
//! # Example
//!
//! ```
//! use slide_blocks_core::{Game, GameConfig, MoveOutcome};
//!
//! let mut game = Game::new(GameConfig::default(), 12345).unwrap();
//! game.restart();
//! game.run_until_idle(1_000);
//!
//! let block = game.blocks().iter().find(|b| b.row_index == 1).copied().unwrap();
//! let outcome = game.move_block(block.id, block.column_index).unwrap();
//! assert_eq!(outcome, MoveOutcome::Unchanged);
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod generator;
pub mod gravity;
pub mod moves;
pub mod queue;
pub mod rng;
pub mod rows;
pub mod shadow;
pub mod snapshot;
pub mod transition;

pub use slide_blocks_types as types;

// Re-export commonly used types for convenience
pub use config::{default_palette, Color, GameConfig};
pub use error::{ConfigError, MoveError};
pub use game::{layout_is_valid, Game, MoveOutcome, Phase};
pub use generator::{gap_runs, RowGenerator};
pub use gravity::{apply_gravity, is_settled};
pub use moves::{move_range, validate_move};
pub use queue::{HookId, Step, Task, TaskQueue};
pub use rng::SimpleRng;
pub use rows::{completed_rows, count_rows, count_visible_rows, remove_completed_rows, RowClear};
pub use shadow::{ShadowState, ShadowUpdate};
pub use snapshot::GameSnapshot;
pub use transition::{
    diff_rows, removed_blocks, InstantDriver, Motion, TimedDriver, TransitionBatch,
    TransitionDriver, TransitionId, TransitionKind,
};
