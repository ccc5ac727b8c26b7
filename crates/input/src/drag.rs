//! Keyboard drag controller.
//!
//! Plays the part of the drag gesture: a cursor picks a playfield block, the
//! arrow keys slide it inside its drag limits while a shadow marks the landing
//! column, and confirming turns the drag into a single move request. Drags are
//! refused while the game is busy or over.

use std::ops::RangeInclusive;

use crate::core::{move_range, GameSnapshot, ShadowUpdate};
use crate::map::UiAction;
use crate::types::{BlockId, FLOOR_ROW};

/// What the host should do in response to an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    /// Nothing to forward
    None,
    /// Forward to `Game::set_shadow_state`
    Shadow(ShadowUpdate),
    /// Drop the shadow and request `Game::move_block`
    Release { id: BlockId, column: u8 },
    Restart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Drag {
    id: BlockId,
    origin: u8,
    position: u8,
    range: RangeInclusive<u8>,
}

#[derive(Debug, Clone)]
pub struct DragController {
    column: u8,
    row: u16,
    drag: Option<Drag>,
}

impl DragController {
    pub fn new() -> Self {
        Self {
            column: 0,
            row: FLOOR_ROW,
            drag: None,
        }
    }

    /// Cursor cell as `(column, row)`
    pub fn cursor(&self) -> (u8, u16) {
        (self.column, self.row)
    }

    pub fn dragging(&self) -> Option<BlockId> {
        self.drag.as_ref().map(|d| d.id)
    }

    /// Current drag limits, for the renderer
    pub fn drag_range(&self) -> Option<RangeInclusive<u8>> {
        self.drag.as_ref().map(|d| d.range.clone())
    }

    /// Forget any drag in progress (the game restarted under us)
    pub fn reset(&mut self) {
        self.drag = None;
        self.column = 0;
        self.row = FLOOR_ROW;
    }

    /// Handle one action against the latest snapshot.
    pub fn apply(&mut self, action: UiAction, snapshot: &GameSnapshot) -> DragEvent {
        if action == UiAction::Restart {
            self.reset();
            return DragEvent::Restart;
        }
        match self.drag.take() {
            Some(drag) => self.apply_dragging(drag, action),
            None => self.apply_cursor(action, snapshot),
        }
    }

    fn apply_cursor(&mut self, action: UiAction, snapshot: &GameSnapshot) -> DragEvent {
        let top = snapshot.top_row().max(FLOOR_ROW);
        match action {
            UiAction::Left => self.column = self.column.saturating_sub(1),
            UiAction::Right => {
                self.column = (self.column + 1).min(snapshot.matrix_columns.saturating_sub(1))
            }
            UiAction::Up => self.row = (self.row + 1).min(top),
            UiAction::Down => self.row = self.row.saturating_sub(1).max(FLOOR_ROW),
            UiAction::Confirm => return self.grab(snapshot),
            UiAction::Cancel | UiAction::Restart => {}
        }
        self.row = self.row.min(top);
        DragEvent::None
    }

    fn grab(&mut self, snapshot: &GameSnapshot) -> DragEvent {
        if !snapshot.playable() {
            return DragEvent::None;
        }
        let Some(block) = snapshot.block_at(self.column, self.row).copied() else {
            return DragEvent::None;
        };
        if block.is_staged() {
            return DragEvent::None;
        }
        let Some(range) = move_range(&snapshot.blocks, block.id, snapshot.matrix_columns) else {
            return DragEvent::None;
        };

        self.drag = Some(Drag {
            id: block.id,
            origin: block.column_index,
            position: block.column_index,
            range,
        });
        DragEvent::Shadow(ShadowUpdate::show(block.columns.get(), block.column_index))
    }

    fn apply_dragging(&mut self, mut drag: Drag, action: UiAction) -> DragEvent {
        match action {
            UiAction::Left | UiAction::Right => {
                let next = if action == UiAction::Left {
                    drag.position.saturating_sub(1)
                } else {
                    drag.position.saturating_add(1)
                };
                if drag.range.contains(&next) {
                    // The cursor follows the block's left edge.
                    self.column = self.column.wrapping_add(next).wrapping_sub(drag.position);
                    drag.position = next;
                }
                let position = drag.position;
                self.drag = Some(drag);
                DragEvent::Shadow(ShadowUpdate::position(position))
            }
            UiAction::Confirm if drag.position != drag.origin => DragEvent::Release {
                id: drag.id,
                column: drag.position,
            },
            UiAction::Confirm | UiAction::Cancel => DragEvent::Shadow(ShadowUpdate::hide()),
            UiAction::Up | UiAction::Down | UiAction::Restart => {
                self.drag = Some(drag);
                DragEvent::None
            }
        }
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}
