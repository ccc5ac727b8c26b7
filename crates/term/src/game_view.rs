//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Row 1 is drawn at the bottom of the frame and rows grow upward; the staging
//! row is previewed just below the frame, dimmed.

use crate::core::{default_palette, Color, GameSnapshot, Motion, TimedDriver};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Block, BlockId, STAGING_ROW};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const CURSOR_BG: Rgb = Rgb::new(70, 70, 95);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// In-flight transitions, sampled once per frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionFrame {
    /// Blocks drawn away from their logical row, with the row to draw at
    pub displaced: Vec<(BlockId, u16)>,
    /// Blocks of cleared rows with their fade progress
    pub fading: Vec<(BlockId, f32)>,
}

impl TransitionFrame {
    pub fn from_driver(driver: &TimedDriver) -> Self {
        let mut frame = Self::default();
        for (batch, progress) in driver.running() {
            for motion in &batch.motions {
                match *motion {
                    Motion::Move {
                        id,
                        from_row,
                        to_row,
                    } => {
                        let row = from_row as f32 + (to_row as f32 - from_row as f32) * progress;
                        frame.displaced.push((id, row.round().max(0.0) as u16));
                    }
                    Motion::Vanish { id, .. } => frame.fading.push((id, progress)),
                }
            }
        }
        frame
    }

    fn row_of(&self, block: &Block) -> u16 {
        self.displaced
            .iter()
            .find(|(id, _)| *id == block.id)
            .map_or(block.row_index, |&(_, row)| row)
    }

    fn fade_of(&self, id: BlockId) -> f32 {
        self.fading
            .iter()
            .find(|(faded, _)| *faded == id)
            .map_or(0.0, |&(_, progress)| progress)
    }
}

/// Per-frame input state that is not part of the game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    pub cursor: Option<(u8, u16)>,
    /// Block being dragged; drawn at the shadow position
    pub dragging: Option<BlockId>,
    pub transitions: TransitionFrame,
}

/// A lightweight terminal renderer for the block matrix.
pub struct GameView {
    /// Matrix cell width in terminal columns.
    cell_w: u16,
    /// Matrix cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    palette: Vec<Rgb>,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

/// Top-left of the frame plus the grid size, computed once per render
#[derive(Debug, Clone, Copy)]
struct Layout {
    x: u16,
    y: u16,
    columns: u16,
    rows: u16,
    frame_w: u16,
    frame_h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
            palette: default_palette().into_iter().map(Rgb::from).collect(),
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_palette(mut self, palette: &[Color]) -> Self {
        if !palette.is_empty() {
            self.palette = palette.iter().copied().map(Rgb::from).collect();
        }
        self
    }

    /// Frame size in terminal cells, staging preview included
    pub fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        let w = snap.matrix_columns as u16 * self.cell_w + 2;
        let h = snap.matrix_rows as u16 * self.cell_h + 2 + self.cell_h;
        (w, h)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, overlay: &Overlay, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, total_h) = self.frame_size(snap);
        let layout = Layout {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
                AnchorY::Top => 0,
            },
            columns: snap.matrix_columns as u16,
            rows: snap.matrix_rows as u16,
            frame_w,
            frame_h: total_h - self.cell_h,
        };

        let board_w = layout.columns * self.cell_w;
        let board_h = layout.rows * self.cell_h;
        fb.fill_rect(layout.x + 1, layout.y + 1, board_w, board_h, ' ', CellStyle::plain(BOARD_BG, BOARD_BG));
        let dots = CellStyle {
            dim: true,
            ..CellStyle::plain(Rgb::new(90, 90, 100), BOARD_BG)
        };
        for row in 1..=layout.rows {
            for column in 0..layout.columns {
                self.fill_cell(fb, layout, column, row, '·', dots);
            }
        }

        if snap.shadow.visible {
            let shadow = CellStyle {
                dim: true,
                ..CellStyle::plain(Rgb::new(120, 120, 140), BOARD_BG)
            };
            let end = (snap.shadow.position as u16 + snap.shadow.columns as u16).min(layout.columns);
            for row in 1..=layout.rows {
                for column in snap.shadow.position as u16..end {
                    self.fill_cell(fb, layout, column, row, '░', shadow);
                }
            }
        }

        fb.draw_box(
            layout.x,
            layout.y,
            layout.frame_w,
            layout.frame_h,
            CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG),
        );

        for block in &snap.blocks {
            let mut drawn = *block;
            drawn.row_index = overlay.transitions.row_of(block);
            if overlay.dragging == Some(block.id) && snap.shadow.visible {
                drawn.column_index = snap.shadow.position;
            }
            let fade = overlay.transitions.fade_of(block.id);
            self.draw_block(fb, layout, &drawn, fade, overlay.dragging == Some(block.id));
        }
        for block in &snap.upcoming {
            self.draw_block(fb, layout, block, 0.5, false);
        }

        if let Some((column, row)) = overlay.cursor.filter(|_| overlay.dragging.is_none()) {
            if let Some(y) = self.row_y(layout, row) {
                let x = self.column_x(layout, column as u16);
                for dy in 0..self.cell_h {
                    for dx in 0..self.cell_w {
                        fb.tint(x + dx, y + dy, CURSOR_BG);
                    }
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        if snap.game_over {
            self.draw_overlay_text(fb, layout, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, overlay: &Overlay, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }

    fn column_x(&self, layout: Layout, column: u16) -> u16 {
        layout.x + 1 + column * self.cell_w
    }

    /// Screen row of a matrix row; `None` above the frame
    fn row_y(&self, layout: Layout, row: u16) -> Option<u16> {
        if row == STAGING_ROW {
            return Some(layout.y + layout.frame_h);
        }
        (row <= layout.rows).then(|| layout.y + 1 + (layout.rows - row) * self.cell_h)
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, layout: Layout, column: u16, row: u16, ch: char, style: CellStyle) {
        if let Some(y) = self.row_y(layout, row) {
            let x = self.column_x(layout, column);
            fb.fill_rect(x, y, self.cell_w, self.cell_h, ch, style);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, layout: Layout, block: &Block, fade: f32, bold: bool) {
        let Some(y) = self.row_y(layout, block.row_index) else {
            return;
        };
        let base = self.palette[block.color_index as usize % self.palette.len()];
        let bg = if block.is_staged() { PANEL_BG } else { BOARD_BG };
        let style = CellStyle {
            fg: base.mix(bg, fade),
            bg,
            bold,
            dim: false,
        };

        let x = self.column_x(layout, block.column_index as u16);
        let w = block.columns.get() as u16 * self.cell_w;
        fb.fill_rect(x, y, w, self.cell_h, '█', style);
        // Split neighbors visually.
        for dy in 0..self.cell_h {
            fb.put_char(x + w - 1, y + dy, '▌', style);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, layout: Layout) {
        let panel_x = layout.x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG)
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = CellStyle { dim: true, ..value };

        let mut y = layout.y;
        fb.put_str(panel_x, y, "ROWS", label);
        fb.put_u32(panel_x, y + 1, snap.rows_cleared, value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "MOVES", label);
        fb.put_u32(panel_x, y + 1, snap.moves, value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "STATE", label);
        let state = if snap.game_over {
            "OVER"
        } else if snap.has_queued_task {
            "BUSY"
        } else {
            "READY"
        };
        fb.put_str(panel_x, y + 1, state, value);
        y = y.saturating_add(3);

        for help in ["arrows move", "space grab/drop", "esc cancel", "r restart", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, help, dim);
            y += 1;
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: Layout, text: &str) {
        let mid_y = layout.y.saturating_add(layout.frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = layout.x.saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG)
        };
        fb.put_str(x, mid_y, text, style);
    }
}
