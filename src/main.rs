//! Terminal slide-blocks runner (default binary).
//!
//! Interactive play uses crossterm for input and the framebuffer renderer.
//! `slide-blocks simulate [--seed N] [--moves M]` runs a headless bot instead
//! and prints one JSON snapshot per settled move.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, warn};

use slide_blocks::core::{Game, GameConfig, ShadowUpdate, TimedDriver};
use slide_blocks::input::{handle_key_event, should_quit, DragController, DragEvent};
use slide_blocks::logging;
use slide_blocks::simulate::{parse_simulate_args, run_simulation};
use slide_blocks::term::{GameView, Overlay, TerminalRenderer, TransitionFrame, Viewport};

/// Frame pacing for the render loop
const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    logging::init()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Some(config) = parse_simulate_args(&args)? {
        let stdout = std::io::stdout();
        let summary = run_simulation(&config, &mut stdout.lock())?;
        eprintln!(
            "moves={} rows_cleared={} game_over={}",
            summary.moves, summary.rows_cleared, summary.game_over
        );
        return Ok(());
    }

    let config = GameConfig::from_env()?;
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn session_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, config: GameConfig) -> Result<()> {
    let seed = session_seed();
    info!(seed, columns = config.matrix_columns, rows = config.matrix_rows, "session start");

    let view = GameView::default().with_palette(&config.palette);
    let mut game = Game::with_driver(config, seed, TimedDriver::new())?;
    game.restart();

    let mut drag = DragController::new();
    let mut fb = slide_blocks::term::FrameBuffer::new(0, 0);
    let frame = Duration::from_millis(FRAME_MS);
    let mut last_tick = Instant::now();

    loop {
        // Advance the simulation by the real time since the last frame.
        let elapsed = last_tick.elapsed();
        last_tick = Instant::now();
        game.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);

        // Render.
        let snapshot = game.snapshot();
        let overlay = Overlay {
            cursor: Some(drag.cursor()),
            dragging: drag.dragging(),
            transitions: TransitionFrame::from_driver(game.driver()),
        };
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snapshot, &overlay, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next frame.
        let timeout = frame.saturating_sub(last_tick.elapsed());
        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    info!(moves = game.moves(), rows_cleared = game.rows_cleared(), "quit");
                    return Ok(());
                }
                let Some(action) = handle_key_event(key) else {
                    continue;
                };
                match drag.apply(action, &snapshot) {
                    DragEvent::None => {}
                    DragEvent::Shadow(update) => game.set_shadow_state(update),
                    DragEvent::Release { id, column } => {
                        game.set_shadow_state(ShadowUpdate::hide());
                        match game.move_block(id, column) {
                            Ok(outcome) => debug!(block = %id, column, ?outcome, "release"),
                            Err(err) => warn!(block = %id, column, %err, "move rejected"),
                        }
                    }
                    DragEvent::Restart => game.restart(),
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
