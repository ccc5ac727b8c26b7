//! Headless simulation: a seeded bot plays moves and every settled position is
//! printed as one JSON line.
//!
//! ```text
//! slide-blocks simulate [--seed N] [--moves M]
//! ```

use std::io::Write;

use anyhow::{anyhow, Result};
use tracing::{debug, info};

use crate::core::{
    apply_gravity, completed_rows, move_range, Game, GameConfig, GameSnapshot, MoveOutcome,
    SimpleRng,
};
use crate::types::{Block, BlockId};

/// Ticks allowed for one move's phase chain to settle
const MAX_SETTLE_TICKS: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulateConfig {
    pub seed: u32,
    pub moves: u32,
}

impl Default for SimulateConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            moves: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationSummary {
    pub moves: u32,
    pub rows_cleared: u32,
    pub game_over: bool,
}

pub fn parse_simulate_args(args: &[String]) -> Result<Option<SimulateConfig>> {
    if args.first().map(String::as_str) != Some("simulate") {
        return Ok(None);
    }

    let mut config = SimulateConfig::default();
    let mut i = 1usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("simulate: missing value for --seed"))?;
                config.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("simulate: invalid --seed value: {}", v))?;
            }
            "--moves" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("simulate: missing value for --moves"))?;
                config.moves = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("simulate: invalid --moves value: {}", v))?;
            }
            other => {
                return Err(anyhow!("simulate: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(Some(config))
}

/// Picks moves from a snapshot: a move that completes a row when one exists,
/// otherwise a random legal slide.
#[derive(Debug, Clone)]
pub struct Bot {
    rng: SimpleRng,
}

impl Bot {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    pub fn choose_move(&mut self, snap: &GameSnapshot) -> Option<(BlockId, u8)> {
        let candidates = candidate_moves(snap);
        if let Some(&clearing) = candidates
            .iter()
            .find(|&&(id, column)| completes_row(snap, id, column))
        {
            return Some(clearing);
        }
        self.rng.pick(&candidates).copied()
    }
}

/// Every `(block, column)` slide that changes a playfield block's column
pub fn candidate_moves(snap: &GameSnapshot) -> Vec<(BlockId, u8)> {
    let mut moves = Vec::new();
    for block in &snap.blocks {
        let Some(range) = move_range(&snap.blocks, block.id, snap.matrix_columns) else {
            continue;
        };
        moves.extend(
            range
                .filter(|&column| column != block.column_index)
                .map(|column| (block.id, column)),
        );
    }
    moves
}

fn completes_row(snap: &GameSnapshot, id: BlockId, column: u8) -> bool {
    let moved: Vec<Block> = snap
        .blocks
        .iter()
        .map(|b| if b.id == id { Block { column_index: column, ..*b } } else { *b })
        .collect();
    !completed_rows(&apply_gravity(&moved), snap.matrix_columns).is_empty()
}

/// Play up to `config.moves` moves, writing one snapshot per settled move.
pub fn run_simulation(config: &SimulateConfig, out: &mut impl Write) -> Result<SimulationSummary> {
    let mut game = Game::new(GameConfig::default(), config.seed)?;
    let mut bot = Bot::new(config.seed ^ 0x9E37_79B9);

    game.restart();
    game.run_until_idle(MAX_SETTLE_TICKS);
    writeln!(out, "{}", serde_json::to_string(&game.snapshot())?)?;

    while game.moves() < config.moves && !game.game_over() {
        let snap = game.snapshot();
        let Some((id, column)) = bot.choose_move(&snap) else {
            debug!("no legal move left");
            break;
        };
        if game.move_block(id, column)? == MoveOutcome::Unchanged {
            continue;
        }
        let ticks = game.run_until_idle(MAX_SETTLE_TICKS);
        if game.is_busy() {
            return Err(anyhow!("simulate: move {} did not settle after {} ticks", game.moves(), ticks));
        }
        writeln!(out, "{}", serde_json::to_string(&game.snapshot())?)?;
    }

    let summary = SimulationSummary {
        moves: game.moves(),
        rows_cleared: game.rows_cleared(),
        game_over: game.game_over(),
    };
    info!(?summary, seed = config.seed, "simulation finished");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_simulate_args() {
        assert_eq!(parse_simulate_args(&args(&[])).unwrap(), None);
        assert_eq!(parse_simulate_args(&args(&["play"])).unwrap(), None);
        assert_eq!(
            parse_simulate_args(&args(&["simulate"])).unwrap(),
            Some(SimulateConfig::default())
        );
        assert_eq!(
            parse_simulate_args(&args(&["simulate", "--seed", "9", "--moves", "3"])).unwrap(),
            Some(SimulateConfig { seed: 9, moves: 3 })
        );
        assert!(parse_simulate_args(&args(&["simulate", "--seed"])).is_err());
        assert!(parse_simulate_args(&args(&["simulate", "--moves", "x"])).is_err());
        assert!(parse_simulate_args(&args(&["simulate", "--fast"])).is_err());
    }
}
