use criterion::{black_box, criterion_group, criterion_main, Criterion};
use slide_blocks::core::{apply_gravity, remove_completed_rows, Game, GameConfig, RowGenerator};
use slide_blocks::simulate::Bot;
use slide_blocks::types::{Block, BlockId, Columns};

/// Ten generated rows spaced out with empty rows between them.
fn floating_stack() -> Vec<Block> {
    let mut gen = RowGenerator::new(12345, 8, 5);
    (1..=10u16)
        .flat_map(|row| gen.generate_row(row * 2))
        .collect()
}

fn bench_apply_gravity(c: &mut Criterion) {
    let blocks = floating_stack();

    c.bench_function("apply_gravity_10_rows", |b| {
        b.iter(|| apply_gravity(black_box(&blocks)))
    });
}

fn bench_row_clear(c: &mut Criterion) {
    // Four completed rows under a partial one.
    let mut blocks = Vec::new();
    for row in 1..=4u16 {
        let id = row as u32 * 2;
        blocks.push(Block::new(BlockId(id), 0, row, Columns::Four, 0));
        blocks.push(Block::new(BlockId(id + 1), 4, row, Columns::Four, 1));
    }
    blocks.push(Block::new(BlockId(100), 2, 5, Columns::Three, 2));

    c.bench_function("clear_4_rows", |b| {
        b.iter(|| remove_completed_rows(black_box(&blocks), 8))
    });
}

fn bench_generate_row(c: &mut Criterion) {
    let mut gen = RowGenerator::new(12345, 8, 5);

    c.bench_function("generate_row", |b| b.iter(|| gen.generate_row(black_box(0))));
}

fn bench_restart_settle(c: &mut Criterion) {
    let mut game = Game::new(GameConfig::default(), 12345).unwrap();

    c.bench_function("restart_and_settle", |b| {
        b.iter(|| {
            game.restart();
            game.run_until_idle(10_000)
        })
    });
}

fn bench_move_and_settle(c: &mut Criterion) {
    let mut game = Game::new(GameConfig::default(), 12345).unwrap();
    let mut bot = Bot::new(7);
    game.restart();
    game.run_until_idle(10_000);

    c.bench_function("move_and_settle", |b| {
        b.iter(|| {
            if game.game_over() {
                game.restart();
                game.run_until_idle(10_000);
            }
            let snap = game.snapshot();
            if let Some((id, column)) = bot.choose_move(&snap) {
                let _ = game.move_block(id, column);
            }
            game.run_until_idle(10_000)
        })
    });
}

criterion_group!(
    benches,
    bench_apply_gravity,
    bench_row_clear,
    bench_generate_row,
    bench_restart_settle,
    bench_move_and_settle
);
criterion_main!(benches);
