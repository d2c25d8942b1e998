//! Search benchmarks.
//!
//! Run with: `cargo bench`
//!
//! - UCT with growing iteration budgets from the empty board
//! - Alpha-beta at full depth from the empty board and from a midgame position

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gametree::boards::tic_tac_toe::TicTacToe;
use gametree::{AlphaBeta, AlphaBetaConfig, UctBuilder};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

fn bench_uct(c: &mut Criterion) {
    let mut group = c.benchmark_group("uct");
    let board = TicTacToe::default();

    for iterations in [100u32, 1000, 5000] {
        group.throughput(Throughput::Elements(iterations as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(iterations),
            &iterations,
            |b, &iterations| {
                let mut uct = UctBuilder::new()
                    .with_iteration_limit(iterations)
                    .with_rng(ChaCha8Rng::seed_from_u64(42))
                    .build()
                    .unwrap();
                b.iter(|| uct.search(black_box(&board)).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_alpha_beta(c: &mut Criterion) {
    let mut group = c.benchmark_group("alpha_beta");
    let positions = [
        ("empty", TicTacToe::default()),
        ("midgame", TicTacToe::from_moves(3, &[(1, 1), (0, 0), (2, 2)])),
    ];

    for (name, board) in positions {
        group.bench_function(name, |b| {
            let mut engine = AlphaBeta::new(AlphaBetaConfig::with_depth(9)).unwrap();
            b.iter(|| engine.best_action(black_box(&board)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_uct, bench_alpha_beta);
criterion_main!(benches);
