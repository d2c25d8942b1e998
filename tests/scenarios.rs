//! End-to-end scenarios on tic-tac-toe for both engines.

mod common;

use common::random_position;
use gametree::boards::tic_tac_toe::{Cell, TicTacToe};
use gametree::{
    AlphaBeta, AlphaBetaConfig, ConfigError, Player, SearchLimit, State, Uct, UctBuilder,
    UctConfig,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

/// X X .
/// O O .
/// . . .
fn max_wins_in_one() -> TicTacToe {
    TicTacToe::from_moves(3, &[(0, 0), (1, 0), (0, 1), (1, 1)])
}

#[test]
fn uct_finds_the_win_with_overwhelming_frequency() {
    let board = max_wins_in_one();
    let winning = Cell::new(Player::Max, 0, 2);

    let hits = (0..20)
        .filter(|&seed| {
            let mut uct = UctBuilder::new()
                .with_iteration_limit(1000)
                .with_rng(ChaCha8Rng::seed_from_u64(seed))
                .build()
                .unwrap();
            uct.search(&board).unwrap() == winning
        })
        .count();

    assert!(hits >= 19, "winning move chosen in only {hits} of 20 searches");
}

#[test]
fn alpha_beta_finds_the_win_deterministically() {
    let board = max_wins_in_one();
    for depth in [1, 3, 5] {
        // only the winning move ends the game at depth 1, give the cutoff a neutral estimate
        let neutral = |state: &TicTacToe| -> gametree::Result<f64> {
            Ok(state.reward().unwrap_or(0.0))
        };
        let mut engine =
            AlphaBeta::with_leaf_evaluator(AlphaBetaConfig::with_depth(depth), neutral).unwrap();
        let (action, value) = engine.best_action(&board).unwrap();
        assert_eq!(action, Cell::new(Player::Max, 0, 2));
        assert_eq!(value, 1.0);
    }
}

#[test]
fn both_budgets_fail_before_any_search() {
    let config = UctConfig {
        time_limit_ms: Some(1000),
        iteration_limit: Some(1000),
        ..Default::default()
    };
    assert!(matches!(
        Uct::<TicTacToe>::from_config(config),
        Err(ConfigError::BothLimits)
    ));

    let built = UctBuilder::new()
        .with_time_limit(1000)
        .with_iteration_limit(1000)
        .build::<TicTacToe>();
    assert!(matches!(built, Err(ConfigError::BothLimits)));
}

#[test]
fn time_budget_is_respected_within_a_round() {
    let limit = Duration::from_millis(50);
    let mut uct: Uct<TicTacToe, _, ChaCha8Rng> = UctBuilder::new()
        .with_time_limit(50)
        .with_rng(ChaCha8Rng::seed_from_u64(8))
        .build()
        .unwrap();
    assert_eq!(uct.limit(), SearchLimit::Time(limit));

    let started = Instant::now();
    let outcome = uct.search_verbose(&TicTacToe::default()).unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed >= limit);
    // one tic-tac-toe round takes microseconds
    assert!(elapsed < limit + Duration::from_secs(1));
    assert!(outcome.statistics.root.visits > 1);
}

#[test]
fn search_never_mutates_the_callers_state() {
    let board = random_position(17, 3);
    let snapshot = board.clone();

    let mut uct = UctBuilder::new()
        .with_iteration_limit(200)
        .with_rng(ChaCha8Rng::seed_from_u64(1))
        .build()
        .unwrap();
    uct.search(&board).unwrap();
    let mut alpha_beta = AlphaBeta::new(AlphaBetaConfig::with_depth(9)).unwrap();
    alpha_beta.search(&board).unwrap();

    assert_eq!(board, snapshot);
}

#[test]
fn engines_agree_on_a_larger_board() {
    // 4 × 4, X needs the last cell of the top row
    let board = TicTacToe::from_moves(4, &[(0, 0), (3, 0), (0, 1), (3, 1), (0, 2), (2, 3)]);
    let winning = Cell::new(Player::Max, 0, 3);

    let mut uct = UctBuilder::new()
        .with_iteration_limit(3000)
        .with_rng(ChaCha8Rng::seed_from_u64(4))
        .build()
        .unwrap();
    assert_eq!(uct.search(&board).unwrap(), winning);

    let neutral =
        |state: &TicTacToe| -> gametree::Result<f64> { Ok(state.reward().unwrap_or(0.0)) };
    let mut alpha_beta =
        AlphaBeta::with_leaf_evaluator(AlphaBetaConfig::with_depth(2), neutral).unwrap();
    assert_eq!(alpha_beta.best_action(&board).unwrap().0, winning);
}
