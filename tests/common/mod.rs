#![allow(dead_code)]

use gametree::boards::tic_tac_toe::TicTacToe;
use gametree::{Player, State};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;

/// Plays up to `moves` random moves on an empty 3 × 3 board, stopping early if the game ends.
pub fn random_position(seed: u64, moves: usize) -> TicTacToe {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = TicTacToe::default();
    for _ in 0..moves {
        let actions = state.legal_actions();
        let Some(action) = actions.choose(&mut rng) else {
            break;
        };
        state = state.apply(action);
    }
    state
}

/// Random running tic-tac-toe positions with between `min_moves` and `max_moves` marks.
pub fn arb_running_position(
    min_moves: usize,
    max_moves: usize,
) -> impl Strategy<Value = TicTacToe> {
    (any::<u64>(), min_moves..=max_moves)
        .prop_map(|(seed, moves)| random_position(seed, moves))
        .prop_filter("position must still be running", |state| {
            !state.is_terminal()
        })
}

/// Exhaustive minimax value, without pruning.
pub fn minimax(state: &TicTacToe) -> f64 {
    if state.is_terminal() {
        return state.reward().expect("terminal state has a reward");
    }
    let values = state
        .legal_actions()
        .into_iter()
        .map(|action| minimax(&state.apply(&action)));
    match state.current_player() {
        Player::Max => values.fold(f64::NEG_INFINITY, f64::max),
        Player::Min => values.fold(f64::INFINITY, f64::min),
    }
}
