//! Leaf evaluation for the UCT engine.
//!
//! A rollout policy turns the state of a freshly expanded node into a reward. The engine
//! hands its own random generator to the policy so that a seeded engine stays reproducible.

use crate::error::{Result, SearchError};
use crate::state::State;
use rand::RngCore;
use rand::seq::IndexedRandom;

/// Strategy estimating the value of a state, from `Max`'s point of view.
pub trait RolloutPolicy<S: State> {
    fn evaluate(&self, state: &S, rng: &mut dyn RngCore) -> Result<f64>;
}

/// Plays uniformly random legal moves until the game ends and returns the terminal reward.
///
/// This is the default policy of [`Uct`](crate::uct::Uct).
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomRollout;

impl<S: State> RolloutPolicy<S> for RandomRollout {
    fn evaluate(&self, state: &S, rng: &mut dyn RngCore) -> Result<f64> {
        let mut state = state.clone();
        while !state.is_terminal() {
            let actions = state.legal_actions();
            let action = actions
                .choose(&mut *rng)
                .ok_or(SearchError::NoLegalActions)?;
            state = state.apply(action);
        }
        state.reward().ok_or(SearchError::NotTerminal)
    }
}

/// Returns the reward of the state itself. Fails on non-terminal states.
///
/// Mostly useful as the leaf evaluator of [`AlphaBeta`](crate::alpha_beta::AlphaBeta),
/// where it is the default.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalReward;

impl<S: State> RolloutPolicy<S> for TerminalReward {
    fn evaluate(&self, state: &S, _rng: &mut dyn RngCore) -> Result<f64> {
        state.reward().ok_or(SearchError::NotTerminal)
    }
}

impl<S, F> RolloutPolicy<S> for F
where
    S: State,
    F: Fn(&S, &mut dyn RngCore) -> Result<f64>,
{
    fn evaluate(&self, state: &S, rng: &mut dyn RngCore) -> Result<f64> {
        self(state, rng)
    }
}
