//! Depth-limited minimax search with alpha-beta pruning.
//!
//! The engine scores every root action exactly (up to the configured depth) and leaves
//! the final choice to [`ActionValues::best_for`], or does both in
//! [`AlphaBeta::best_action`].

use crate::config::AlphaBetaConfig;
use crate::error::{ConfigError, Result, SearchError};
use crate::rollout::TerminalReward;
use crate::state::{Player, State};
use tracing::{debug, trace};

/// Scores the positions where the search stops: terminal states and the depth cutoff.
///
/// The default, [`TerminalReward`], only accepts terminal states. Searches that stop
/// before the end of the game need an evaluator that can estimate running positions.
pub trait LeafEvaluator<S: State> {
    fn evaluate(&self, state: &S) -> Result<f64>;
}

impl<S: State> LeafEvaluator<S> for TerminalReward {
    fn evaluate(&self, state: &S) -> Result<f64> {
        state.reward().ok_or(SearchError::NotTerminal)
    }
}

impl<S, F> LeafEvaluator<S> for F
where
    S: State,
    F: Fn(&S) -> Result<f64>,
{
    fn evaluate(&self, state: &S) -> Result<f64> {
        self(state)
    }
}

/// Minimax value of every root action, in legal-action order.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionValues<A> {
    values: Vec<(A, f64)>,
}

impl<A: PartialEq> ActionValues<A> {
    pub fn get(&self, action: &A) -> Option<f64> {
        self.values
            .iter()
            .find(|(candidate, _)| candidate == action)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&A, f64)> {
        self.values.iter().map(|(action, value)| (action, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The action `player` should pick: the highest value for `Max`, the lowest for `Min`.
    /// Among equal values the first in legal-action order wins.
    pub fn best_for(&self, player: Player) -> Option<(&A, f64)> {
        let sign = player.sign();
        self.iter().fold(None, |best, (action, value)| match best {
            Some((_, best_value)) if sign * value <= sign * best_value => best,
            _ => Some((action, value)),
        })
    }
}

impl<A> IntoIterator for ActionValues<A> {
    type Item = (A, f64);
    type IntoIter = std::vec::IntoIter<(A, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// Alpha-beta search engine.
#[derive(Debug, Clone)]
pub struct AlphaBeta<L = TerminalReward> {
    depth: u32,
    infinity: f64,
    leaf: L,
    leaf_evaluations: u64,
}

impl AlphaBeta<TerminalReward> {
    /// Creates an engine that scores leaves with their terminal reward.
    pub fn new(config: AlphaBetaConfig) -> std::result::Result<Self, ConfigError> {
        Self::with_leaf_evaluator(config, TerminalReward)
    }
}

impl<L> AlphaBeta<L> {
    /// Creates an engine that scores leaves with `leaf`.
    pub fn with_leaf_evaluator(
        config: AlphaBetaConfig,
        leaf: L,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            depth: config.depth,
            infinity: config.infinity,
            leaf,
            leaf_evaluations: 0,
        })
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn infinity(&self) -> f64 {
        self.infinity
    }

    /// Number of leaves evaluated by the last search.
    pub fn leaf_evaluations(&self) -> u64 {
        self.leaf_evaluations
    }

    /// Scores every legal action of `state` with a full-window search of `depth - 1`
    /// plies below the resulting state.
    pub fn search<S>(&mut self, state: &S) -> Result<ActionValues<S::Action>>
    where
        S: State,
        L: LeafEvaluator<S>,
    {
        if state.is_terminal() {
            return Err(SearchError::TerminalState);
        }
        let actions = state.legal_actions();
        if actions.is_empty() {
            return Err(SearchError::NoLegalActions);
        }

        self.leaf_evaluations = 0;
        let mut values = Vec::with_capacity(actions.len());
        for action in actions {
            let value = self.alphabeta(
                &state.apply(&action),
                self.depth - 1,
                -self.infinity,
                self.infinity,
            )?;
            values.push((action, value));
        }

        debug!(
            depth = self.depth,
            actions = values.len(),
            leaves = self.leaf_evaluations,
            "alpha-beta search finished"
        );
        Ok(ActionValues { values })
    }

    /// Searches `state` and picks the best action for the player to move.
    pub fn best_action<S>(&mut self, state: &S) -> Result<(S::Action, f64)>
    where
        S: State,
        L: LeafEvaluator<S>,
    {
        let values = self.search(state)?;
        values
            .best_for(state.current_player())
            .map(|(action, value)| (action.clone(), value))
            .ok_or(SearchError::Invariant("search returned no action values"))
    }

    /// Fail-hard alpha-beta: as soon as `beta <= alpha` the remaining siblings are skipped.
    pub fn alphabeta<S>(
        &mut self,
        state: &S,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
    ) -> Result<f64>
    where
        S: State,
        L: LeafEvaluator<S>,
    {
        if depth == 0 || state.is_terminal() {
            self.leaf_evaluations += 1;
            return self.leaf.evaluate(state);
        }

        let actions = state.legal_actions();
        if actions.is_empty() {
            return Err(SearchError::NoLegalActions);
        }

        match state.current_player() {
            Player::Max => {
                let mut max_eval = -self.infinity;
                for (i, action) in actions.iter().enumerate() {
                    let eval = self.alphabeta(&state.apply(action), depth - 1, alpha, beta)?;
                    max_eval = max_eval.max(eval);
                    alpha = alpha.max(eval);
                    if beta <= alpha {
                        trace!(depth, skipped = actions.len() - i - 1, "beta cutoff");
                        break;
                    }
                }
                Ok(max_eval)
            }
            Player::Min => {
                let mut min_eval = self.infinity;
                for (i, action) in actions.iter().enumerate() {
                    let eval = self.alphabeta(&state.apply(action), depth - 1, alpha, beta)?;
                    min_eval = min_eval.min(eval);
                    beta = beta.min(eval);
                    if beta <= alpha {
                        trace!(depth, skipped = actions.len() - i - 1, "alpha cutoff");
                        break;
                    }
                }
                Ok(min_eval)
            }
        }
    }
}
