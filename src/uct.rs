use crate::config::{SearchLimit, UctConfig};
use crate::error::{ConfigError, Result, SearchError};
use crate::node::SearchTree;
use crate::rollout::{RandomRollout, RolloutPolicy};
use crate::state::State;
use ego_tree::NodeId;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, trace};

/// Visit count and accumulated reward of one tree node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStatistics {
    pub visits: u32,
    pub total_reward: f64,
}

impl NodeStatistics {
    /// Mean rollout reward, from `Max`'s point of view.
    pub fn expected_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / self.visits as f64
        }
    }
}

/// Statistics of the root and of one of its children after a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchStatistics {
    pub root: NodeStatistics,
    pub action: NodeStatistics,
}

/// The chosen action together with the statistics that led to it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome<A> {
    pub action: A,
    pub statistics: SearchStatistics,
}

impl<A> SearchOutcome<A> {
    pub fn expected_reward(&self) -> f64 {
        self.statistics.action.expected_reward()
    }
}

/// Upper Confidence bounds applied to Trees: Monte Carlo tree search with the UCT
/// selection rule.
///
/// Every call to [`Uct::search`] grows a fresh tree from the given state until the budget
/// runs out, then returns the child of the root with the best mean reward for the player
/// to move. The tree of the last search stays available for [`Uct::statistics`] until the
/// next search replaces it.
pub struct Uct<S: State, P = RandomRollout, R = StdRng> {
    limit: SearchLimit,
    exploration_constant: f64,
    policy: P,
    rng: R,
    tree: Option<SearchTree<S>>,
}

/// A builder for creating instances of `Uct`.
///
/// Budgets are checked in [`UctBuilder::build`]: exactly one of a time limit and an
/// iteration limit must be given.
pub struct UctBuilder<P = RandomRollout, R = StdRng> {
    config: UctConfig,
    policy: P,
    rng: R,
}

impl UctBuilder<RandomRollout, StdRng> {
    /// Creates a builder with no budget, the default exploration constant, random rollouts
    /// and an OS-seeded generator.
    pub fn new() -> Self {
        Self::from_config(UctConfig::default())
    }

    /// Creates a builder starting from an existing config.
    pub fn from_config(config: UctConfig) -> Self {
        Self {
            config,
            policy: RandomRollout,
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for UctBuilder<RandomRollout, StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, R> UctBuilder<P, R> {
    /// Sets the wall-clock budget of each search, in milliseconds.
    pub fn with_time_limit(mut self, milliseconds: u64) -> Self {
        self.config.time_limit_ms = Some(milliseconds);
        self
    }

    /// Sets the number of rounds of each search.
    pub fn with_iteration_limit(mut self, iterations: u32) -> Self {
        self.config.iteration_limit = Some(iterations);
        self
    }

    pub fn with_exploration_constant(mut self, exploration_constant: f64) -> Self {
        self.config.exploration_constant = exploration_constant;
        self
    }

    /// Replaces the rollout policy used to evaluate newly expanded nodes.
    pub fn with_rollout_policy<Q>(self, policy: Q) -> UctBuilder<Q, R> {
        UctBuilder {
            config: self.config,
            policy,
            rng: self.rng,
        }
    }

    /// Sets the random number generator for rollouts and tie-breaking.
    pub fn with_rng<K: Rng>(self, rng: K) -> UctBuilder<P, K> {
        UctBuilder {
            config: self.config,
            policy: self.policy,
            rng,
        }
    }

    /// Validates the configuration and builds the engine.
    pub fn build<S: State>(self) -> std::result::Result<Uct<S, P, R>, ConfigError> {
        let limit = self.config.validate()?;
        Ok(Uct {
            limit,
            exploration_constant: self.config.exploration_constant,
            policy: self.policy,
            rng: self.rng,
            tree: None,
        })
    }
}

impl<S: State> Uct<S, RandomRollout, StdRng> {
    /// Builds an engine with random rollouts and an OS-seeded generator from `config`.
    pub fn from_config(config: UctConfig) -> std::result::Result<Self, ConfigError> {
        UctBuilder::from_config(config).build()
    }
}

impl<S, P, R> Uct<S, P, R>
where
    S: State,
    P: RolloutPolicy<S>,
    R: Rng,
{
    pub fn limit(&self) -> SearchLimit {
        self.limit
    }

    pub fn exploration_constant(&self) -> f64 {
        self.exploration_constant
    }

    /// Searches from `state` and returns the most promising action.
    pub fn search(&mut self, state: &S) -> Result<S::Action> {
        self.search_verbose(state).map(|outcome| outcome.action)
    }

    /// Searches from `state` and returns the most promising action with the root and
    /// child statistics behind the choice.
    pub fn search_verbose(&mut self, state: &S) -> Result<SearchOutcome<S::Action>> {
        if state.is_terminal() {
            return Err(SearchError::TerminalState);
        }

        self.tree = None;
        let started = Instant::now();
        let mut tree = SearchTree::new(state.clone());

        let rounds = match self.limit {
            SearchLimit::Iterations(iterations) => {
                for _ in 0..iterations {
                    self.execute_round(&mut tree)?;
                }
                iterations
            }
            SearchLimit::Time(limit) => {
                let mut rounds = 0;
                loop {
                    self.execute_round(&mut tree)?;
                    rounds += 1;
                    if started.elapsed() >= limit {
                        break rounds;
                    }
                }
            }
        };

        let root = tree.root_id();
        let best = self.best_child(&tree, root, 0.0)?;
        let chosen = tree.get(best)?;
        let action = chosen
            .action
            .clone()
            .ok_or(SearchError::Invariant("child node without an action"))?;
        let statistics = SearchStatistics {
            root: NodeStatistics {
                visits: tree.root().visits,
                total_reward: tree.root().total_reward,
            },
            action: NodeStatistics {
                visits: chosen.visits,
                total_reward: chosen.total_reward,
            },
        };

        debug!(
            rounds,
            nodes = tree.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            action = ?action,
            expected_reward = statistics.action.expected_reward(),
            "uct search finished"
        );

        self.tree = Some(tree);
        Ok(SearchOutcome { action, statistics })
    }

    /// Root and child statistics of `action` in the last completed search.
    ///
    /// Returns `None` before the first search or if `action` was never expanded.
    pub fn statistics(&self, action: &S::Action) -> Option<SearchStatistics> {
        let tree = self.tree.as_ref()?;
        let child = tree.get(*tree.root().children.get(action)?).ok()?;
        Some(SearchStatistics {
            root: NodeStatistics {
                visits: tree.root().visits,
                total_reward: tree.root().total_reward,
            },
            action: NodeStatistics {
                visits: child.visits,
                total_reward: child.total_reward,
            },
        })
    }

    /// Every action expanded at the root of the last search, in expansion order.
    pub fn explored_actions(&self) -> Vec<(S::Action, NodeStatistics)> {
        let Some(tree) = self.tree.as_ref() else {
            return Vec::new();
        };
        tree.children(tree.root_id())
            .filter_map(|(_, child)| {
                let action = child.action.clone()?;
                let statistics = NodeStatistics {
                    visits: child.visits,
                    total_reward: child.total_reward,
                };
                Some((action, statistics))
            })
            .collect()
    }

    /// The tree grown by the last completed search.
    pub fn tree(&self) -> Option<&SearchTree<S>> {
        self.tree.as_ref()
    }

    /// One round: select a node, expand it, run a rollout from it and propagate the reward.
    fn execute_round(&mut self, tree: &mut SearchTree<S>) -> Result<()> {
        let node_id = self.select(tree)?;
        let reward = self
            .policy
            .evaluate(&tree.get(node_id)?.state, &mut self.rng)?;
        tree.backpropagate(node_id, reward)
    }

    /// Descends through fully expanded nodes and expands the first node that is not.
    /// Returns a terminal node unchanged if the descent ends on one.
    fn select(&mut self, tree: &mut SearchTree<S>) -> Result<NodeId> {
        let mut node_id = tree.root_id();
        loop {
            let node = tree.get(node_id)?;
            if node.is_terminal {
                return Ok(node_id);
            }
            if !node.is_fully_expanded {
                return Self::expand(tree, node_id);
            }
            node_id = self.best_child(tree, node_id, self.exploration_constant)?;
        }
    }

    /// Adds a child for the first legal action that does not have one yet.
    fn expand(tree: &mut SearchTree<S>, node_id: NodeId) -> Result<NodeId> {
        let node = tree.get(node_id)?;
        let actions = node.state.legal_actions();
        if actions.is_empty() {
            return Err(SearchError::NoLegalActions);
        }

        let action = actions
            .iter()
            .find(|action| !node.children.contains_key(*action))
            .cloned()
            .ok_or(SearchError::Invariant(
                "no action left to expand on a node that is not fully expanded",
            ))?;
        let next_state = node.state.apply(&action);
        let remaining = actions.len().saturating_sub(node.children.len() + 1);

        trace!(action = ?action, remaining, "expand");
        let child_id = tree.add_child(node_id, action, next_state)?;
        if remaining == 0 {
            tree.mark_fully_expanded(node_id)?;
        }
        Ok(child_id)
    }

    /// Picks the child with the highest UCT score, breaking ties uniformly at random.
    fn best_child(
        &mut self,
        tree: &SearchTree<S>,
        node_id: NodeId,
        exploration_constant: f64,
    ) -> Result<NodeId> {
        let parent = tree.get(node_id)?;
        let mut best_value = f64::NEG_INFINITY;
        let mut best_nodes = Vec::new();

        for (child_id, child) in tree.children(node_id) {
            if child.visits == 0 {
                return Err(SearchError::Invariant("unvisited child reached selection"));
            }
            let value = uct_value(
                parent.current_player.sign(),
                parent.visits,
                child.total_reward,
                child.visits,
                exploration_constant,
            );
            if value > best_value {
                best_value = value;
                best_nodes.clear();
                best_nodes.push(child_id);
            } else if value == best_value {
                best_nodes.push(child_id);
            }
        }

        best_nodes
            .choose(&mut self.rng)
            .copied()
            .ok_or(SearchError::Invariant("selection reached a node without children"))
    }
}

/// Mean reward oriented for the player to move at the parent, plus the exploration bonus.
fn uct_value(
    sign: f64,
    parent_visits: u32,
    child_reward: f64,
    child_visits: u32,
    exploration_constant: f64,
) -> f64 {
    let visits = child_visits as f64;
    sign * child_reward / visits
        + exploration_constant * f64::sqrt(2.0 * f64::ln(parent_visits as f64) / visits)
}
