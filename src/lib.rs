//! Game-tree search for two-player, zero-sum, perfect-information games.
//!
//! The library offers two interchangeable engines working over the same [`State`] trait:
//!
//! - [`Uct`]: Monte Carlo tree search with the UCT selection rule, bounded by a time or an
//!   iteration budget.
//! - [`AlphaBeta`]: depth-limited minimax with fail-hard alpha-beta pruning.
//!
//! Neither engine mutates the caller's state, and every search builds its own tree.
//!
//! # Example
//!
//! ```rust
//! use gametree::boards::tic_tac_toe::TicTacToe;
//! use gametree::{AlphaBeta, AlphaBetaConfig, UctBuilder};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! // X X .
//! // O O .
//! // . . .
//! let board = TicTacToe::from_moves(3, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
//!
//! let mut uct = UctBuilder::new()
//!     .with_iteration_limit(1000)
//!     .with_rng(StdRng::seed_from_u64(42))
//!     .build()
//!     .unwrap();
//! let outcome = uct.search_verbose(&board).unwrap();
//! println!("UCT plays {:?}, expected reward {:.2}", outcome.action, outcome.expected_reward());
//!
//! let mut alpha_beta = AlphaBeta::new(AlphaBetaConfig::with_depth(5)).unwrap();
//! let (action, value) = alpha_beta.best_action(&board).unwrap();
//! println!("alpha-beta plays {:?} worth {}", action, value);
//! ```

/// Depth-limited minimax search with alpha-beta pruning.
pub mod alpha_beta;
/// Contains ready-made implementations of the `State` trait.
pub mod boards;
/// Engine configuration and its validation.
pub mod config;
/// Configuration and search errors.
pub mod error;
/// Contains the `UctNode` struct and the arena holding the search tree.
pub mod node;
/// Leaf evaluation strategies for the UCT engine.
pub mod rollout;
/// Contains the `State` trait that every game has to implement.
pub mod state;
/// The Monte Carlo tree search engine.
pub mod uct;

pub use alpha_beta::{ActionValues, AlphaBeta, LeafEvaluator};
pub use config::{AlphaBetaConfig, SearchLimit, UctConfig};
pub use error::{ConfigError, Result, SearchError};
pub use rollout::{RandomRollout, RolloutPolicy, TerminalReward};
pub use state::{Player, State};
pub use uct::{NodeStatistics, SearchOutcome, SearchStatistics, Uct, UctBuilder};
