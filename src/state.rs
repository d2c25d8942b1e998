use crate::error::SearchError;
use std::fmt::Debug;
use std::hash::Hash;

/// The central trait of the library, defining the interface for a game position.
///
/// Both search engines only talk to a game through this trait. A state is a value:
/// [`State::apply`] returns the successor and never touches the receiver, so the
/// engines can keep snapshots of every position they have explored.
pub trait State: Clone {
    /// A move for a specific player. Actions key the edges between sibling tree nodes,
    /// so two actions must compare equal (and hash equally) exactly when they denote
    /// the same move.
    type Action: Clone + Eq + Hash + Debug;

    /// Returns the player whose turn it is to move.
    fn current_player(&self) -> Player;

    /// Returns all actions available from this state.
    ///
    /// The order may differ between calls. The engines only rely on it to decide which
    /// missing child gets expanded first.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Returns the state reached by playing `action`.
    fn apply(&self, action: &Self::Action) -> Self;

    /// Returns `true` once nobody can move any more (win, loss or draw).
    fn is_terminal(&self) -> bool;

    /// Returns the outcome of a finished game from the fixed point of view of
    /// [`Player::Max`]: positive favors `Max`, negative favors `Min`, zero is a draw.
    ///
    /// Must return `None` while the game is still in progress.
    fn reward(&self) -> Option<f64>;
}

/// The two sides of a zero-sum game.
///
/// The integer codes are fixed: `Max` is `+1` and `Min` is `-1`. Rewards are always
/// expressed from `Max`'s point of view.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Player {
    /// The maximizing player, code `+1`.
    Max,
    /// The minimizing player, code `-1`.
    Min,
}

impl Player {
    /// Returns the canonical integer code of the player.
    pub const fn code(self) -> i8 {
        match self {
            Player::Max => 1,
            Player::Min => -1,
        }
    }

    /// Returns the code as a multiplier for rewards.
    pub const fn sign(self) -> f64 {
        match self {
            Player::Max => 1.0,
            Player::Min => -1.0,
        }
    }

    /// Returns the other player.
    pub const fn opponent(self) -> Player {
        match self {
            Player::Max => Player::Min,
            Player::Min => Player::Max,
        }
    }
}

impl TryFrom<i8> for Player {
    type Error = SearchError;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Player::Max),
            -1 => Ok(Player::Min),
            other => Err(SearchError::InvalidPlayer(other)),
        }
    }
}

impl From<Player> for i8 {
    fn from(player: Player) -> Self {
        player.code()
    }
}
