use crate::state::{Player, State};

/// A move in naughts and crosses: `player` marks the cell at row `x`, column `y`.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct Cell {
    pub player: Player,
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(player: Player, x: usize, y: usize) -> Self {
        Self { player, x, y }
    }
}

/// An implementation of the `State` trait for naughts and crosses on a `size` × `size` grid.
///
/// `Max` moves first. Completing a row, a column or a diagonal wins; the reward is `1.0`
/// when `Max` wins, `-1.0` when `Min` wins and `0.0` for a full board without a winner.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct TicTacToe {
    size: usize,
    field: Vec<Option<Player>>,
    current_player: Player,
    winner: Option<Player>,
}

impl TicTacToe {
    /// Creates an empty board.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "board size must be positive");
        Self {
            size,
            field: vec![None; size * size],
            current_player: Player::Max,
            winner: None,
        }
    }

    /// Builds a position by playing `moves` (row, column) alternately, starting with `Max`.
    pub fn from_moves(size: usize, moves: &[(usize, usize)]) -> Self {
        moves.iter().fold(Self::new(size), |board, &(x, y)| {
            let cell = Cell::new(board.current_player, x, y);
            board.apply(&cell)
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the mark at row `x`, column `y`, if any.
    pub fn get(&self, x: usize, y: usize) -> Option<Player> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.field[x * self.size + y]
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    fn is_full(&self) -> bool {
        self.field.iter().all(|cell| cell.is_some())
    }

    fn line_owner(&self, mut cells: impl Iterator<Item = (usize, usize)>) -> Option<Player> {
        let (x, y) = cells.next()?;
        let owner = self.get(x, y)?;
        cells.all(|(x, y)| self.get(x, y) == Some(owner)).then_some(owner)
    }

    fn find_winner(&self) -> Option<Player> {
        let n = self.size;
        (0..n)
            .find_map(|x| self.line_owner((0..n).map(move |y| (x, y))))
            .or_else(|| (0..n).find_map(|y| self.line_owner((0..n).map(move |x| (x, y)))))
            .or_else(|| self.line_owner((0..n).map(|i| (i, i))))
            .or_else(|| self.line_owner((0..n).map(|i| (i, n - 1 - i))))
    }
}

impl Default for TicTacToe {
    /// Creates the classic 3 × 3 board with `Max` to move.
    fn default() -> Self {
        TicTacToe::new(3)
    }
}

impl State for TicTacToe {
    type Action = Cell;

    fn current_player(&self) -> Player {
        self.current_player
    }

    fn legal_actions(&self) -> Vec<Self::Action> {
        if self.is_terminal() {
            return Vec::new();
        }

        self.field
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| Cell::new(self.current_player, i / self.size, i % self.size))
            .collect()
    }

    fn apply(&self, action: &Self::Action) -> Self {
        debug_assert!(
            self.get(action.x, action.y).is_none(),
            "cell ({}, {}) is already taken",
            action.x,
            action.y
        );
        let mut next = self.clone();
        next.field[action.x * self.size + action.y] = Some(action.player);
        next.current_player = self.current_player.opponent();
        next.winner = next.find_winner();
        next
    }

    fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.is_full()
    }

    fn reward(&self) -> Option<f64> {
        match self.winner {
            Some(player) => Some(player.sign()),
            None if self.is_full() => Some(0.0),
            None => None,
        }
    }
}
