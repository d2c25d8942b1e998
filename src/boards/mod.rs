//! Contains ready-made implementations of the `State` trait.

/// Naughts and crosses on an N × N grid.
pub mod tic_tac_toe;
