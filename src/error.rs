use thiserror::Error;

/// Invalid engine configuration, reported when an engine is built and never during a search.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("cannot have both a time limit and an iteration limit")]
    BothLimits,

    #[error("must have either a time limit or an iteration limit")]
    MissingLimit,

    #[error("iteration limit must be at least 1")]
    ZeroIterations,

    #[error("time limit must be a positive number of milliseconds")]
    ZeroTimeLimit,

    #[error("search depth must be at least 1")]
    ZeroDepth,

    #[error("infinity bound must be positive and finite, got {0}")]
    InvalidInfinity(f64),

    #[error("exploration constant must be finite and non-negative, got {0}")]
    InvalidExploration(f64),
}

/// A failure that aborts a search call.
///
/// Every variant is fatal: it points at a broken [`State`](crate::State) implementation,
/// a misuse of the engine, or a bug in the engine itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("non-terminal state has no legal actions")]
    NoLegalActions,

    #[error("reward requested for a non-terminal state")]
    NotTerminal,

    #[error("player code must be 1 or -1, got {0}")]
    InvalidPlayer(i8),

    #[error("cannot search for a move from a terminal state")]
    TerminalState,

    #[error("BUG: {0}")]
    Invariant(&'static str),
}

/// Convenience Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
