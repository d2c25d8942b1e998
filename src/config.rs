//! Engine configuration.
//!
//! Both configs can be deserialized (every field has a default) and are validated
//! once, when an engine is built from them.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default UCT exploration constant, `1 / sqrt(2)`.
pub const DEFAULT_EXPLORATION_CONSTANT: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Default alpha-beta search depth.
pub const DEFAULT_DEPTH: u32 = 3;

/// Default alpha-beta "infinity". Must exceed any reward a game can produce.
pub const DEFAULT_INFINITY: f64 = 65535.0;

/// The resource budget of one UCT search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchLimit {
    /// Keep running rounds until this much wall-clock time has passed.
    /// The check happens between rounds, so a search may overshoot by one round.
    Time(Duration),
    /// Run exactly this many rounds.
    Iterations(u32),
}

/// UCT engine parameters.
///
/// Exactly one of `time_limit_ms` and `iteration_limit` must be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UctConfig {
    /// Wall-clock budget per search, in milliseconds.
    pub time_limit_ms: Option<u64>,

    /// Number of rounds per search.
    pub iteration_limit: Option<u32>,

    /// Weight of the exploration term in the UCT score.
    pub exploration_constant: f64,
}

impl Default for UctConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: None,
            iteration_limit: None,
            exploration_constant: DEFAULT_EXPLORATION_CONSTANT,
        }
    }
}

impl UctConfig {
    /// Config with an iteration budget and the default exploration constant.
    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            iteration_limit: Some(iterations),
            ..Default::default()
        }
    }

    /// Config with a time budget and the default exploration constant.
    pub fn with_time_limit_ms(time_limit_ms: u64) -> Self {
        Self {
            time_limit_ms: Some(time_limit_ms),
            ..Default::default()
        }
    }

    /// Checks the config and returns the budget it describes.
    pub fn validate(&self) -> Result<SearchLimit, ConfigError> {
        let c = self.exploration_constant;
        if !c.is_finite() || c < 0.0 {
            return Err(ConfigError::InvalidExploration(c));
        }

        match (self.time_limit_ms, self.iteration_limit) {
            (Some(_), Some(_)) => Err(ConfigError::BothLimits),
            (None, None) => Err(ConfigError::MissingLimit),
            (Some(0), None) => Err(ConfigError::ZeroTimeLimit),
            (Some(ms), None) => Ok(SearchLimit::Time(Duration::from_millis(ms))),
            (None, Some(0)) => Err(ConfigError::ZeroIterations),
            (None, Some(n)) => Ok(SearchLimit::Iterations(n)),
        }
    }
}

/// Alpha-beta engine parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaBetaConfig {
    /// Number of plies searched below the root, at least 1.
    pub depth: u32,

    /// Bound used to initialize alpha and beta.
    pub infinity: f64,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            infinity: DEFAULT_INFINITY,
        }
    }
}

impl AlphaBetaConfig {
    /// Config searching `depth` plies with the default infinity bound.
    pub fn with_depth(depth: u32) -> Self {
        Self {
            depth,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if !self.infinity.is_finite() || self.infinity <= 0.0 {
            return Err(ConfigError::InvalidInfinity(self.infinity));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_budget() {
        let config = UctConfig::with_iterations(500);
        assert_eq!(config.validate(), Ok(SearchLimit::Iterations(500)));
        assert_eq!(config.exploration_constant, DEFAULT_EXPLORATION_CONSTANT);
    }

    #[test]
    fn time_budget() {
        let config = UctConfig::with_time_limit_ms(250);
        assert_eq!(
            config.validate(),
            Ok(SearchLimit::Time(Duration::from_millis(250)))
        );
    }

    #[test]
    fn both_or_neither_budget_is_rejected() {
        let both = UctConfig {
            time_limit_ms: Some(100),
            iteration_limit: Some(100),
            ..Default::default()
        };
        assert_eq!(both.validate(), Err(ConfigError::BothLimits));
        assert_eq!(
            UctConfig::default().validate(),
            Err(ConfigError::MissingLimit)
        );
    }

    #[test]
    fn zero_budgets_are_rejected() {
        assert_eq!(
            UctConfig::with_iterations(0).validate(),
            Err(ConfigError::ZeroIterations)
        );
        assert_eq!(
            UctConfig::with_time_limit_ms(0).validate(),
            Err(ConfigError::ZeroTimeLimit)
        );
    }

    #[test]
    fn bad_exploration_constant() {
        let mut config = UctConfig::with_iterations(10);
        config.exploration_constant = -0.5;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidExploration(-0.5))
        );

        config.exploration_constant = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidExploration(_))
        ));

        // pure exploitation is allowed
        config.exploration_constant = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn alpha_beta_defaults() {
        let config = AlphaBetaConfig::default();
        assert_eq!(config.depth, 3);
        assert_eq!(config.infinity, 65535.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn alpha_beta_validation() {
        assert_eq!(
            AlphaBetaConfig::with_depth(0).validate(),
            Err(ConfigError::ZeroDepth)
        );
        let config = AlphaBetaConfig {
            depth: 2,
            infinity: f64::INFINITY,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidInfinity(_))
        ));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: UctConfig = serde_json::from_str(r#"{ "iteration_limit": 64 }"#).unwrap();
        assert_eq!(config.iteration_limit, Some(64));
        assert_eq!(config.time_limit_ms, None);
        assert_eq!(config.exploration_constant, DEFAULT_EXPLORATION_CONSTANT);

        let config: AlphaBetaConfig = serde_json::from_str(r#"{ "depth": 9 }"#).unwrap();
        assert_eq!(config.depth, 9);
        assert_eq!(config.infinity, DEFAULT_INFINITY);
    }
}
