//! Errors raised at the boundary of the probability engine.

use thiserror::Error;

/// Errors that can occur when evaluating a win probability.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProbabilityError {
    /// A point-win probability is NaN or outside [0, 1].
    #[error("{name} probability {value} is out of range [0, 1]")]
    InvalidProbability {
        /// Which argument was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Tiebreak target below 1.
    #[error("tiebreak target {0} must be at least 1")]
    InvalidTarget(u32),

    /// A score pair that cannot occur in the contest being evaluated.
    #[error("invalid {contest} score {score1}-{score2}")]
    InvalidScore {
        /// "game", "tiebreak" or "set".
        contest: &'static str,
        /// Player one's score.
        score1: u32,
        /// Player two's score.
        score2: u32,
    },

    /// The recursion went deeper than the configured limit.
    #[error("recursion depth exceeded limit of {limit}")]
    DepthExceeded {
        /// The configured `max_depth`.
        limit: usize,
    },

    /// The engine configuration itself is inconsistent.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, ProbabilityError>;

/// Check that `value` is a usable point-win probability.
pub fn check_probability(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ProbabilityError::InvalidProbability { name, value })
    }
}

/// Check that a tiebreak target is playable.
pub fn check_target(target: u32) -> Result<u32> {
    if target >= 1 {
        Ok(target)
    } else {
        Err(ProbabilityError::InvalidTarget(target))
    }
}
