//! Configuration options for the probability engine.
//!
//! This module provides the configuration struct that controls how the
//! recurrences are evaluated, including the tiebreak target and how
//! deep symmetric tiebreak ties are resolved.

use serde::{Deserialize, Serialize};

use crate::engine::error::{ProbabilityError, Result};

/// Default number of points needed to win a tiebreak.
pub const DEFAULT_TIEBREAK_TARGET: u32 = 7;

/// Default tied-score sum beyond which the approximate guard returns 0.5.
pub const DEFAULT_DEEP_TIE_SUM: u32 = 30;

/// How a tiebreak that stays level for a long time is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeepTiePolicy {
    /// Return 0.5 once the score is tied and the point sum exceeds
    /// `deep_tie_sum`.
    ///
    /// This is an approximation with no stated error bound: 0.5 is only
    /// exact when the two players are evenly matched over a serve pair.
    Approximate,

    /// Resolve any tie at or beyond `target - 1` points with the closed
    /// form `ps * pr / (ps * pr + (1 - ps) * (1 - pr))`.
    Exact,
}

/// Configuration for the probability engine.
///
/// # Example
/// ```
/// use tennis_win_prob::engine::{DeepTiePolicy, EngineConfig};
///
/// let config = EngineConfig::default();
/// assert_eq!(config.tiebreak_target, 7);
/// assert_eq!(config.deep_tie_policy, DeepTiePolicy::Approximate);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Points needed to win a tiebreak (with a margin of two).
    ///
    /// Used by set evaluation and by tiebreak calls that do not pass an
    /// explicit target. 10-point match tiebreaks set this to 10.
    pub tiebreak_target: u32,

    /// How deep tiebreak ties are resolved.
    pub deep_tie_policy: DeepTiePolicy,

    /// Tied-score point sum above which `DeepTiePolicy::Approximate`
    /// stops recursing. The default of 30 cuts off at 16-16.
    pub deep_tie_sum: u32,

    /// Maximum recursion depth before evaluation fails with
    /// `ProbabilityError::DepthExceeded`.
    pub max_depth: usize,

    /// Memoise score states within a single top-level call.
    ///
    /// Disabling this gives the plain exponential recomputation, which is
    /// only useful for benchmarking.
    pub use_cache: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tiebreak_target: DEFAULT_TIEBREAK_TARGET,
            deep_tie_policy: DeepTiePolicy::Approximate,
            deep_tie_sum: DEFAULT_DEEP_TIE_SUM,
            max_depth: 1024,
            use_cache: true,
        }
    }
}

impl EngineConfig {
    /// Create a new EngineConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration that never approximates deep tiebreak ties.
    pub fn exact() -> Self {
        Self {
            deep_tie_policy: DeepTiePolicy::Exact,
            ..Default::default()
        }
    }

    /// Builder method: set the tiebreak target.
    pub fn with_tiebreak_target(mut self, target: u32) -> Self {
        self.tiebreak_target = target;
        self
    }

    /// Builder method: set the deep-tie policy.
    pub fn with_deep_tie_policy(mut self, policy: DeepTiePolicy) -> Self {
        self.deep_tie_policy = policy;
        self
    }

    /// Builder method: set the approximate guard's point-sum threshold.
    pub fn with_deep_tie_sum(mut self, sum: u32) -> Self {
        self.deep_tie_sum = sum;
        self
    }

    /// Builder method: set the recursion depth limit.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Builder method: enable or disable memoisation.
    pub fn with_cache(mut self, enable: bool) -> Self {
        self.use_cache = enable;
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<()> {
        if self.tiebreak_target < 1 {
            return Err(ProbabilityError::InvalidTarget(self.tiebreak_target));
        }

        if self.max_depth == 0 {
            return Err(ProbabilityError::InvalidConfig(
                "max_depth must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Statistics gathered during a single top-level evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalStats {
    /// Score states whose value was computed (cache misses and absorbing states).
    pub states_evaluated: u64,

    /// Score states answered from the memo table.
    pub cache_hits: u64,

    /// Deepest recursion level reached.
    pub max_depth_reached: usize,

    /// Times the approximate deep-tie guard returned 0.5.
    pub deep_tie_cutoffs: u64,
}

impl EvalStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a state was visited at `depth`.
    pub fn record_visit(&mut self, depth: usize) {
        self.states_evaluated += 1;
        if depth > self.max_depth_reached {
            self.max_depth_reached = depth;
        }
    }

    /// Fold the stats of a nested evaluation into these.
    pub fn merge(&mut self, other: &EvalStats) {
        self.states_evaluated += other.states_evaluated;
        self.cache_hits += other.cache_hits;
        self.max_depth_reached = self.max_depth_reached.max(other.max_depth_reached);
        self.deep_tie_cutoffs += other.deep_tie_cutoffs;
    }
}

/// A probability together with the stats of the evaluation that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Probability that player one wins the contest.
    pub probability: f64,
    /// How much work the evaluation took.
    pub stats: EvalStats,
}
