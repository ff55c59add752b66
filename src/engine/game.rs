//! Win probability for a single service game.
//!
//! Point scores run 0, 1, 2, 3 for love, 15, 30, 40; values above 3 are
//! advantage states. Every point is won by player one with the same
//! probability `p`, independently of the others.
//!
//! ```text
//! P(a, b) = 1                                    a > 3 and a - b >= 2
//! P(a, b) = 0                                    b > 3 and b - a >= 2
//! P(n, n) = p^2 / (1 - 2p(1 - p))                n >= 3  (deuce)
//! P(a, b) = p * P(a + 1, b) + (1 - p) * P(a, b + 1)
//! ```
//!
//! Deuce is the fixed point of "win two in a row before losing two in a row",
//! summed over every advantage/deuce cycle, so it is never recursed into.

use crate::engine::cache::StateCache;
use crate::engine::config::{EngineConfig, EvalStats};
use crate::engine::error::{ProbabilityError, Result};

/// Points a player needs before a two-point lead wins the game.
const GAME_POINTS: u32 = 4;

/// Probability of winning a game from deuce.
pub fn deuce_probability(p: f64) -> f64 {
    (p * p) / (1.0 - 2.0 * p * (1.0 - p))
}

/// Evaluates the game recurrence for one point-win probability.
#[derive(Debug, Clone)]
pub struct GameEvaluator {
    /// Probability player one wins any single point.
    point_win_prob: f64,
    max_depth: usize,
    use_cache: bool,
    cache: StateCache,
    stats: EvalStats,
}

impl GameEvaluator {
    /// Create an evaluator; `point_win_prob` must already be validated.
    pub fn new(point_win_prob: f64, config: &EngineConfig) -> Self {
        Self {
            point_win_prob,
            max_depth: config.max_depth,
            use_cache: config.use_cache,
            cache: StateCache::with_capacity(16),
            stats: EvalStats::new(),
        }
    }

    /// Probability player one wins the game from `score1`-`score2`.
    pub fn evaluate(&mut self, score1: u32, score2: u32) -> Result<f64> {
        self.recurse(score1, score2, 0)
    }

    /// Work done so far by this evaluator.
    pub fn stats(&self) -> EvalStats {
        EvalStats {
            cache_hits: self.cache.hits(),
            ..self.stats
        }
    }

    fn recurse(&mut self, score1: u32, score2: u32, depth: usize) -> Result<f64> {
        if depth > self.max_depth {
            return Err(ProbabilityError::DepthExceeded {
                limit: self.max_depth,
            });
        }

        // 4-4 is only reachable as deuce after both players had advantage.
        let (score1, score2) = if score1 == score2 && score1 >= GAME_POINTS - 1 {
            (GAME_POINTS - 1, GAME_POINTS - 1)
        } else {
            (score1, score2)
        };

        if score1 == GAME_POINTS - 1 && score2 == GAME_POINTS - 1 {
            self.stats.record_visit(depth);
            return Ok(deuce_probability(self.point_win_prob));
        }

        if score1 >= GAME_POINTS && score1 >= score2 + 2 {
            self.stats.record_visit(depth);
            return Ok(1.0);
        }

        if score2 >= GAME_POINTS && score2 >= score1 + 2 {
            self.stats.record_visit(depth);
            return Ok(0.0);
        }

        if self.use_cache {
            if let Some(value) = self.cache.get(score1, score2) {
                return Ok(value);
            }
        }
        self.stats.record_visit(depth);

        let p = self.point_win_prob;
        let value = p * self.recurse(score1 + 1, score2, depth + 1)?
            + (1.0 - p) * self.recurse(score1, score2 + 1, depth + 1)?;

        if self.use_cache {
            self.cache.insert(score1, score2, value);
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(score1: u32, score2: u32, p: f64) -> f64 {
        GameEvaluator::new(p, &EngineConfig::default())
            .evaluate(score1, score2)
            .unwrap()
    }

    #[test]
    fn test_deuce_closed_form() {
        for &p in &[0.1, 0.3, 0.44, 0.5, 0.59, 0.75, 0.9] {
            let expected = p * p / (1.0 - 2.0 * p * (1.0 - p));
            assert_eq!(game(3, 3, p), expected);
            assert_eq!(game(4, 4, p), game(3, 3, p));
        }
    }

    #[test]
    fn test_deep_ties_are_deuce() {
        assert_eq!(game(7, 7, 0.62), game(3, 3, 0.62));
    }

    #[test]
    fn test_absorbing_states_are_exact() {
        for &p in &[0.0, 0.2, 0.5, 1.0] {
            assert_eq!(game(4, 0, p), 1.0);
            assert_eq!(game(0, 4, p), 0.0);
            assert_eq!(game(5, 3, p), 1.0);
            assert_eq!(game(3, 5, p), 0.0);
        }
    }

    #[test]
    fn test_advantage_states() {
        let p = 0.6;
        let deuce = deuce_probability(p);
        assert!((game(4, 3, p) - (p + (1.0 - p) * deuce)).abs() < 1e-12);
        assert!((game(3, 4, p) - p * deuce).abs() < 1e-12);
    }

    #[test]
    fn test_sixty_percent_reference_value() {
        let prob = game(0, 0, 0.6);
        assert!((prob - 0.7357).abs() < 1e-4, "got {}", prob);
    }

    #[test]
    fn test_fair_points_at_tied_scores() {
        for n in 0..=4 {
            assert!((game(n, n, 0.5) - 0.5).abs() < 1e-12, "tie {}-{}", n, n);
        }
        assert_eq!(game(3, 3, 0.5), 0.5);
    }

    #[test]
    fn test_role_swap_symmetry() {
        let mut pairs: Vec<(u32, u32)> = Vec::new();
        for a in 0..=3 {
            for b in 0..=3 {
                pairs.push((a, b));
            }
        }
        pairs.push((4, 3));
        pairs.push((3, 4));

        for &p in &[0.05, 0.35, 0.5, 0.59, 0.81] {
            for &(a, b) in &pairs {
                let sum = game(a, b, p) + game(b, a, 1.0 - p);
                assert!((sum - 1.0).abs() < 1e-12, "{}-{} p={} sum={}", a, b, p, sum);
            }
        }
    }

    #[test]
    fn test_cache_does_not_change_values() {
        let cached = EngineConfig::default();
        let uncached = EngineConfig::default().with_cache(false);
        for a in 0..=3 {
            for b in 0..=3 {
                let x = GameEvaluator::new(0.57, &cached).evaluate(a, b).unwrap();
                let y = GameEvaluator::new(0.57, &uncached).evaluate(a, b).unwrap();
                assert_eq!(x, y);
            }
        }
    }

    #[test]
    fn test_cache_hits_recorded() {
        let mut evaluator = GameEvaluator::new(0.5, &EngineConfig::default());
        evaluator.evaluate(0, 0).unwrap();
        let stats = evaluator.stats();
        assert!(stats.cache_hits > 0);
        assert!(stats.states_evaluated > 0);
    }

    #[test]
    fn test_depth_limit() {
        let config = EngineConfig::default().with_max_depth(2);
        let result = GameEvaluator::new(0.5, &config).evaluate(0, 0);
        assert_eq!(result, Err(ProbabilityError::DepthExceeded { limit: 2 }));
    }
}
