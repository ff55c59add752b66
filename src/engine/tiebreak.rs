//! Win probability for a tiebreak.
//!
//! A tiebreak is won by the first player to `target` points with a lead of
//! two. Player one wins a point with `service` probability when serving it
//! and with `ret` probability when receiving; the server of each point
//! follows [`tiebreak_server`].
//!
//! A tie can repeat indefinitely, so the recursion needs a stopping rule at
//! level scores. See [`DeepTiePolicy`] for the two available ones.

use tracing::trace;

use crate::engine::cache::StateCache;
use crate::engine::config::{DeepTiePolicy, EngineConfig, EvalStats};
use crate::engine::error::{ProbabilityError, Result};
use crate::engine::serve::{tiebreak_server, Player};

/// Probability of winning from a tie once any two-point lead wins.
///
/// From such a tie the next two points are served one by each player, so
/// player one wins both with `service * ret`, loses both with
/// `(1 - service) * (1 - ret)`, and is otherwise back at a tie. When neither
/// outcome can ever happen the tie never resolves and 0.5 is returned.
pub fn level_tie_probability(service: f64, ret: f64) -> f64 {
    let win_both = service * ret;
    let lose_both = (1.0 - service) * (1.0 - ret);
    let decisive = win_both + lose_both;
    if decisive > 0.0 {
        win_both / decisive
    } else {
        0.5
    }
}

/// Evaluates the tiebreak recurrence for fixed serve/return probabilities.
#[derive(Debug, Clone)]
pub struct TiebreakEvaluator {
    service: f64,
    ret: f64,
    first_server: Player,
    target: u32,
    policy: DeepTiePolicy,
    deep_tie_sum: u32,
    max_depth: usize,
    use_cache: bool,
    cache: StateCache,
    stats: EvalStats,
}

impl TiebreakEvaluator {
    /// Create an evaluator; probabilities and target must already be validated.
    pub fn new(
        service: f64,
        ret: f64,
        first_server: Player,
        target: u32,
        config: &EngineConfig,
    ) -> Self {
        Self {
            service,
            ret,
            first_server,
            target,
            policy: config.deep_tie_policy,
            deep_tie_sum: config.deep_tie_sum,
            max_depth: config.max_depth,
            use_cache: config.use_cache,
            cache: StateCache::with_capacity(64),
            stats: EvalStats::new(),
        }
    }

    /// Points needed to win this tiebreak.
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Probability player one wins the tiebreak from `tb_score1`-`tb_score2`.
    pub fn evaluate(&mut self, tb_score1: u32, tb_score2: u32) -> Result<f64> {
        self.recurse(tb_score1, tb_score2, 0)
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

        if score1 >= self.target && score1 >= score2 + 2 {
            self.stats.record_visit(depth);
            return Ok(1.0);
        }

        if score2 >= self.target && score2 >= score1 + 2 {
            self.stats.record_visit(depth);
            return Ok(0.0);
        }

        if score1 == score2 {
            match self.policy {
                DeepTiePolicy::Approximate if score1 + score2 > self.deep_tie_sum => {
                    trace!(score1, score2, "deep tie cut off at 0.5");
                    self.stats.record_visit(depth);
                    self.stats.deep_tie_cutoffs += 1;
                    return Ok(0.5);
                }
                DeepTiePolicy::Exact if score1 + 1 >= self.target => {
                    self.stats.record_visit(depth);
                    return Ok(level_tie_probability(self.service, self.ret));
                }
                _ => {}
            }
        }

        if self.use_cache {
            if let Some(value) = self.cache.get(score1, score2) {
                return Ok(value);
            }
        }
        self.stats.record_visit(depth);

        let p = match tiebreak_server(score1, score2, self.first_server) {
            Player::One => self.service,
            Player::Two => self.ret,
        };
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

    fn tiebreak(
        score1: u32,
        score2: u32,
        service: f64,
        ret: f64,
        serving_first: bool,
        target: u32,
        config: &EngineConfig,
    ) -> f64 {
        TiebreakEvaluator::new(
            service,
            ret,
            Player::from_serving_first(serving_first),
            target,
            config,
        )
        .evaluate(score1, score2)
        .unwrap()
    }

    fn default_tb(score1: u32, score2: u32, service: f64, ret: f64, first: bool) -> f64 {
        tiebreak(score1, score2, service, ret, first, 7, &EngineConfig::default())
    }

    #[test]
    fn test_absorbing_states() {
        for target in 1..=7 {
            let config = EngineConfig::default();
            assert_eq!(tiebreak(7, 0, 0.6, 0.4, true, target, &config), 1.0);
            assert_eq!(tiebreak(0, 7, 0.6, 0.4, true, target, &config), 0.0);
        }
        assert_eq!(default_tb(9, 7, 0.2, 0.1, false), 1.0);
        assert_eq!(default_tb(7, 9, 0.9, 0.9, true), 0.0);
    }

    #[test]
    fn test_open_tiebreak_is_strictly_between_bounds() {
        let first = default_tb(0, 0, 0.65, 0.35, true);
        assert!(first > 0.0 && first < 1.0);
        let again = default_tb(0, 0, 0.65, 0.35, true);
        assert_eq!(first.to_bits(), again.to_bits());
    }

    #[test]
    fn test_equal_players_are_even() {
        // Serve 0.65 vs return 0.35 means both hold serve equally often.
        let prob = default_tb(0, 0, 0.65, 0.35, true);
        assert!((prob - 0.5).abs() < 1e-9, "got {}", prob);
    }

    #[test]
    fn test_player_perspective_symmetry() {
        let cases = [(0, 0), (3, 1), (2, 5), (6, 6), (5, 6), (10, 9)];
        for &(a, b) in &cases {
            for &first in &[true, false] {
                let (ps, pr) = (0.62, 0.41);
                let p1 = default_tb(a, b, ps, pr, first);
                // Player two's serve/return probabilities are the complements
                // of player one's return/serve probabilities.
                let p2 = default_tb(b, a, 1.0 - pr, 1.0 - ps, !first);
                assert!((p1 + p2 - 1.0).abs() < 1e-9, "{}-{} first={}", a, b, first);
            }
        }
    }

    #[test]
    fn test_serve_order_does_not_change_opening_value() {
        // With the 1-2-2 rotation both players serve equally often over
        // every stretch that can decide the tiebreak.
        let serve_first = default_tb(0, 0, 0.7, 0.4, true);
        let return_first = default_tb(0, 0, 0.7, 0.4, false);
        assert!(serve_first > 0.5);
        assert!((serve_first - return_first).abs() < 1e-9);
    }

    #[test]
    fn test_approximate_guard_returns_half() {
        let config = EngineConfig::default();
        assert_eq!(tiebreak(16, 16, 0.9, 0.8, true, 7, &config), 0.5);
        // 15-15 is not beyond the threshold and still recurses.
        assert!(tiebreak(15, 15, 0.9, 0.8, true, 7, &config) > 0.5);
    }

    #[test]
    fn test_exact_policy_uses_closed_form_at_ties() {
        let config = EngineConfig::exact();
        let expected = level_tie_probability(0.9, 0.8);
        assert!((tiebreak(6, 6, 0.9, 0.8, true, 7, &config) - expected).abs() < 1e-12);
        assert!((tiebreak(16, 16, 0.9, 0.8, true, 7, &config) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_exact_and_approximate_agree_for_balanced_pairs() {
        // When service + return = 1 the tie value is exactly 0.5, so the
        // approximation is exact too.
        let approx = default_tb(0, 0, 0.6, 0.4, true);
        let exact = tiebreak(0, 0, 0.6, 0.4, true, 7, &EngineConfig::exact());
        assert!((approx - exact).abs() < 1e-12);
    }

    #[test]
    fn test_exact_matches_deep_approximation_closely() {
        // Reaching 16-16 from 0-0 is rare enough that the cutoff barely moves
        // the opening value.
        let approx = default_tb(0, 0, 0.7, 0.45, true);
        let exact = tiebreak(0, 0, 0.7, 0.45, true, 7, &EngineConfig::exact());
        assert!((approx - exact).abs() < 1e-3);
    }

    #[test]
    fn test_level_tie_degenerate() {
        assert_eq!(level_tie_probability(1.0, 0.0), 0.5);
        assert_eq!(level_tie_probability(0.0, 1.0), 0.5);
        assert_eq!(level_tie_probability(1.0, 1.0), 1.0);
        assert_eq!(level_tie_probability(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_ten_point_tiebreak() {
        let config = EngineConfig::default();
        let seven = tiebreak(0, 0, 0.7, 0.45, true, 7, &config);
        let ten = tiebreak(0, 0, 0.7, 0.45, true, 10, &config);
        // The stronger player benefits from a longer tiebreak.
        assert!(ten > seven);
        assert_eq!(tiebreak(10, 8, 0.7, 0.45, true, 10, &config), 1.0);
        assert!(tiebreak(7, 0, 0.7, 0.45, true, 10, &config) < 1.0);
    }

    #[test]
    fn test_cutoffs_counted() {
        let mut evaluator =
            TiebreakEvaluator::new(0.9, 0.8, Player::One, 7, &EngineConfig::default());
        evaluator.evaluate(0, 0).unwrap();
        assert!(evaluator.stats().deep_tie_cutoffs > 0);
    }

    #[test]
    fn test_huge_target_hits_depth_limit() {
        let config = EngineConfig::exact().with_max_depth(100);
        let result =
            TiebreakEvaluator::new(0.6, 0.4, Player::One, 1_000_000, &config).evaluate(0, 0);
        assert_eq!(result, Err(ProbabilityError::DepthExceeded { limit: 100 }));
    }
}
