//! Validated entry points into the three recurrences.
//!
//! The evaluators in [`game`](crate::engine::game),
//! [`tiebreak`](crate::engine::tiebreak) and [`set`](crate::engine::set)
//! trust their inputs. Everything here checks probabilities, targets and
//! scores first, then runs a fresh evaluator so no state is shared between
//! calls.

use tracing::{debug, warn};

use crate::engine::config::{EngineConfig, Evaluation, DEFAULT_TIEBREAK_TARGET};
use crate::engine::error::{check_probability, check_target, Result};
use crate::engine::game::GameEvaluator;
use crate::engine::serve::Player;
use crate::engine::set::{check_set_score, SetEvaluator};
use crate::engine::tiebreak::TiebreakEvaluator;

/// Computes player one's win probability for games, tiebreaks and sets.
///
/// # Example
/// ```
/// use tennis_win_prob::engine::{EngineConfig, WinProbabilityCalculator};
///
/// let calculator = WinProbabilityCalculator::new(EngineConfig::default()).unwrap();
/// let prob = calculator.game_probability(0, 0, 0.6).unwrap();
/// assert!((prob - 0.7357).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WinProbabilityCalculator {
    config: EngineConfig,
}

impl WinProbabilityCalculator {
    /// Create a calculator after validating its configuration.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Probability player one wins a game from point score `score1`-`score2`.
    pub fn game_probability(&self, score1: u32, score2: u32, point_win_prob: f64) -> Result<f64> {
        Ok(self
            .game_probability_with_stats(score1, score2, point_win_prob)?
            .probability)
    }

    /// Same as [`game_probability`](Self::game_probability), with evaluation stats.
    pub fn game_probability_with_stats(
        &self,
        score1: u32,
        score2: u32,
        point_win_prob: f64,
    ) -> Result<Evaluation> {
        let p = check_probability("point", point_win_prob)?;
        let mut evaluator = GameEvaluator::new(p, &self.config);
        let probability = evaluator.evaluate(score1, score2)?;
        let stats = evaluator.stats();
        debug!(score1, score2, p, probability, states = stats.states_evaluated, "game evaluated");
        Ok(Evaluation { probability, stats })
    }

    /// Probability player one wins a tiebreak to the configured target.
    pub fn tiebreak_probability(
        &self,
        tb_score1: u32,
        tb_score2: u32,
        service_prob: f64,
        return_prob: f64,
        serving_first: bool,
    ) -> Result<f64> {
        self.tiebreak_probability_to(
            tb_score1,
            tb_score2,
            service_prob,
            return_prob,
            serving_first,
            self.config.tiebreak_target,
        )
    }

    /// Probability player one wins a tiebreak played to `target` points.
    pub fn tiebreak_probability_to(
        &self,
        tb_score1: u32,
        tb_score2: u32,
        service_prob: f64,
        return_prob: f64,
        serving_first: bool,
        target: u32,
    ) -> Result<f64> {
        Ok(self
            .tiebreak_probability_with_stats(
                tb_score1,
                tb_score2,
                service_prob,
                return_prob,
                serving_first,
                target,
            )?
            .probability)
    }

    /// Tiebreak probability to `target` points, with evaluation stats.
    pub fn tiebreak_probability_with_stats(
        &self,
        tb_score1: u32,
        tb_score2: u32,
        service_prob: f64,
        return_prob: f64,
        serving_first: bool,
        target: u32,
    ) -> Result<Evaluation> {
        let service = check_probability("service", service_prob)?;
        let ret = check_probability("return", return_prob)?;
        let target = check_target(target)?;

        let mut evaluator = TiebreakEvaluator::new(
            service,
            ret,
            Player::from_serving_first(serving_first),
            target,
            &self.config,
        );
        let probability = evaluator.evaluate(tb_score1, tb_score2)?;
        let stats = evaluator.stats();

        if stats.deep_tie_cutoffs > 0 && target != DEFAULT_TIEBREAK_TARGET {
            warn!(
                target,
                cutoffs = stats.deep_tie_cutoffs,
                "approximate deep-tie guard used; result is not exact"
            );
        }
        debug!(
            tb_score1,
            tb_score2,
            target,
            probability,
            states = stats.states_evaluated,
            "tiebreak evaluated"
        );
        Ok(Evaluation { probability, stats })
    }

    /// Probability player one wins a set from game score `score1`-`score2`.
    pub fn set_probability(
        &self,
        score1: u32,
        score2: u32,
        service_prob: f64,
        return_prob: f64,
        serving_first: bool,
    ) -> Result<f64> {
        Ok(self
            .set_probability_with_stats(score1, score2, service_prob, return_prob, serving_first)?
            .probability)
    }

    /// Same as [`set_probability`](Self::set_probability), with evaluation stats.
    pub fn set_probability_with_stats(
        &self,
        score1: u32,
        score2: u32,
        service_prob: f64,
        return_prob: f64,
        serving_first: bool,
    ) -> Result<Evaluation> {
        let service = check_probability("service", service_prob)?;
        let ret = check_probability("return", return_prob)?;
        check_set_score(score1, score2)?;

        let mut evaluator = SetEvaluator::new(
            service,
            ret,
            Player::from_serving_first(serving_first),
            &self.config,
        );
        let probability = evaluator.evaluate(score1, score2)?;
        let stats = evaluator.stats();
        debug!(
            score1,
            score2,
            probability,
            states = stats.states_evaluated,
            cache_hits = stats.cache_hits,
            "set evaluated"
        );
        Ok(Evaluation { probability, stats })
    }
}

/// Probability player one wins a game, with the default configuration.
pub fn game_probability(score1: u32, score2: u32, point_win_prob: f64) -> Result<f64> {
    WinProbabilityCalculator::default().game_probability(score1, score2, point_win_prob)
}

/// Probability player one wins a standard 7-point tiebreak.
pub fn tiebreak_probability(
    tb_score1: u32,
    tb_score2: u32,
    service_prob: f64,
    return_prob: f64,
    serving_first: bool,
) -> Result<f64> {
    tiebreak_probability_to(
        tb_score1,
        tb_score2,
        service_prob,
        return_prob,
        serving_first,
        DEFAULT_TIEBREAK_TARGET,
    )
}

/// Probability player one wins a tiebreak played to `target` points.
pub fn tiebreak_probability_to(
    tb_score1: u32,
    tb_score2: u32,
    service_prob: f64,
    return_prob: f64,
    serving_first: bool,
    target: u32,
) -> Result<f64> {
    WinProbabilityCalculator::default().tiebreak_probability_to(
        tb_score1,
        tb_score2,
        service_prob,
        return_prob,
        serving_first,
        target,
    )
}

/// Probability player one wins a set, with the default configuration.
pub fn set_probability(
    score1: u32,
    score2: u32,
    service_prob: f64,
    return_prob: f64,
    serving_first: bool,
) -> Result<f64> {
    WinProbabilityCalculator::default().set_probability(
        score1,
        score2,
        service_prob,
        return_prob,
        serving_first,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::ProbabilityError;

    #[test]
    fn test_rejects_out_of_range_probabilities() {
        assert!(matches!(
            game_probability(0, 0, 1.2),
            Err(ProbabilityError::InvalidProbability { name: "point", .. })
        ));
        assert!(matches!(
            tiebreak_probability(0, 0, 0.6, -0.1, true),
            Err(ProbabilityError::InvalidProbability { name: "return", .. })
        ));
        assert!(matches!(
            set_probability(0, 0, f64::NAN, 0.4, true),
            Err(ProbabilityError::InvalidProbability { name: "service", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_target() {
        assert_eq!(
            tiebreak_probability_to(0, 0, 0.6, 0.4, true, 0),
            Err(ProbabilityError::InvalidTarget(0))
        );
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(WinProbabilityCalculator::new(EngineConfig::default().with_max_depth(0)).is_err());
    }

    #[test]
    fn test_configured_target_used_by_default() {
        let ten = WinProbabilityCalculator::new(EngineConfig::default().with_tiebreak_target(10))
            .unwrap();
        assert!(ten.tiebreak_probability(8, 6, 0.6, 0.4, true).unwrap() < 1.0);
        assert_eq!(tiebreak_probability(8, 6, 0.6, 0.4, true).unwrap(), 1.0);
    }

    #[test]
    fn test_stats_reported() {
        let calculator = WinProbabilityCalculator::default();
        let eval = calculator
            .set_probability_with_stats(0, 0, 0.59, 0.44, true)
            .unwrap();
        assert!(eval.stats.states_evaluated > 0);
        assert!(eval.stats.cache_hits > 0);
        assert!(eval.probability > 0.5);
    }

    #[test]
    fn test_free_functions_match_calculator() {
        let calculator = WinProbabilityCalculator::default();
        assert_eq!(
            game_probability(1, 2, 0.55).unwrap(),
            calculator.game_probability(1, 2, 0.55).unwrap()
        );
        assert_eq!(
            set_probability(3, 4, 0.6, 0.35, false).unwrap(),
            calculator.set_probability(3, 4, 0.6, 0.35, false).unwrap()
        );
    }
}
