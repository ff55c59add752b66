//! Win probability for a set.
//!
//! A set goes to the first player to six games with a two-game lead, or to
//! seven through a tiebreak at 6-6. Serve alternates every game; whoever
//! served first in the set serves first in the tiebreak.
//!
//! The probability of winning the next contest only takes three values for a
//! whole set (a service game, a return game, the tiebreak), so each is
//! evaluated at most once per [`SetEvaluator`].

use crate::engine::cache::StateCache;
use crate::engine::config::{EngineConfig, EvalStats};
use crate::engine::error::{ProbabilityError, Result};
use crate::engine::game::GameEvaluator;
use crate::engine::serve::{set_game_server, Player};
use crate::engine::tiebreak::TiebreakEvaluator;

/// Games needed to win a set outright.
const SET_GAMES: u32 = 6;

/// Check that `score1`-`score2` is a game score a set can be in.
pub fn check_set_score(score1: u32, score2: u32) -> Result<()> {
    let over_cap = score1 > SET_GAMES + 1 || score2 > SET_GAMES + 1;
    let both_seven = score1 == SET_GAMES + 1 && score2 == SET_GAMES + 1;
    if over_cap || both_seven {
        return Err(ProbabilityError::InvalidScore {
            contest: "set",
            score1,
            score2,
        });
    }
    Ok(())
}

/// Evaluates the set recurrence for fixed serve/return probabilities.
#[derive(Debug, Clone)]
pub struct SetEvaluator {
    service: f64,
    ret: f64,
    first_server: Player,
    config: EngineConfig,
    service_game: Option<f64>,
    return_game: Option<f64>,
    tiebreak: Option<f64>,
    cache: StateCache,
    stats: EvalStats,
}

impl SetEvaluator {
    /// Create an evaluator; probabilities and config must already be validated.
    pub fn new(service: f64, ret: f64, first_server: Player, config: &EngineConfig) -> Self {
        Self {
            service,
            ret,
            first_server,
            config: config.clone(),
            service_game: None,
            return_game: None,
            tiebreak: None,
            cache: StateCache::with_capacity(64),
            stats: EvalStats::new(),
        }
    }

    /// Probability player one wins the set from game score `score1`-`score2`.
    pub fn evaluate(&mut self, score1: u32, score2: u32) -> Result<f64> {
        check_set_score(score1, score2)?;
        self.recurse(score1, score2, 0)
    }

    /// Work done so far, including the nested game and tiebreak evaluations.
    pub fn stats(&self) -> EvalStats {
        EvalStats {
            cache_hits: self.stats.cache_hits + self.cache.hits(),
            ..self.stats
        }
    }

    /// Probability player one wins the contest played at `score1`-`score2`.
    fn next_contest_probability(&mut self, score1: u32, score2: u32) -> Result<f64> {
        if score1 == SET_GAMES && score2 == SET_GAMES {
            if let Some(value) = self.tiebreak {
                return Ok(value);
            }
            let mut evaluator = TiebreakEvaluator::new(
                self.service,
                self.ret,
                self.first_server,
                self.config.tiebreak_target,
                &self.config,
            );
            let value = evaluator.evaluate(0, 0)?;
            self.stats.merge(&evaluator.stats());
            self.tiebreak = Some(value);
            return Ok(value);
        }

        let (slot, p) = match set_game_server(score1, score2, self.first_server) {
            Player::One => (&mut self.service_game, self.service),
            Player::Two => (&mut self.return_game, self.ret),
        };
        if let Some(value) = *slot {
            return Ok(value);
        }
        let mut evaluator = GameEvaluator::new(p, &self.config);
        let value = evaluator.evaluate(0, 0)?;
        *slot = Some(value);
        self.stats.merge(&evaluator.stats());
        Ok(value)
    }

    fn recurse(&mut self, score1: u32, score2: u32, depth: usize) -> Result<f64> {
        if depth > self.config.max_depth {
            return Err(ProbabilityError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }

        if score1 == SET_GAMES && score1 >= score2 + 2 {
            self.stats.record_visit(depth);
            return Ok(1.0);
        }
        if score1 == SET_GAMES + 1 && score2 < SET_GAMES + 1 {
            self.stats.record_visit(depth);
            return Ok(1.0);
        }
        if score2 == SET_GAMES && score2 >= score1 + 2 {
            self.stats.record_visit(depth);
            return Ok(0.0);
        }
        if score2 == SET_GAMES + 1 && score1 < SET_GAMES + 1 {
            self.stats.record_visit(depth);
            return Ok(0.0);
        }

        if self.config.use_cache {
            if let Some(value) = self.cache.get(score1, score2) {
                return Ok(value);
            }
        }
        self.stats.record_visit(depth);

        let weight = self.next_contest_probability(score1, score2)?;
        let value = weight * self.recurse(score1 + 1, score2, depth + 1)?
            + (1.0 - weight) * self.recurse(score1, score2 + 1, depth + 1)?;

        if self.config.use_cache {
            self.cache.insert(score1, score2, value);
        }
        Ok(value)
    }
}
