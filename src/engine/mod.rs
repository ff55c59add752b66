//! Recursive win-probability engine.
//!
//! This module computes the probability that player one wins a game, a
//! tiebreak or a set from any score, given per-point win probabilities on
//! serve and on return.
//!
//! # Overview
//!
//! Each contest is a finite Markov chain over score pairs:
//! 1. A **game** moves on point score with one point-win probability
//! 2. A **tiebreak** moves on point score, the probability switching with the
//!    server of each point
//! 3. A **set** moves on game score, each step weighted by the probability of
//!    winning the next game or tiebreak
//!
//! The recurrences end at absorbing win/loss states. Deuce in a game is
//! solved in closed form, and long tiebreak ties are cut off according to
//! [`DeepTiePolicy`].
//!
//! # Usage
//!
//! ```
//! use tennis_win_prob::engine::{game_probability, set_probability, tiebreak_probability};
//!
//! // 60% of points won -> about 73.6% of games won.
//! let game = game_probability(0, 0, 0.6).unwrap();
//! assert!((game - 0.7357).abs() < 1e-4);
//!
//! let tiebreak = tiebreak_probability(0, 0, 0.65, 0.35, true).unwrap();
//! assert!(tiebreak > 0.0 && tiebreak < 1.0);
//!
//! assert_eq!(set_probability(6, 0, 0.3, 0.3, true).unwrap(), 1.0);
//! ```
//!
//! # Theory
//!
//! From deuce a player must win two points in a row before losing two in a
//! row; summing the geometric series over all deuce/advantage cycles gives
//! ```text
//! P(deuce) = p^2 / (1 - 2p(1 - p))
//! ```
//! The same argument holds for a tiebreak tie past `target - 1`, where the
//! two decisive points are served one by each player:
//! ```text
//! P(tie) = ps * pr / (ps * pr + (1 - ps)(1 - pr))
//! ```

pub mod cache;
pub mod calculator;
pub mod config;
pub mod error;
pub mod game;
pub mod serve;
pub mod set;
pub mod tiebreak;

// Re-export main types for convenient access
pub use cache::StateCache;
pub use calculator::{
    game_probability, set_probability, tiebreak_probability, tiebreak_probability_to,
    WinProbabilityCalculator,
};
pub use config::{
    DeepTiePolicy, EngineConfig, EvalStats, Evaluation, DEFAULT_DEEP_TIE_SUM,
    DEFAULT_TIEBREAK_TARGET,
};
pub use error::{ProbabilityError, Result};
pub use game::{deuce_probability, GameEvaluator};
pub use serve::{set_game_server, tiebreak_server, Player};
pub use set::SetEvaluator;
pub use tiebreak::{level_tie_probability, TiebreakEvaluator};
