//! # Tennis Win Probabilities
//!
//! Markov-chain win probabilities for tennis: the chance that player one
//! wins a game, a tiebreak or a set from any score, given how often they win
//! points on serve and on return.
//!
//! ## Features
//!
//! - **Exact recurrences**: game, tiebreak and set, with deuce solved in closed form
//! - **Serve rotation**: tiebreak 1-2-2 rotation and alternating set games
//! - **Memoised evaluation**: each score state computed once per call
//! - **Input validation**: out-of-range probabilities and targets are errors
//! - **Reports**: score-grid tables as delimited text or JSON
//! - **Monte Carlo**: point-by-point play-outs to cross-check the engine
//!
//! ## Quick Start
//!
//! ```
//! use tennis_win_prob::engine::{game_probability, set_probability};
//!
//! // Player one wins 59% of service points and 44% of return points.
//! let hold = game_probability(0, 0, 0.59).unwrap();
//! let set = set_probability(0, 0, 0.59, 0.44, true).unwrap();
//! assert!(hold > 0.7 && set > 0.5);
//! ```
//!
//! ## Modules
//!
//! - [`engine`]: The three recurrences and their validated entry points
//! - [`report`]: Score-grid tables and the driver configuration
//! - [`simulation`]: Seeded point-by-point play-outs
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        SetEvaluator                             │
//! │  - game-score recursion   - service/return/tiebreak per step    │
//! └─────────────────────────────────────────────────────────────────┘
//!                  │                               │
//!                  ▼                               ▼
//!         ┌─────────────────┐            ┌───────────────────┐
//!         │  GameEvaluator  │            │ TiebreakEvaluator │
//!         │  deuce closed   │            │ serve rotation,   │
//!         │  form           │            │ deep-tie policy   │
//!         └─────────────────┘            └───────────────────┘
//! ```

#![warn(missing_docs)]

/// Probability engine module.
///
/// Game, tiebreak and set recurrences plus validated entry points.
pub mod engine;

/// Logging setup shared by the binaries.
pub mod logging;

/// Reporting module.
///
/// Score-grid tables, text rendering and JSON export.
pub mod report;

/// Monte Carlo simulation module.
///
/// Independent play-outs used to cross-check the engine.
pub mod simulation;

// Re-export commonly used types at crate root for convenience
pub use engine::{
    game_probability, set_probability, tiebreak_probability, tiebreak_probability_to,
    DeepTiePolicy, EngineConfig, Player, ProbabilityError, WinProbabilityCalculator,
};
