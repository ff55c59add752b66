//! Monte Carlo play-outs for cross-checking the engine.
//!
//! Contests are played point by point with a seeded RNG. Serve is rotated by
//! counting points and games as they are played, not through the parity
//! rules in [`crate::engine::serve`], so the two approaches check each other.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::config::DEFAULT_TIEBREAK_TARGET;
use crate::engine::serve::Player;

/// Tiebreak points after which a still-level tiebreak is settled by a coin flip.
///
/// Only reachable when neither player can ever win both points of a serve
/// pair, e.g. service 1.0 and return 0.0.
pub const MAX_TIEBREAK_POINTS: u32 = 1_000;

/// Plays games, tiebreaks and sets with fixed point-win probabilities.
pub struct MatchSimulator {
    rng: StdRng,
}

impl MatchSimulator {
    /// Create a simulator; `None` seeds from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    fn point(&mut self, p: f64) -> Player {
        if self.rng.gen::<f64>() < p {
            Player::One
        } else {
            Player::Two
        }
    }

    /// Play out a game from `score1`-`score2`; returns the winner.
    pub fn play_game(&mut self, mut score1: u32, mut score2: u32, p: f64) -> Player {
        loop {
            if score1 >= 4 && score1 >= score2 + 2 {
                return Player::One;
            }
            if score2 >= 4 && score2 >= score1 + 2 {
                return Player::Two;
            }
            match self.point(p) {
                Player::One => score1 += 1,
                Player::Two => score2 += 1,
            }
        }
    }

    /// Play out a tiebreak from `score1`-`score2`; returns the winner.
    pub fn play_tiebreak(
        &mut self,
        mut score1: u32,
        mut score2: u32,
        service: f64,
        ret: f64,
        first_server: Player,
        target: u32,
    ) -> Player {
        // Replay the rotation up to the current score: one point for the
        // first server, then two points per turn.
        let mut server = first_server;
        let mut left_in_turn = 1;
        for _ in 0..(score1 + score2) {
            left_in_turn -= 1;
            if left_in_turn == 0 {
                server = server.opponent();
                left_in_turn = 2;
            }
        }

        loop {
            if score1 >= target && score1 >= score2 + 2 {
                return Player::One;
            }
            if score2 >= target && score2 >= score1 + 2 {
                return Player::Two;
            }
            if score1 + score2 >= MAX_TIEBREAK_POINTS {
                return self.point(0.5);
            }

            let p = match server {
                Player::One => service,
                Player::Two => ret,
            };
            match self.point(p) {
                Player::One => score1 += 1,
                Player::Two => score2 += 1,
            }

            left_in_turn -= 1;
            if left_in_turn == 0 {
                server = server.opponent();
                left_in_turn = 2;
            }
        }
    }

    /// Play out a set from game score `score1`-`score2`; returns the winner.
    pub fn play_set(
        &mut self,
        mut score1: u32,
        mut score2: u32,
        service: f64,
        ret: f64,
        first_server: Player,
    ) -> Player {
        let mut server = first_server;
        for _ in 0..(score1 + score2) {
            server = server.opponent();
        }

        loop {
            if (score1 >= 6 && score1 >= score2 + 2) || score1 == 7 {
                return Player::One;
            }
            if (score2 >= 6 && score2 >= score1 + 2) || score2 == 7 {
                return Player::Two;
            }

            let winner = if score1 == 6 && score2 == 6 {
                self.play_tiebreak(0, 0, service, ret, first_server, DEFAULT_TIEBREAK_TARGET)
            } else {
                match server {
                    Player::One => self.play_game(0, 0, service),
                    // Player one wins a return game when the server loses it.
                    Player::Two => self.play_game(0, 0, ret),
                }
            };
            match winner {
                Player::One => score1 += 1,
                Player::Two => score2 += 1,
            }
            server = server.opponent();
        }
    }

    /// Fraction of `trials` games player one wins from `score1`-`score2`.
    pub fn estimate_game(&mut self, score1: u32, score2: u32, p: f64, trials: u32) -> f64 {
        let wins = (0..trials)
            .filter(|_| self.play_game(score1, score2, p) == Player::One)
            .count();
        wins as f64 / trials.max(1) as f64
    }

    /// Fraction of `trials` tiebreaks player one wins from `score1`-`score2`.
    #[allow(clippy::too_many_arguments)]
    pub fn estimate_tiebreak(
        &mut self,
        score1: u32,
        score2: u32,
        service: f64,
        ret: f64,
        first_server: Player,
        target: u32,
        trials: u32,
    ) -> f64 {
        let wins = (0..trials)
            .filter(|_| {
                self.play_tiebreak(score1, score2, service, ret, first_server, target)
                    == Player::One
            })
            .count();
        wins as f64 / trials.max(1) as f64
    }

    /// Fraction of `trials` sets player one wins from `score1`-`score2`.
    pub fn estimate_set(
        &mut self,
        score1: u32,
        score2: u32,
        service: f64,
        ret: f64,
        first_server: Player,
        trials: u32,
    ) -> f64 {
        let wins = (0..trials)
            .filter(|_| self.play_set(score1, score2, service, ret, first_server) == Player::One)
            .count();
        wins as f64 / trials.max(1) as f64
    }
}
