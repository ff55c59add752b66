//! Serve-rotation rules.
//!
//! Who serves the next point of a tiebreak, or the next game of a set, is a
//! pure function of the score and of who served first. Both rules are kept
//! here, apart from the recurrences, so they can be checked against the
//! literal rotation on their own.
//!
//! ```text
//! tiebreak point:  0  1  2  3  4  5  6  7  8 ...
//! server:          A  B  B  A  A  B  B  A  A ...
//!
//! set game:        0  1  2  3  4 ...
//! server:          A  B  A  B  A ...
//! ```

use serde::{Deserialize, Serialize};

/// One of the two players. Probabilities are always from `Player::One`'s side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The player whose win probability is being computed.
    One,
    /// The opponent.
    Two,
}

impl Player {
    /// The other player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// First server implied by the "player one serves first" flag.
    pub fn from_serving_first(player1_serving_first: bool) -> Self {
        if player1_serving_first {
            Player::One
        } else {
            Player::Two
        }
    }
}

/// Server of the next tiebreak point at score `tb_score1`-`tb_score2`.
///
/// The first server serves one point, then the players alternate every two.
pub fn tiebreak_server(tb_score1: u32, tb_score2: u32, first_server: Player) -> Player {
    let total = tb_score1 + tb_score2;
    let first_serves = if total == 0 {
        true
    } else if total % 2 == 0 {
        (total / 2) % 2 == 0
    } else {
        ((total + 1) / 2) % 2 == 0
    };

    if first_serves {
        first_server
    } else {
        first_server.opponent()
    }
}

/// Server of the next game of a set at game score `score1`-`score2`.
///
/// Serve alternates every game, so the first server serves whenever an even
/// number of games has been played.
pub fn set_game_server(score1: u32, score2: u32, first_server: Player) -> Player {
    if (score1 + score2) % 2 == 0 {
        first_server
    } else {
        first_server.opponent()
    }
}
