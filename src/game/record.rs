// Round history and the running state of a game.

use serde::{Deserialize, Serialize};

use super::moves::Move;

/// One completed round. Scores are that round's payoff, not running totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub player1: Move,
    pub player2: Move,
    pub player1_score: i64,
    pub player2_score: i64,
}

impl std::fmt::Display for RoundRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Round {}: Player1: {}, Player2: {}",
            self.round, self.player1, self.player2
        )
    }
}

/// History plus cumulative scores, owned by whoever drives the game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    pub history: Vec<RoundRecord>,
    pub player1_total: i64,
    pub player2_total: i64,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Round number the next record will carry.
    pub fn next_round(&self) -> u32 {
        self.history.len() as u32 + 1
    }

    pub fn push(&mut self, record: RoundRecord) {
        self.player1_total += record.player1_score;
        self.player2_total += record.player2_score;
        self.history.push(record);
    }
}
