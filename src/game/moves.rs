// Moves and the payout table they index into.

use serde::{Deserialize, Serialize};

/// A player's choice for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    #[serde(rename = "C")]
    Cooperate,
    #[serde(rename = "D")]
    Defect,
}

impl Move {
    pub fn as_char(self) -> char {
        match self {
            Move::Cooperate => 'C',
            Move::Defect => 'D',
        }
    }

    /// Parse a move as a model writes it: `C`/`D` in either case, or the
    /// full words. Surrounding whitespace is ignored.
    pub fn from_str_name(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("c") || s.eq_ignore_ascii_case("cooperate") {
            Some(Move::Cooperate)
        } else if s.eq_ignore_ascii_case("d") || s.eq_ignore_ascii_case("defect") {
            Some(Move::Defect)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Score pair awarded to (player1, player2) for each ordered move pair.
///
/// Every key is required on the wire. The table does not have to be
/// symmetric; `CD` and `DC` are looked up independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffTable {
    #[serde(rename = "CC")]
    pub cc: (i64, i64),
    #[serde(rename = "CD")]
    pub cd: (i64, i64),
    #[serde(rename = "DC")]
    pub dc: (i64, i64),
    #[serde(rename = "DD")]
    pub dd: (i64, i64),
}

impl Default for PayoffTable {
    fn default() -> Self {
        Self {
            cc: (3, 3),
            cd: (-10, 10),
            dc: (10, -10),
            dd: (-3, -3),
        }
    }
}

impl PayoffTable {
    /// Scores for (player1, player2) given both moves.
    pub fn score(&self, player1: Move, player2: Move) -> (i64, i64) {
        match (player1, player2) {
            (Move::Cooperate, Move::Cooperate) => self.cc,
            (Move::Cooperate, Move::Defect) => self.cd,
            (Move::Defect, Move::Cooperate) => self.dc,
            (Move::Defect, Move::Defect) => self.dd,
        }
    }
}
