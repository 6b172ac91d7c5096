// Prompt text sent to each agent before a round.

use super::moves::PayoffTable;
use super::record::RoundRecord;

/// Which seat the prompt is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Player1,
    Player2,
}

impl Seat {
    pub fn suffix(self) -> &'static str {
        match self {
            Seat::Player1 => " you are player1",
            Seat::Player2 => " you are player2",
        }
    }
}

fn intro(payouts: &PayoffTable) -> String {
    format!(
        "Game: You are participating in an iterated Prisoner's Dilemma against another player. \
In each round both players simultaneously choose to Cooperate (C) or Defect (D). \
Payouts are listed as (player1, player2):\n\
- Both cooperate (CC): ({}, {})\n\
- Player1 cooperates, player2 defects (CD): ({}, {})\n\
- Player1 defects, player2 cooperates (DC): ({}, {})\n\
- Both defect (DD): ({}, {})\n\
Your goal is to maximize your own total score over all rounds.",
        payouts.cc.0,
        payouts.cc.1,
        payouts.cd.0,
        payouts.cd.1,
        payouts.dc.0,
        payouts.dc.1,
        payouts.dd.0,
        payouts.dd.1,
    )
}

const TASK: &str = "Your Task: Based on the history and expected rounds, choose your move for this round. \
Respond with a single JSON object of the form {\"move\": \"C\" or \"D\", \"reason\": \"<short explanation>\"}.";

/// Render the history one line per round, oldest first.
pub fn render_history(history: &[RoundRecord]) -> String {
    let mut out = String::new();
    for record in history {
        out.push_str(&record.to_string());
        out.push('\n');
    }
    out
}

/// Build the shared prompt for a round. The seat suffix is appended by
/// [`for_seat`].
pub fn build_prompt(
    payouts: &PayoffTable,
    history: &[RoundRecord],
    current_round: u32,
    total_rounds: u32,
) -> String {
    format!(
        "{}\n{}\nThis is round {} out of {}.\n\n{}",
        intro(payouts),
        render_history(history),
        current_round,
        total_rounds,
        TASK
    )
}

pub fn for_seat(prompt: &str, seat: Seat) -> String {
    format!("{prompt}{}", seat.suffix())
}
