// Round resolution: prompt both agents, decode their moves, score the pair.

use std::time::Instant;

use crate::agent::{AgentId, Roster};
use crate::backend::BackendError;
use crate::metrics;

use super::extract::{extract_move, Extracted};
use super::moves::{Move, PayoffTable};
use super::prompt::{build_prompt, for_seat, Seat};
use super::record::{GameState, RoundRecord};

/// A backend call failed, so the round (and the request) cannot complete.
#[derive(Debug, thiserror::Error)]
#[error("{agent} backend failed: {source}")]
pub struct RoundError {
    pub agent: AgentId,
    #[source]
    pub source: BackendError,
}

/// The two agents seated in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matchup {
    pub player1: AgentId,
    pub player2: AgentId,
}

/// One player's side of a resolved round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub mv: Move,
    pub reason: String,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub record: RoundRecord,
    pub player1: Turn,
    pub player2: Turn,
}

/// Ask one agent for its move. A reply that cannot be decoded is not an
/// error; it falls back to cooperation.
async fn ask(roster: &Roster, agent: AgentId, prompt: &str, seat: Seat) -> Result<Extracted, RoundError> {
    let label = agent.as_str();
    let started = Instant::now();
    let reply = roster
        .backend(agent)
        .invoke(&for_seat(prompt, seat))
        .await;
    metrics::BACKEND_LATENCY_SECONDS
        .with_label_values(&[label])
        .observe(started.elapsed().as_secs_f64());

    let reply = match reply {
        Ok(text) => {
            metrics::BACKEND_CALLS_TOTAL.with_label_values(&[label, "ok"]).inc();
            text
        }
        Err(source) => {
            metrics::BACKEND_CALLS_TOTAL.with_label_values(&[label, "error"]).inc();
            match &source {
                BackendError::Status { body, .. } => {
                    tracing::error!("{agent} backend failed: {source}: {body}")
                }
                _ => tracing::error!("{agent} backend failed: {source}"),
            }
            return Err(RoundError { agent, source });
        }
    };

    let extracted = extract_move(&reply);
    if let Some(diagnostic) = extracted.fallback {
        metrics::MOVE_FALLBACKS_TOTAL.with_label_values(&[diagnostic]).inc();
        tracing::warn!("{agent} reply could not be decoded ({diagnostic}), defaulting to C");
    }
    Ok(extracted)
}

/// Resolve a single round against caller-supplied history.
///
/// Player1 is asked first, then player2. The returned record carries
/// `current_round` as its round number; `history` is only read.
pub async fn resolve_round(
    roster: &Roster,
    matchup: Matchup,
    payouts: &PayoffTable,
    history: &[RoundRecord],
    current_round: u32,
    total_rounds: u32,
) -> Result<RoundOutcome, RoundError> {
    let prompt = build_prompt(payouts, history, current_round, total_rounds);

    let first = ask(roster, matchup.player1, &prompt, Seat::Player1).await?;
    let second = ask(roster, matchup.player2, &prompt, Seat::Player2).await?;

    let (score1, score2) = payouts.score(first.mv, second.mv);
    let record = RoundRecord {
        round: current_round,
        player1: first.mv,
        player2: second.mv,
        player1_score: score1,
        player2_score: score2,
    };

    metrics::ROUNDS_PLAYED_TOTAL.inc();
    tracing::debug!(
        "{} vs {}: {record} ({score1}, {score2})",
        matchup.player1,
        matchup.player2
    );

    Ok(RoundOutcome {
        record,
        player1: Turn {
            mv: first.mv,
            reason: first.reason,
            score: score1,
        },
        player2: Turn {
            mv: second.mv,
            reason: second.reason,
            score: score2,
        },
    })
}

/// Result of a whole game: final state plus each player's last rationale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub state: GameState,
    pub player1_reason: String,
    pub player2_reason: String,
}

/// Play `rounds` rounds back to back, holding state only for this call.
pub async fn play_game(
    roster: &Roster,
    matchup: Matchup,
    payouts: &PayoffTable,
    rounds: u32,
) -> Result<GameOutcome, RoundError> {
    let mut state = GameState::new();
    let mut player1_reason = String::new();
    let mut player2_reason = String::new();

    while state.next_round() <= rounds {
        let outcome = resolve_round(
            roster,
            matchup,
            payouts,
            &state.history,
            state.next_round(),
            rounds,
        )
        .await?;
        player1_reason = outcome.player1.reason;
        player2_reason = outcome.player2.reason;
        state.push(outcome.record);
    }

    metrics::GAMES_PLAYED_TOTAL.inc();
    tracing::info!(
        "{} vs {} finished after {rounds} rounds: {} to {}",
        matchup.player1,
        matchup.player2,
        state.player1_total,
        state.player2_total
    );

    Ok(GameOutcome {
        state,
        player1_reason,
        player2_reason,
    })
}
