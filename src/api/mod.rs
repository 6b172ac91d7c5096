// HTTP API routes (game play, liveness, discovery).

use axum::{
    extract::{rejection::JsonRejection, Json, MatchedPath, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::agent::{AgentId, Roster};
use crate::game::{self, Matchup, Move, PayoffTable, RoundError, RoundRecord};
use crate::llms_txt;
use crate::metrics;

// ── Request types ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PlayGameRequest {
    pub player1: String,
    pub player2: String,
    pub rounds: u32,
}

#[derive(Deserialize)]
pub struct PlayRoundRequest {
    pub player1: String,
    pub player2: String,
    pub rounds: u32,
    pub current_round: u32,
    #[serde(default)]
    pub history: Vec<RoundRecord>,
    #[serde(default)]
    pub payouts: PayoffTable,
}

// ── Response types ────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct GamePlayer {
    pub model: AgentId,
    pub score: i64,
    pub reasoning: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayGameResponse {
    pub rounds: u32,
    pub history: Vec<RoundRecord>,
    pub player1: GamePlayer,
    pub player2: GamePlayer,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoundPlayer {
    #[serde(rename = "move")]
    pub mv: Move,
    pub score: i64,
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayRoundResponse {
    pub current_round: u32,
    pub player1: RoundPlayer,
    pub player2: RoundPlayer,
    pub history: Vec<RoundRecord>,
}

// ── Shared application state ─────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    pub roster: Roster,
    pub max_rounds: u32,
}

// ── Error helper ──────────────────────────────────────────────────────

fn json_error(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "error": msg }))).into_response()
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid model selection")]
    InvalidAgent,
    #[error("{0}")]
    BadRequest(String),
    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),
    #[error(transparent)]
    Backend(#[from] RoundError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidAgent | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::Backend(_) => StatusCode::BAD_GATEWAY,
        };
        json_error(status, &self.to_string())
    }
}

fn matchup(player1: &str, player2: &str) -> Result<Matchup, ApiError> {
    match (AgentId::from_str_name(player1), AgentId::from_str_name(player2)) {
        (Some(player1), Some(player2)) => Ok(Matchup { player1, player2 }),
        _ => {
            tracing::info!("Rejected game with unknown agent ({player1:?} vs {player2:?})");
            Err(ApiError::InvalidAgent)
        }
    }
}

fn check_rounds(rounds: u32, max_rounds: u32) -> Result<(), ApiError> {
    if rounds == 0 || rounds > max_rounds {
        return Err(ApiError::BadRequest(format!(
            "rounds must be between 1 and {max_rounds}"
        )));
    }
    Ok(())
}

// ── Router ────────────────────────────────────────────────────────────

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(info))
        .route("/test", get(test_route))
        .route("/ping", get(ping))
        .route("/health", get(health_check))
        .route("/agents", get(list_agents))
        .route("/metrics", get(get_metrics))
        .route("/llms.txt", get(get_llms_txt))
        .route("/play_game", post(play_game))
        .route("/play_round", post(play_round))
        .layer(middleware::from_fn(track_requests))
        .with_state(state)
}

/// Count every request by method, matched route and status.
async fn track_requests(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let response = next.run(req).await;
    metrics::API_REQUESTS_TOTAL
        .with_label_values(&[method.as_str(), endpoint.as_str(), response.status().as_str()])
        .inc();
    response
}

// ── Game handlers ─────────────────────────────────────────────────────

async fn play_game(
    State(state): State<AppState>,
    payload: Result<Json<PlayGameRequest>, JsonRejection>,
) -> Result<Json<PlayGameResponse>, ApiError> {
    let Json(req) = payload?;
    let matchup = matchup(&req.player1, &req.player2)?;
    check_rounds(req.rounds, state.max_rounds)?;

    let outcome =
        game::play_game(&state.roster, matchup, &PayoffTable::default(), req.rounds).await?;

    Ok(Json(PlayGameResponse {
        rounds: req.rounds,
        history: outcome.state.history,
        player1: GamePlayer {
            model: matchup.player1,
            score: outcome.state.player1_total,
            reasoning: outcome.player1_reason,
        },
        player2: GamePlayer {
            model: matchup.player2,
            score: outcome.state.player2_total,
            reasoning: outcome.player2_reason,
        },
    }))
}

async fn play_round(
    State(state): State<AppState>,
    payload: Result<Json<PlayRoundRequest>, JsonRejection>,
) -> Result<Json<PlayRoundResponse>, ApiError> {
    let Json(req) = payload?;
    let matchup = matchup(&req.player1, &req.player2)?;
    check_rounds(req.rounds, state.max_rounds)?;
    if req.current_round == 0 || req.current_round > req.rounds {
        return Err(ApiError::BadRequest(format!(
            "current_round must be between 1 and {}",
            req.rounds
        )));
    }

    let outcome = game::resolve_round(
        &state.roster,
        matchup,
        &req.payouts,
        &req.history,
        req.current_round,
        req.rounds,
    )
    .await?;

    let mut history = req.history;
    history.push(outcome.record);

    Ok(Json(PlayRoundResponse {
        current_round: req.current_round,
        player1: RoundPlayer {
            mv: outcome.player1.mv,
            score: outcome.player1.score,
            reason: outcome.player1.reason,
        },
        player2: RoundPlayer {
            mv: outcome.player2.mv,
            score: outcome.player2.score,
            reason: outcome.player2.reason,
        },
        history,
    }))
}

// ── Info handlers ─────────────────────────────────────────────────────

async fn test_route() -> impl IntoResponse {
    Json(json!({ "message": "API is running!" }))
}

async fn ping() -> impl IntoResponse {
    Json(json!({ "message": "pong" }))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "dilemma-arena" }))
}

async fn info() -> impl IntoResponse {
    let agents: Vec<&str> = AgentId::ALL.iter().map(|a| a.as_str()).collect();
    Json(json!({
        "service": "dilemma-arena",
        "version": env!("CARGO_PKG_VERSION"),
        "agents": agents,
    }))
}

async fn list_agents(State(state): State<AppState>) -> impl IntoResponse {
    let agents: Vec<_> = AgentId::ALL
        .iter()
        .map(|&a| json!({ "id": a, "model": state.roster.backend(a).model() }))
        .collect();
    Json(json!(agents))
}

async fn get_metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::gather_metrics(),
    )
}

async fn get_llms_txt() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        llms_txt::LLMS_TXT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matchup_rejects_unknown_agent() {
        assert!(matches!(matchup("Gemini", "Llama"), Err(ApiError::InvalidAgent)));
        assert!(matches!(matchup("gpt", "Claude"), Err(ApiError::InvalidAgent)));
        let m = matchup("Claude", "OpenAI").unwrap();
        assert_eq!(m.player1, AgentId::Claude);
        assert_eq!(m.player2, AgentId::OpenAI);
    }

    #[test]
    fn test_check_rounds_bounds() {
        assert!(check_rounds(0, 10).is_err());
        assert!(check_rounds(1, 10).is_ok());
        assert!(check_rounds(10, 10).is_ok());
        assert!(check_rounds(11, 10).is_err());
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(
            ApiError::InvalidAgent.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
