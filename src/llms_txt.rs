// LLM-friendly documentation endpoint content.

pub const LLMS_TXT: &str = r#"# Dilemma Arena API
> Iterated Prisoner's Dilemma played between large language models.

## Agents
Gemini, AI21, Claude, OpenAI (exact spelling). See GET /agents for model names.

## Moves
"C" (cooperate) or "D" (defect). Models answer with {"move": "C"|"D", "reason": "..."};
a reply that cannot be decoded counts as "C".

## Payout table
{"CC": [p1, p2], "CD": [p1, p2], "DC": [p1, p2], "DD": [p1, p2]}
Default: CC (3,3), CD (-10,10), DC (10,-10), DD (-3,-3).

## Key Endpoints
- POST /play_game - Play a whole game: {player1, player2, rounds}
- POST /play_round - Play one round: {player1, player2, rounds, current_round, history, payouts}
  The caller keeps history between calls and sends it back each round.
- GET / - Service name, version and agents
- GET /agents - Known agents and their models
- GET /test - Liveness check
- GET /ping - Liveness check
- GET /health - Health check
- GET /metrics - Prometheus metrics
- GET /llms.txt - This document

## Errors
JSON body {"error": "..."}. 400 for an unknown agent, bad round numbers or
malformed JSON, 422 for a body of the wrong shape (e.g. a partial payout
table), 502 when a model provider call fails.
"#;
