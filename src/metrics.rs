// Prometheus metrics definitions for the arena.

use lazy_static::lazy_static;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Once;

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // ── Counters ─────────────────────────────────────────────────────

    /// Rounds resolved, across both endpoints.
    pub static ref ROUNDS_PLAYED_TOTAL: IntCounter =
        IntCounter::new("dilemma_rounds_played_total", "Rounds resolved").unwrap();

    /// Whole games completed through /play_game.
    pub static ref GAMES_PLAYED_TOTAL: IntCounter =
        IntCounter::new("dilemma_games_played_total", "Whole games completed").unwrap();

    /// Backend invocations, by agent and outcome (ok, error).
    pub static ref BACKEND_CALLS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("dilemma_backend_calls_total", "Model backend invocations"),
        &["agent", "outcome"],
    )
    .unwrap();

    /// Replies that fell back to cooperation, by diagnostic.
    pub static ref MOVE_FALLBACKS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("dilemma_move_fallbacks_total", "Replies that could not be decoded"),
        &["reason"],
    )
    .unwrap();

    /// Total API requests, by method/endpoint/status.
    pub static ref API_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("dilemma_api_requests_total", "Total API requests"),
        &["method", "endpoint", "status"],
    )
    .unwrap();

    // ── Histograms ───────────────────────────────────────────────────

    /// Model reply latency in seconds, by agent.
    pub static ref BACKEND_LATENCY_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new("dilemma_backend_latency_seconds", "Model reply latency in seconds")
            .buckets(vec![0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["agent"],
    )
    .unwrap();
}

static REGISTER: Once = Once::new();

/// Register all metrics with the custom registry. Safe to call more than once.
pub fn register_metrics() {
    REGISTER.call_once(|| {
        let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
            Box::new(ROUNDS_PLAYED_TOTAL.clone()),
            Box::new(GAMES_PLAYED_TOTAL.clone()),
            Box::new(BACKEND_CALLS_TOTAL.clone()),
            Box::new(MOVE_FALLBACKS_TOTAL.clone()),
            Box::new(API_REQUESTS_TOTAL.clone()),
            Box::new(BACKEND_LATENCY_SECONDS.clone()),
        ];

        for c in collectors {
            if let Err(e) = REGISTRY.register(c) {
                tracing::error!("failed to register metric: {e}");
            }
        }
    });
}

/// Serialize all registered metrics to the Prometheus text exposition format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("failed to encode metrics: {e}");
    }
    String::from_utf8(buffer).unwrap_or_default()
}
