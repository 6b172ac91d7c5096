use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use dilemma_arena::agent::Roster;
use dilemma_arena::api::{self, AppState};
use dilemma_arena::config::Config;
use dilemma_arena::metrics;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load();
    metrics::register_metrics();

    let roster = Roster::from_config(&config).expect("Failed to build model backends");
    let state = AppState {
        roster,
        max_rounds: config.max_rounds,
    };

    let app = api::router(state).layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.bind_addr, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {addr}: {e}"));

    tracing::info!("Dilemma arena listening on {addr}");
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
