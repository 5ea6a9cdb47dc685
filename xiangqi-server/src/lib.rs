//! Xiangqi Server - HTTP API for human-vs-AI play
//!
//! This crate provides the web backend:
//! - REST API for game creation, human moves and AI replies
//! - Match history persisted to a JSON file
//! - Static file serving for the board front-end

mod routes;
mod state;

pub mod error;
pub mod history;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub use error::ApiError;
pub use history::{HistoryStore, MatchRecord, MatchSummary, Winner};
pub use state::{GameSession, ServerState, SessionStore, TurnError};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
    pub history_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            static_dir: "static".to_string(),
            history_path: PathBuf::from(history::DEFAULT_HISTORY_PATH),
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Game API
        .route("/api/game/new", post(routes::game::new_game))
        .route("/api/game/:game_id", get(routes::game::get_game))
        .route("/api/game/:game_id/move", post(routes::game::make_move))
        .route("/api/game/:game_id/ai_move", post(routes::game::ai_move))
        // History API
        .route("/api/history", get(routes::history::list_history))
        .route("/api/history/:record_id", get(routes::history::get_history))
        // Shared state
        .with_state(state)
        .layer(CorsLayer::permissive())
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let history = HistoryStore::new(config.history_path.clone());
    let state = Arc::new(ServerState::new(history));
    let router = create_router(&config, state);

    tracing::info!("Xiangqi server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);
    tracing::info!("Match history at: {}", config.history_path.display());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
