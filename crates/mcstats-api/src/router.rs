//! Axum router construction.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled so browser dashboards on other origins can read the API.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /status` -- live game server status
/// - `GET /players` -- all player summaries
/// - `GET /players/{id}` -- single player summary
///
/// CORS allows any origin, method, and header; the API is read-only and
/// unauthenticated.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/status", get(handlers::get_status))
        .route("/players", get(handlers::list_players))
        .route("/players/{id}", get(handlers::get_player))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
