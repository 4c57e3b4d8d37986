//! REST API endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/status` | Live game server status |
//! | `GET` | `/players` | All player summaries, in roster order |
//! | `GET` | `/players/{id}` | One player summary |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use mcstats_types::{LivenessStatus, PlayerId, PlayerSummary};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /status -- live server status
// ---------------------------------------------------------------------------

/// Query the game server and report whether it is up.
///
/// Always `200`: an unreachable server is reported as `online: false`.
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<LivenessStatus> {
    Json(state.probe.probe().await)
}

// ---------------------------------------------------------------------------
// GET /players -- all summaries
// ---------------------------------------------------------------------------

/// Aggregate every roster identity's snapshots.
///
/// A malformed roster or snapshot fails the request with `500` unless
/// the store is configured to skip malformed records.
pub async fn list_players(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PlayerSummary>>, ApiError> {
    let summaries = run_blocking(move || state.store.summaries()).await??;
    Ok(Json(summaries))
}

// ---------------------------------------------------------------------------
// GET /players/{id} -- single summary
// ---------------------------------------------------------------------------

/// Aggregate one roster identity's snapshots.
pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<Json<PlayerSummary>, ApiError> {
    let id = parse_player_id(&id_str)?;
    run_blocking(move || state.store.summary(id))
        .await??
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("player {id}")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run filesystem work on the blocking pool.
async fn run_blocking<F, T>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(format!("aggregation task failed: {e}")))
}

/// Parse a player UUID from a string, returning an [`ApiError`] on failure.
fn parse_player_id(s: &str) -> Result<PlayerId, ApiError> {
    s.parse::<PlayerId>()
        .map_err(|e| ApiError::InvalidUuid(format!("{s}: {e}")))
}
