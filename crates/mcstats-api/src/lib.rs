//! HTTP API for the mcstats service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`GET /status`** -- live game server status from a Server List Ping
//! - **`GET /players`** -- one summary per roster identity, in roster order
//! - **`GET /players/{id}`** -- a single player's summary
//!
//! # Architecture
//!
//! Nothing is cached. Every `/players` request re-reads the roster and the
//! per-player snapshots on Tokio's blocking pool; every `/status` request
//! performs one bounded status query. [`AppState`] is immutable after
//! startup, so handlers share it without locks.
//!
//! [`AppState`]: state::AppState

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, bind_listener, start_server};
pub use state::AppState;
