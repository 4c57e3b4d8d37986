//! Shared application state for the HTTP server.

use mcstats_core::{AppConfig, PlayerStore};
use mcstats_ping::LivenessProbe;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor. Both members only hold configuration; all data is read
/// fresh per request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Snapshot reader and aggregator.
    pub store: PlayerStore,
    /// Game server status probe.
    pub probe: LivenessProbe,
}

impl AppState {
    /// Build the state from the loaded configuration.
    pub fn new(config: &AppConfig) -> Self {
        Self::from_parts(
            PlayerStore::new(config.data.clone()),
            LivenessProbe::new(&config.probe),
        )
    }

    /// Build the state from explicit components.
    pub const fn from_parts(store: PlayerStore, probe: LivenessProbe) -> Self {
        Self { store, probe }
    }
}
