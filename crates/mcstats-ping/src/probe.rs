//! Liveness probe backing `GET /status`.
//!
//! [`LivenessProbe::probe`] never fails. Any query error (timeout,
//! refused connection, unresolvable host, protocol mismatch) is logged
//! and reported as the fixed offline payload.

use std::time::Duration;

use mcstats_core::config::ProbeConfig;
use mcstats_types::LivenessStatus;
use tracing::debug;

use crate::client::ServerListPing;
use crate::error::PingError;
use crate::response::ServerStatus;

/// Status probe for the configured game server.
#[derive(Debug, Clone)]
pub struct LivenessProbe {
    client: ServerListPing,
    fallback_max_players: u32,
}

impl LivenessProbe {
    /// Build a probe from configuration.
    pub fn new(config: &ProbeConfig) -> Self {
        Self {
            client: ServerListPing::new(
                config.address.clone(),
                config.port,
                Duration::from_millis(config.timeout_ms),
            )
            .with_srv(config.enable_srv),
            fallback_max_players: config.fallback_max_players,
        }
    }

    /// The underlying client.
    pub const fn client(&self) -> &ServerListPing {
        &self.client
    }

    /// Query the server once and report its status.
    pub async fn probe(&self) -> LivenessStatus {
        let result = self.client.query().await;
        if let Err(e) = &result {
            debug!(
                address = self.client.address(),
                port = self.client.port(),
                error = %e,
                "Game server unreachable, reporting offline"
            );
        }
        to_liveness(result, self.fallback_max_players)
    }
}

/// Map a query result onto the API payload.
pub fn to_liveness(
    result: Result<ServerStatus, PingError>,
    fallback_max_players: u32,
) -> LivenessStatus {
    match result {
        Ok(status) => LivenessStatus {
            online: true,
            player_count: status.players_online,
            max_players: status.players_max,
            online_names: status.sample_names,
        },
        Err(_) => LivenessStatus::offline(fallback_max_players),
    }
}
