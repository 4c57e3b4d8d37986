//! Live game-server status payload served by `GET /status`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Whether the game server answered a status query, and who is on it.
///
/// A failed query is not an error at the HTTP layer; it is reported as
/// `online: false` with [`LivenessStatus::offline`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct LivenessStatus {
    /// The server answered the status query.
    pub online: bool,
    /// Players currently connected.
    pub player_count: u32,
    /// Player slots advertised by the server.
    pub max_players: u32,
    /// Names from the server's visible player sample. Empty when the
    /// server hides its sample, which is common and not an error.
    pub online_names: Vec<String>,
}

impl LivenessStatus {
    /// Payload reported when the server could not be queried.
    ///
    /// `max_players` is a configured assumption, not a measured value.
    pub const fn offline(max_players: u32) -> Self {
        Self {
            online: false,
            player_count: 0,
            max_players,
            online_names: Vec::new(),
        }
    }
}
