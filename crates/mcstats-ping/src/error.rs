//! Error types for status queries.

use std::io::ErrorKind;
use std::time::Duration;

/// Errors that can occur while querying a game server.
#[derive(Debug, thiserror::Error)]
pub enum PingError {
    /// The whole exchange did not finish in time.
    #[error("status query timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Connecting, reading, or writing failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server answered with bytes that do not follow the protocol.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The status response was not the expected JSON document.
    #[error("invalid status JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl PingError {
    /// Whether the server answered but not in the modern format.
    ///
    /// Legacy servers typically drop or reset the connection after the
    /// unknown handshake, or reply with a kick packet that fails framing.
    /// A refused connection or a timeout says nothing about the protocol.
    pub fn is_protocol_mismatch(&self) -> bool {
        match self {
            Self::Protocol(_) | Self::Json(_) => true,
            Self::Io(e) => matches!(
                e.kind(),
                ErrorKind::UnexpectedEof | ErrorKind::ConnectionReset
            ),
            Self::Timeout(_) => false,
        }
    }
}
