//! Server List Ping client.
//!
//! One [`ServerListPing::query`] call is one bounded attempt: the timeout
//! covers the SRV lookup, name resolution, connecting, the modern
//! exchange, and the legacy fallback together. Nothing is retried.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{Instant, timeout};
use tracing::debug;

use crate::error::PingError;
use crate::protocol::{
    LEGACY_KICK_ID, LEGACY_KICK_PREFIX_LEN, LEGACY_PING, STATUS_RESPONSE_ID, decode_string,
    is_legacy_kick, read_legacy_kick, read_packet, status_request,
};
use crate::response::{ServerStatus, parse_legacy_kick, parse_status_json};
use crate::srv;

/// Queries one game server for its status.
#[derive(Debug, Clone)]
pub struct ServerListPing {
    address: String,
    port: u16,
    timeout: Duration,
    srv: bool,
}

impl ServerListPing {
    /// Create a client for `address:port` with an overall deadline.
    pub fn new(address: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            address: address.into(),
            port,
            timeout,
            srv: false,
        }
    }

    /// Look up the `_minecraft._tcp` SRV record of the address before
    /// connecting.
    pub const fn with_srv(mut self, enabled: bool) -> Self {
        self.srv = enabled;
        self
    }

    /// Target hostname or IP address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Target port.
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Whether the SRV record is consulted before connecting.
    pub const fn srv_enabled(&self) -> bool {
        self.srv
    }

    /// Overall deadline for one query.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run the status exchange.
    ///
    /// # Errors
    ///
    /// Returns [`PingError::Timeout`] if the deadline passes, or the
    /// error of the last protocol attempt.
    pub async fn query(&self) -> Result<ServerStatus, PingError> {
        let started = Instant::now();
        let Ok(result) = timeout(self.timeout, self.exchange()).await else {
            return Err(PingError::Timeout(self.timeout));
        };

        debug!(
            address = self.address,
            port = self.port,
            elapsed_ms = started.elapsed().as_millis(),
            ok = result.is_ok(),
            "Status query finished"
        );
        result
    }

    async fn exchange(&self) -> Result<ServerStatus, PingError> {
        let (host, port) = if self.srv {
            srv::resolve(&self.address, self.port).await
        } else {
            (self.address.clone(), self.port)
        };

        match query_modern(&host, port).await {
            Err(e) if e.is_protocol_mismatch() => {
                debug!(
                    host,
                    port,
                    error = %e,
                    "Modern status exchange failed, trying legacy ping"
                );
                query_legacy(&host, port).await
            }
            other => other,
        }
    }
}

async fn connect(host: &str, port: u16) -> Result<TcpStream, PingError> {
    let stream = TcpStream::connect((host, port)).await?;
    stream.set_nodelay(true)?;
    Ok(stream)
}

/// Handshake + status request, 1.7 and later.
async fn query_modern(host: &str, port: u16) -> Result<ServerStatus, PingError> {
    let mut stream = connect(host, port).await?;
    stream.write_all(&status_request(host, port)?).await?;
    stream.flush().await?;

    // A pre-1.7 server may answer the handshake with a kick packet, whose
    // 0xFF id is also the first byte of some modern lengths.
    let first = stream.read_u8().await?;
    let mut prefix = [first, 0, 0, 0, 0];
    let mut buffered = 1;
    if first == LEGACY_KICK_ID {
        let [_, rest @ ..] = &mut prefix;
        stream.read_exact(rest).await?;
        buffered = LEGACY_KICK_PREFIX_LEN;

        if is_legacy_kick(&prefix) {
            let [_, kick @ ..] = prefix;
            let mut reader = kick.as_slice().chain(&mut stream);
            return parse_legacy_kick(&read_legacy_kick(&mut reader).await?);
        }
    }

    let mut reader = prefix
        .get(..buffered)
        .unwrap_or_default()
        .chain(&mut stream);
    let (id, payload) = read_packet(&mut reader).await?;
    if id != STATUS_RESPONSE_ID {
        return Err(PingError::Protocol(format!(
            "expected status response, got packet 0x{id:02X}"
        )));
    }
    let (json, _) = decode_string(&payload)?;
    parse_status_json(json)
}

/// `0xFE 0x01` ping, answered with a kick packet by 1.4 to 1.6.
async fn query_legacy(host: &str, port: u16) -> Result<ServerStatus, PingError> {
    let mut stream = connect(host, port).await?;
    stream.write_all(&LEGACY_PING).await?;
    stream.flush().await?;

    let id = stream.read_u8().await?;
    if id != LEGACY_KICK_ID {
        return Err(PingError::Protocol(format!(
            "expected legacy kick packet, got 0x{id:02X}"
        )));
    }
    parse_legacy_kick(&read_legacy_kick(&mut stream).await?)
}
