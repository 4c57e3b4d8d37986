//! Game server status queries for the mcstats API.
//!
//! Implements the Server List Ping exchange a game client performs when
//! it refreshes its server list, and wraps it in a [`LivenessProbe`]
//! that never fails: an unreachable server is reported as offline.
//!
//! # Protocol
//!
//! ```text
//! client                                   server
//!   | -- handshake (next state = status) --> |
//!   | -- status request -------------------> |
//!   | <------------- status response (JSON) - |
//! ```
//!
//! Servers older than 1.7 do not understand the handshake. When the
//! modern exchange fails in a way that shows the server answered but
//! spoke something else, the client falls back to the legacy `0xFE 0x01`
//! ping within the same time budget.
//!
//! # Modules
//!
//! - [`protocol`] -- `VarInt`, string, and packet framing
//! - [`response`] -- Status payloads (modern JSON and legacy kick text)
//! - [`srv`] -- `_minecraft._tcp` SRV record lookup
//! - [`client`] -- [`ServerListPing`] query over TCP
//! - [`probe`] -- [`LivenessProbe`] mapping results to [`LivenessStatus`]
//!
//! [`LivenessStatus`]: mcstats_types::LivenessStatus

pub mod client;
pub mod error;
pub mod probe;
pub mod protocol;
pub mod response;
pub mod srv;

pub use client::ServerListPing;
pub use error::PingError;
pub use probe::LivenessProbe;
pub use response::ServerStatus;
