//! Status payloads returned by game servers.
//!
//! Modern servers answer with a JSON document; legacy servers answer with
//! a kick packet whose reason string packs the same information. Both are
//! normalized into [`ServerStatus`].

use serde::Deserialize;

use crate::error::PingError;

/// Normalized result of a successful status query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerStatus {
    /// Version name advertised by the server (e.g. `1.20.4`).
    pub version_name: Option<String>,
    /// Protocol number advertised by the server.
    pub protocol: Option<i64>,
    /// Players currently connected.
    pub players_online: u32,
    /// Player slots.
    pub players_max: u32,
    /// Names from the visible player sample. Legacy servers never send
    /// one and modern servers may hide it.
    pub sample_names: Vec<String>,
    /// The answer came from the legacy ping.
    pub legacy: bool,
}

// ---------------------------------------------------------------------------
// Modern JSON response
// ---------------------------------------------------------------------------

/// Status response JSON as sent by 1.7+ servers.
///
/// Only the fields the API reports are modelled; `description`,
/// `favicon`, and mod-loader extensions are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    /// Server software version.
    #[serde(default)]
    pub version: Option<VersionInfo>,
    /// Player counts and sample.
    pub players: PlayersInfo,
}

/// `version` object of a status response.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfo {
    /// Human-readable version name.
    #[serde(default)]
    pub name: Option<String>,
    /// Protocol number.
    #[serde(default)]
    pub protocol: Option<i64>,
}

/// `players` object of a status response.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayersInfo {
    /// Player slots.
    pub max: i64,
    /// Players online.
    pub online: i64,
    /// A subset of online players, when the server shares it.
    #[serde(default)]
    pub sample: Option<Vec<SamplePlayer>>,
}

/// One entry of the player sample.
#[derive(Debug, Clone, Deserialize)]
pub struct SamplePlayer {
    /// Player name.
    pub name: String,
    /// Player UUID (some proxies send placeholders here).
    #[serde(default)]
    pub id: Option<String>,
}

impl From<StatusResponse> for ServerStatus {
    fn from(response: StatusResponse) -> Self {
        let (version_name, protocol) = response
            .version
            .map_or((None, None), |v| (v.name, v.protocol));
        Self {
            version_name,
            protocol,
            players_online: clamp_count(response.players.online),
            players_max: clamp_count(response.players.max),
            sample_names: response
                .players
                .sample
                .unwrap_or_default()
                .into_iter()
                .map(|p| p.name)
                .collect(),
            legacy: false,
        }
    }
}

/// Parse the JSON carried by a status response packet.
///
/// # Errors
///
/// Returns [`PingError::Json`] if the document lacks a `players` object
/// or is not JSON.
pub fn parse_status_json(json: &str) -> Result<ServerStatus, PingError> {
    let response: StatusResponse = serde_json::from_str(json)?;
    Ok(response.into())
}

// ---------------------------------------------------------------------------
// Legacy kick response
// ---------------------------------------------------------------------------

/// Parse the UTF-16BE reason string of a legacy kick packet.
///
/// 1.4 to 1.6 (and modern servers answering a legacy ping) send
/// `§1\0<protocol>\0<version>\0<motd>\0<online>\0<max>`. Older servers
/// send `<motd>§<online>§<max>`.
///
/// # Errors
///
/// Returns [`PingError::Protocol`] if the text is not valid UTF-16 or
/// does not match either layout.
pub fn parse_legacy_kick(raw: &[u8]) -> Result<ServerStatus, PingError> {
    let pairs = raw.chunks_exact(2);
    if !pairs.remainder().is_empty() {
        return Err(PingError::Protocol(
            "legacy response has an odd byte count".to_owned(),
        ));
    }
    let units = pairs
        .map(|pair| <[u8; 2]>::try_from(pair).map(u16::from_be_bytes))
        .collect::<Result<Vec<u16>, _>>()
        .map_err(|e| PingError::Protocol(format!("legacy response is not UTF-16BE: {e}")))?;
    let text = String::from_utf16(&units)
        .map_err(|e| PingError::Protocol(format!("legacy response is not UTF-16: {e}")))?;

    if let Some(fields) = text.strip_prefix("§1\0") {
        let fields: Vec<&str> = fields.split('\0').collect();
        let [protocol, version, _motd, online, max] = fields.as_slice() else {
            return Err(PingError::Protocol(format!(
                "legacy response has {} fields, expected 5",
                fields.len()
            )));
        };
        return Ok(ServerStatus {
            version_name: Some((*version).to_owned()),
            protocol: protocol.parse().ok(),
            players_online: parse_count(online)?,
            players_max: parse_count(max)?,
            sample_names: Vec::new(),
            legacy: true,
        });
    }

    let mut fields = text.rsplitn(3, '§');
    match (fields.next(), fields.next(), fields.next()) {
        (Some(max), Some(online), Some(_motd)) => Ok(ServerStatus {
            version_name: None,
            protocol: None,
            players_online: parse_count(online)?,
            players_max: parse_count(max)?,
            sample_names: Vec::new(),
            legacy: true,
        }),
        _ => Err(PingError::Protocol(format!(
            "unrecognized legacy response {text:?}"
        ))),
    }
}

fn parse_count(field: &str) -> Result<u32, PingError> {
    field
        .trim()
        .parse::<i64>()
        .map(clamp_count)
        .map_err(|e| PingError::Protocol(format!("invalid player count {field:?}: {e}")))
}

/// Servers and proxies sometimes report negative or absurd counts.
fn clamp_count(count: i64) -> u32 {
    u32::try_from(count.max(0)).unwrap_or(u32::MAX)
}
