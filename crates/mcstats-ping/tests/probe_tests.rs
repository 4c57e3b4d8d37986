//! Integration tests for the liveness probe.
//!
//! Each test runs a fake game server on a loopback `TcpListener` and
//! points the probe at it, so the full exchange (connect, handshake,
//! response framing, fallback) runs over a real socket.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use mcstats_core::config::ProbeConfig;
use mcstats_ping::protocol::{STATUS_RESPONSE_ID, encode_packet, read_packet, write_string};
use mcstats_ping::{LivenessProbe, PingError, ServerListPing};
use mcstats_types::LivenessStatus;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

fn probe_for(port: u16, timeout_ms: u64) -> LivenessProbe {
    LivenessProbe::new(&ProbeConfig {
        address: String::from("127.0.0.1"),
        port,
        timeout_ms,
        fallback_max_players: 40,
        enable_srv: false,
    })
}

fn offline() -> LivenessStatus {
    LivenessStatus {
        online: false,
        player_count: 0,
        max_players: 40,
        online_names: Vec::new(),
    }
}

/// Read the handshake and status request, then answer with `json`.
///
/// The connection stays open afterwards, as a real server keeps it for
/// the ping packet that follows.
async fn answer_modern(mut stream: TcpStream, json: &str) -> Result<(), PingError> {
    let (handshake_id, _) = read_packet(&mut stream).await?;
    let (request_id, request) = read_packet(&mut stream).await?;
    if handshake_id != 0x00 || request_id != 0x00 || !request.is_empty() {
        return Err(PingError::Protocol(String::from("unexpected request")));
    }

    let mut payload = Vec::new();
    write_string(&mut payload, json)?;
    let packet = encode_packet(STATUS_RESPONSE_ID, &payload)?;
    stream.write_all(&packet).await?;
    stream.flush().await?;

    let mut sink = Vec::new();
    stream.read_to_end(&mut sink).await?;
    Ok(())
}

/// Spawn a server that answers every connection with `json`.
async fn spawn_modern_server(json: impl Into<String>) -> u16 {
    let json = json.into();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let json = json.clone();
            tokio::spawn(async move {
                let _ = answer_modern(stream, &json).await;
            });
        }
    });
    port
}

/// Status JSON padded through its description to exactly `len` bytes.
fn status_json_of_len(len: usize) -> String {
    let base = r#"{"players":{"max":20,"online":1,"sample":[{"name":"Alex","id":"ec561538-f3fd-461d-aff5-086b22154bce"}]},"description":""}"#;
    let padded = base.replacen(
        r#""description":"""#,
        &format!(r#""description":"{}""#, "m".repeat(len - base.len())),
        1,
    );
    assert_eq!(padded.len(), len);
    padded
}

fn utf16be(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

#[tokio::test]
async fn test_probe_reports_sample_names() {
    let port = spawn_modern_server(
        r#"{
            "version": { "name": "1.20.4", "protocol": 765 },
            "players": {
                "max": 40,
                "online": 2,
                "sample": [
                    { "name": "Alex", "id": "ec561538-f3fd-461d-aff5-086b22154bce" },
                    { "name": "Steve", "id": "8667ba71-b85a-4004-af54-457a9734eed7" }
                ]
            },
            "description": { "text": "survival" }
        }"#,
    )
    .await;

    let status = probe_for(port, 2_000).probe().await;
    assert_eq!(
        status,
        LivenessStatus {
            online: true,
            player_count: 2,
            max_players: 40,
            online_names: vec![String::from("Alex"), String::from("Steve")],
        }
    );
}

#[tokio::test]
async fn test_probe_without_sample_is_online_with_no_names() {
    let port =
        spawn_modern_server(r#"{ "players": { "max": 20, "online": 3 }, "description": "" }"#)
            .await;

    let status = probe_for(port, 2_000).probe().await;
    assert!(status.online);
    assert_eq!(status.player_count, 3);
    assert_eq!(status.max_players, 20);
    assert!(status.online_names.is_empty());
}

#[tokio::test]
async fn test_probe_timeout_reports_offline() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        // Accept and hold the connection without ever answering.
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut sink = Vec::new();
        let _ = stream.read_to_end(&mut sink).await;
    });

    let status = probe_for(port, 200).probe().await;
    assert_eq!(status, offline());
}

#[tokio::test]
async fn test_query_timeout_is_timeout_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut sink = Vec::new();
        let _ = stream.read_to_end(&mut sink).await;
    });

    let client = ServerListPing::new("127.0.0.1", port, Duration::from_millis(150));
    let err = client.query().await.unwrap_err();
    assert!(matches!(err, PingError::Timeout(_)));
}

#[tokio::test]
async fn test_probe_connection_refused_reports_offline() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let status = probe_for(port, 2_000).probe().await;
    assert_eq!(status, offline());
}

#[tokio::test]
async fn test_probe_garbage_response_reports_offline() {
    let port = spawn_modern_server("this is not json").await;
    // The legacy fallback then stalls against a modern-only server, so
    // the deadline ends the attempt.
    let status = probe_for(port, 500).probe().await;
    assert_eq!(status, offline());
}

#[tokio::test]
async fn test_probe_falls_back_to_legacy_ping() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        // A pre-1.7 server does not understand the handshake and hangs up.
        let (mut first, _) = listener.accept().await.unwrap();
        let mut buf = [0_u8; 64];
        let _ = first.read(&mut buf).await;
        drop(first);

        // Then it answers the legacy ping with a kick packet.
        let (mut second, _) = listener.accept().await.unwrap();
        let mut ping = [0_u8; 2];
        second.read_exact(&mut ping).await.unwrap();
        assert_eq!(ping, [0xFE, 0x01]);

        let text = "§1\u{0}78\u{0}1.6.4\u{0}Old World\u{0}4\u{0}16";
        let chars = u16::try_from(text.encode_utf16().count()).unwrap();
        let mut kick = vec![0xFF];
        kick.extend_from_slice(&chars.to_be_bytes());
        kick.extend(utf16be(text));
        second.write_all(&kick).await.unwrap();
    });

    let client = ServerListPing::new("127.0.0.1", port, Duration::from_secs(2));
    let status = client.query().await.unwrap();
    assert!(status.legacy);
    assert_eq!(status.players_online, 4);
    assert_eq!(status.players_max, 16);
    assert!(status.sample_names.is_empty());
}

#[tokio::test]
async fn test_kick_on_handshake_is_read_as_legacy_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        // Answer the modern handshake straight away with a legacy kick.
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = [0_u8; 64];
        let _ = stream.read(&mut buf).await;

        let text = "§1\u{0}127\u{0}1.6.4\u{0}Old World\u{0}1\u{0}8";
        let chars = u16::try_from(text.encode_utf16().count()).unwrap();
        let mut kick = vec![0xFF];
        kick.extend_from_slice(&chars.to_be_bytes());
        kick.extend(utf16be(text));
        let _ = stream.write_all(&kick).await;
    });

    let status = probe_for(port, 2_000).probe().await;
    assert_eq!(
        status,
        LivenessStatus {
            online: true,
            player_count: 1,
            max_players: 8,
            online_names: Vec::new(),
        }
    );
}

#[tokio::test]
async fn test_reply_length_starting_with_ff_is_not_a_legacy_kick() {
    // Id byte + two byte string length + 252 bytes of JSON frames as 255,
    // encoded 0xFF 0x01.
    let json = status_json_of_len(252);
    let mut payload = Vec::new();
    write_string(&mut payload, &json).unwrap();
    assert_eq!(encode_packet(STATUS_RESPONSE_ID, &payload).unwrap()[0], 0xFF);

    let port = spawn_modern_server(json).await;
    let status = probe_for(port, 2_000).probe().await;
    assert_eq!(
        status,
        LivenessStatus {
            online: true,
            player_count: 1,
            max_players: 20,
            online_names: vec![String::from("Alex")],
        }
    );
}

#[tokio::test]
async fn test_reply_with_favicon_sized_payload() {
    let favicon = format!("data:image/png;base64,{}", "A".repeat(40_000));
    let json = format!(
        r#"{{
            "version": {{ "name": "1.20.4", "protocol": 765 }},
            "players": {{ "max": 64, "online": 0 }},
            "description": {{ "text": "big" }},
            "favicon": "{favicon}"
        }}"#
    );

    let port = spawn_modern_server(json).await;
    let status = ServerListPing::new("127.0.0.1", port, Duration::from_secs(2))
        .query()
        .await
        .unwrap();
    assert!(!status.legacy);
    assert_eq!(status.players_max, 64);
    assert_eq!(status.version_name.as_deref(), Some("1.20.4"));
}
