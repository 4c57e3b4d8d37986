//! Wire framing for the Server List Ping exchange.
//!
//! Every modern packet is `VarInt(length) VarInt(packet id) payload`,
//! where `length` covers the id and payload. A `VarInt` stores 7 bits per
//! byte, least significant group first, with the high bit set on every
//! byte but the last; an `i32` takes at most five bytes. Strings are a
//! `VarInt` byte length followed by UTF-8.

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::PingError;

/// Longest encoding of a 32-bit `VarInt`.
pub const MAX_VARINT_BYTES: usize = 5;

/// Largest packet accepted from a server (favicons make status responses
/// tens of kilobytes; nothing legitimate comes close to this).
pub const MAX_PACKET_LEN: usize = 2 * 1024 * 1024;

/// Packet id of the handshake (serverbound) and the status response
/// (clientbound).
pub const HANDSHAKE_ID: i32 = 0x00;

/// Packet id of the status request.
pub const STATUS_REQUEST_ID: i32 = 0x00;

/// Packet id of the status response.
pub const STATUS_RESPONSE_ID: i32 = 0x00;

/// Protocol version sent when the client does not know the server's
/// version yet.
pub const PROTOCOL_VERSION_UNKNOWN: i32 = -1;

/// Handshake `next state` value selecting the status flow.
pub const NEXT_STATE_STATUS: i32 = 1;

/// Legacy (pre-1.7) server list ping.
pub const LEGACY_PING: [u8; 2] = [0xFE, 0x01];

/// Packet id of the legacy kick packet carrying the legacy status.
pub const LEGACY_KICK_ID: u8 = 0xFF;

const SEGMENT_BITS: u8 = 0x7F;
const CONTINUE_BIT: u8 = 0x80;

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Append `value` as a `VarInt`. Negative values use all five bytes.
pub fn write_varint(buf: &mut Vec<u8>, value: i32) {
    let mut remaining = u32::from_ne_bytes(value.to_ne_bytes());
    loop {
        let byte = remaining.to_le_bytes()[0] & SEGMENT_BITS;
        remaining = remaining.wrapping_shr(7);
        if remaining == 0 {
            buf.push(byte);
            return;
        }
        buf.push(byte | CONTINUE_BIT);
    }
}

/// Append a length-prefixed UTF-8 string.
///
/// # Errors
///
/// Returns [`PingError::Protocol`] if the string is too long to frame.
pub fn write_string(buf: &mut Vec<u8>, value: &str) -> Result<(), PingError> {
    let len = i32::try_from(value.len())
        .map_err(|e| PingError::Protocol(format!("string too long to encode: {e}")))?;
    write_varint(buf, len);
    buf.extend_from_slice(value.as_bytes());
    Ok(())
}

/// Frame a packet: `VarInt(len) VarInt(id) payload`.
///
/// # Errors
///
/// Returns [`PingError::Protocol`] if the packet exceeds
/// [`MAX_PACKET_LEN`].
pub fn encode_packet(id: i32, payload: &[u8]) -> Result<Vec<u8>, PingError> {
    let mut body = Vec::with_capacity(payload.len().saturating_add(MAX_VARINT_BYTES));
    write_varint(&mut body, id);
    body.extend_from_slice(payload);

    if body.len() > MAX_PACKET_LEN {
        return Err(PingError::Protocol(format!(
            "packet of {} bytes exceeds limit",
            body.len()
        )));
    }
    let len = i32::try_from(body.len())
        .map_err(|e| PingError::Protocol(format!("packet length overflow: {e}")))?;

    let mut packet = Vec::with_capacity(body.len().saturating_add(MAX_VARINT_BYTES));
    write_varint(&mut packet, len);
    packet.extend_from_slice(&body);
    Ok(packet)
}

/// Payload of the handshake packet that switches the connection to the
/// status flow.
///
/// # Errors
///
/// Returns [`PingError::Protocol`] if the address cannot be framed.
pub fn handshake_payload(address: &str, port: u16) -> Result<Vec<u8>, PingError> {
    let mut payload = Vec::with_capacity(address.len().saturating_add(16));
    write_varint(&mut payload, PROTOCOL_VERSION_UNKNOWN);
    write_string(&mut payload, address)?;
    payload.extend_from_slice(&port.to_be_bytes());
    write_varint(&mut payload, NEXT_STATE_STATUS);
    Ok(payload)
}

/// The bytes a client sends to request status: handshake followed by
/// the empty status request.
///
/// # Errors
///
/// Returns [`PingError::Protocol`] if the address cannot be framed.
pub fn status_request(address: &str, port: u16) -> Result<Vec<u8>, PingError> {
    let mut request = encode_packet(HANDSHAKE_ID, &handshake_payload(address, port)?)?;
    request.extend(encode_packet(STATUS_REQUEST_ID, &[])?);
    Ok(request)
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Incremental `VarInt` decoder fed one byte at a time.
#[derive(Debug, Default)]
struct VarIntDecoder {
    value: u32,
    shift: u32,
    read: usize,
}

impl VarIntDecoder {
    /// Feed the next byte. Returns the value once the final byte arrives.
    fn push(&mut self, byte: u8) -> Result<Option<i32>, PingError> {
        self.read = self.read.saturating_add(1);
        if self.read > MAX_VARINT_BYTES {
            return Err(PingError::Protocol("VarInt is too long".to_owned()));
        }

        self.value |= u32::from(byte & SEGMENT_BITS).wrapping_shl(self.shift);
        self.shift = self.shift.saturating_add(7);

        if byte & CONTINUE_BIT == 0 {
            Ok(Some(i32::from_ne_bytes(self.value.to_ne_bytes())))
        } else {
            Ok(None)
        }
    }
}

/// Decode a `VarInt` from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed.
///
/// # Errors
///
/// Returns [`PingError::Protocol`] if the input ends early or the
/// encoding is longer than five bytes.
pub fn decode_varint(bytes: &[u8]) -> Result<(i32, usize), PingError> {
    let mut decoder = VarIntDecoder::default();
    for (index, &byte) in bytes.iter().enumerate() {
        if let Some(value) = decoder.push(byte)? {
            return Ok((value, index.saturating_add(1)));
        }
    }
    Err(PingError::Protocol("truncated VarInt".to_owned()))
}

/// Decode a length-prefixed UTF-8 string from the front of `bytes`.
///
/// Returns the string and the number of bytes consumed.
///
/// # Errors
///
/// Returns [`PingError::Protocol`] on a negative or overlong length, or
/// invalid UTF-8.
pub fn decode_string(bytes: &[u8]) -> Result<(&str, usize), PingError> {
    let (len, prefix) = decode_varint(bytes)?;
    let len = usize::try_from(len)
        .map_err(|e| PingError::Protocol(format!("negative string length {len}: {e}")))?;
    let end = prefix
        .checked_add(len)
        .filter(|end| *end <= bytes.len())
        .ok_or_else(|| PingError::Protocol(format!("string of {len} bytes is truncated")))?;
    let raw = bytes
        .get(prefix..end)
        .ok_or_else(|| PingError::Protocol("string out of bounds".to_owned()))?;
    let text = std::str::from_utf8(raw)
        .map_err(|e| PingError::Protocol(format!("string is not UTF-8: {e}")))?;
    Ok((text, end))
}

/// Read a `VarInt` from an async stream.
///
/// # Errors
///
/// Returns [`PingError::Io`] if the stream ends, or
/// [`PingError::Protocol`] on an overlong encoding.
pub async fn read_varint<R>(reader: &mut R) -> Result<i32, PingError>
where
    R: AsyncRead + Unpin,
{
    let mut decoder = VarIntDecoder::default();
    loop {
        let byte = reader.read_u8().await?;
        if let Some(value) = decoder.push(byte)? {
            return Ok(value);
        }
    }
}

/// Read one framed packet and return its id and payload.
///
/// # Errors
///
/// Returns [`PingError::Protocol`] if the length is out of range or the
/// id is malformed, or [`PingError::Io`] if the stream ends early.
pub async fn read_packet<R>(reader: &mut R) -> Result<(i32, Vec<u8>), PingError>
where
    R: AsyncRead + Unpin,
{
    let len = read_varint(reader).await?;
    let len = usize::try_from(len)
        .ok()
        .filter(|len| (1..=MAX_PACKET_LEN).contains(len))
        .ok_or_else(|| PingError::Protocol(format!("invalid packet length {len}")))?;

    let mut body = vec![0_u8; len];
    reader.read_exact(&mut body).await?;

    let (id, consumed) = decode_varint(&body)?;
    let payload = body.split_off(consumed);
    Ok((id, payload))
}

/// Bytes of a status reply needed to tell a legacy kick from a modern
/// frame.
pub const LEGACY_KICK_PREFIX_LEN: usize = 5;

/// Whether the first bytes of a status reply are a `§`-prefixed legacy
/// kick rather than the length of a modern frame.
///
/// A kick is `0xFF`, a big-endian char count, then UTF-16BE text that
/// starts with `§` (`0x00 0xA7`). A modern length can also start with
/// `0xFF`. When the next byte ends the length `VarInt`, the packet id
/// follows and then the string length, which cannot be zero in a frame
/// that long. Any longer length sets the high bit of the second byte,
/// which a kick's char count never does.
pub fn is_legacy_kick(prefix: &[u8; LEGACY_KICK_PREFIX_LEN]) -> bool {
    matches!(
        prefix,
        [LEGACY_KICK_ID, count_hi, _, 0x00, 0xA7] if *count_hi < CONTINUE_BIT
    )
}

/// Read the body of a legacy kick packet after its `0xFF` id byte.
///
/// Returns the raw UTF-16BE reason bytes.
///
/// # Errors
///
/// Returns [`PingError::Io`] if the stream ends early.
pub async fn read_legacy_kick<R>(reader: &mut R) -> Result<Vec<u8>, PingError>
where
    R: AsyncRead + Unpin,
{
    let chars = reader.read_u16().await?;
    let mut raw = vec![0_u8; usize::from(chars).saturating_mul(2)];
    reader.read_exact(&mut raw).await?;
    Ok(raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn encode(value: i32) -> Vec<u8> {
        let mut buf = Vec::new();
        write_varint(&mut buf, value);
        buf
    }

    #[test]
    fn varint_known_encodings() {
        assert_eq!(encode(0), [0x00]);
        assert_eq!(encode(1), [0x01]);
        assert_eq!(encode(127), [0x7F]);
        assert_eq!(encode(128), [0x80, 0x01]);
        assert_eq!(encode(255), [0xFF, 0x01]);
        assert_eq!(encode(25565), [0xDD, 0xC7, 0x01]);
        assert_eq!(encode(2_147_483_647), [0xFF, 0xFF, 0xFF, 0xFF, 0x07]);
        assert_eq!(encode(-1), [0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
    }

    #[test]
    fn varint_decodes_negative_one() {
        assert_eq!(
            decode_varint(&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F, 0xAA]).unwrap(),
            (-1, 5)
        );
    }

    #[test]
    fn varint_rejects_six_bytes() {
        let err = decode_varint(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]).unwrap_err();
        assert!(matches!(err, PingError::Protocol(_)));
    }

    #[test]
    fn varint_rejects_truncation() {
        assert!(decode_varint(&[0x80]).is_err());
        assert!(decode_varint(&[]).is_err());
    }

    #[test]
    fn handshake_layout() {
        let payload = handshake_payload("mc", 25565).unwrap();
        assert_eq!(
            payload,
            [
                0xFF, 0xFF, 0xFF, 0xFF, 0x0F, // protocol -1
                0x02, b'm', b'c', // address
                0x63, 0xDD, // port
                0x01, // next state
            ]
        );
    }

    #[test]
    fn status_request_frames_both_packets() {
        let request = status_request("mc", 25565).unwrap();
        // handshake: len 12, id 0, 11 payload bytes; request: len 1, id 0
        assert_eq!(request.first(), Some(&12));
        assert_eq!(request.len(), 13 + 2);
        assert_eq!(&request[13..], &[0x01, 0x00]);
    }

    #[test]
    fn string_decoding_checks_bounds() {
        let mut buf = Vec::new();
        write_string(&mut buf, "{\"a\":1}").unwrap();
        assert_eq!(decode_string(&buf).unwrap(), ("{\"a\":1}", buf.len()));
        assert!(decode_string(&buf[..buf.len() - 1]).is_err());
    }

    #[tokio::test]
    async fn reads_framed_packet_from_stream() {
        let mut payload = Vec::new();
        write_string(&mut payload, "hello").unwrap();
        let packet = encode_packet(STATUS_RESPONSE_ID, &payload).unwrap();

        let mut reader = packet.as_slice();
        let (id, body) = read_packet(&mut reader).await.unwrap();
        assert_eq!(id, STATUS_RESPONSE_ID);
        assert_eq!(decode_string(&body).unwrap().0, "hello");
    }

    #[tokio::test]
    async fn rejects_zero_length_packet() {
        let mut reader: &[u8] = &[0x00];
        assert!(matches!(
            read_packet(&mut reader).await,
            Err(PingError::Protocol(_))
        ));
    }

    #[test]
    fn legacy_kick_prefix_is_recognized() {
        // "§1..." with a 20 char reason.
        assert!(is_legacy_kick(&[0xFF, 0x00, 0x14, 0x00, 0xA7]));
        // Pre-1.4 reason without the marker.
        assert!(!is_legacy_kick(&[0xFF, 0x00, 0x14, 0x00, 0x41]));
    }

    #[test]
    fn modern_length_starting_with_ff_is_not_a_kick() {
        // Frame lengths 255, 383, 16383 and 40063.
        for text_len in [252, 380, 16_380, 40_059] {
            let mut payload = Vec::new();
            write_string(&mut payload, &"x".repeat(text_len)).unwrap();
            let packet = encode_packet(STATUS_RESPONSE_ID, &payload).unwrap();
            assert_eq!(packet[0], 0xFF);
            let prefix: [u8; LEGACY_KICK_PREFIX_LEN] = packet[..LEGACY_KICK_PREFIX_LEN]
                .try_into()
                .unwrap();
            assert!(!is_legacy_kick(&prefix), "{text_len} byte reply misread as a kick");
        }
    }

    #[tokio::test]
    async fn reads_legacy_kick_body() {
        let mut reader: &[u8] = &[0x00, 0x02, 0x00, 0x41, 0x00, 0x42];
        assert_eq!(
            read_legacy_kick(&mut reader).await.unwrap(),
            [0x00, 0x41, 0x00, 0x42]
        );
    }
}
