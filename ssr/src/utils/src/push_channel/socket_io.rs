//! Engine.IO v4 / Socket.IO v5 text framing on the default namespace.

use consts::{RECONNECT_DELAY, RECONNECT_DELAY_MAX};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use web_time::Duration;

use crate::events::PushFrame;

/// Joins the default namespace once the engine handshake arrives.
pub const NAMESPACE_CONNECT: &str = "40";
pub const PONG: &str = "3";

const ENGINE_PATH: &str = "/socket.io/";
const ENGINE_QUERY: &str = "EIO=4&transport=websocket";

#[derive(Clone, Debug, PartialEq)]
pub enum Packet {
    /// Engine handshake. The client answers with [`NAMESPACE_CONNECT`].
    Open,
    Close,
    Ping,
    Pong,
    Noop,
    /// The server accepted the namespace connect.
    Connected,
    /// The server left the namespace.
    Disconnected,
    ConnectError(String),
    Event(PushFrame),
}

#[derive(Debug, Error)]
pub enum PacketError {
    #[error("empty packet")]
    Empty,
    #[error("unsupported packet type `{0}`")]
    Unsupported(String),
    #[error("malformed event payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("event packet without a name")]
    MissingName,
}

#[derive(Deserialize)]
struct ConnectErrorWire {
    message: String,
}

/// Websocket endpoint of the Socket.IO server at `origin`.
pub fn endpoint(origin: &Url) -> Url {
    let mut url = origin.clone();
    let scheme = match url.scheme() {
        "http" => Some("ws"),
        "https" => Some("wss"),
        _ => None,
    };
    if let Some(scheme) = scheme {
        // http(s) -> ws(s) is always accepted
        let _ = url.set_scheme(scheme);
    }
    url.set_path(ENGINE_PATH);
    url.set_query(Some(ENGINE_QUERY));
    url
}

pub fn decode(raw: &str) -> Result<Packet, PacketError> {
    let (kind, body) = split_type(raw)?;
    match kind {
        '0' => Ok(Packet::Open),
        '1' => Ok(Packet::Close),
        '2' => Ok(Packet::Ping),
        '3' => Ok(Packet::Pong),
        '4' => decode_message(body),
        '6' => Ok(Packet::Noop),
        other => Err(PacketError::Unsupported(other.to_string())),
    }
}

fn split_type(raw: &str) -> Result<(char, &str), PacketError> {
    let mut chars = raw.chars();
    let kind = chars.next().ok_or(PacketError::Empty)?;
    Ok((kind, chars.as_str()))
}

fn decode_message(raw: &str) -> Result<Packet, PacketError> {
    let (kind, body) = split_type(raw)?;
    match kind {
        '0' => Ok(Packet::Connected),
        '1' => Ok(Packet::Disconnected),
        '2' => decode_event(body),
        '4' => Ok(Packet::ConnectError(connect_error_reason(body))),
        other => Err(PacketError::Unsupported(format!("4{other}"))),
    }
}

fn decode_event(body: &str) -> Result<Packet, PacketError> {
    // optional ack id precedes the payload
    let body = body.trim_start_matches(|c: char| c.is_ascii_digit());
    let mut parts = serde_json::from_str::<Vec<Value>>(body)?.into_iter();
    let Some(Value::String(event)) = parts.next() else {
        return Err(PacketError::MissingName);
    };
    let data = parts.next().unwrap_or(Value::Null);
    Ok(Packet::Event(PushFrame::new(event, data)))
}

fn connect_error_reason(body: &str) -> String {
    match serde_json::from_str::<ConnectErrorWire>(body) {
        Ok(wire) => wire.message,
        Err(_) if !body.is_empty() => body.to_string(),
        Err(_) => "namespace connect refused".to_string(),
    }
}

pub fn encode_event(frame: &PushFrame) -> Result<String, serde_json::Error> {
    let payload = serde_json::to_string(&(&frame.event, &frame.data))?;
    Ok(format!("42{payload}"))
}

/// Exponential backoff between reconnect attempts, capped.
pub fn reconnect_delay(attempt: u32) -> Duration {
    1u32.checked_shl(attempt)
        .and_then(|factor| RECONNECT_DELAY.checked_mul(factor))
        .map_or(RECONNECT_DELAY_MAX, |delay| delay.min(RECONNECT_DELAY_MAX))
}
