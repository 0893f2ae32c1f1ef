//! Channel event envelopes queued by the page.
//!
//! Envelope shape, as produced by `channel.html`:
//!
//! ```json
//! {"type": "onmessage", "payLoad": {"data": "{\"foo\":\"bar\"}"}}
//! ```
//!
//! `data` is itself a JSON document encoded as a string and is decoded in a
//! second pass.

use channel_common::BridgeError;
use serde_json::{json, Value};

use crate::json::{self, JsonMap};

/// Key holding the event type.
pub const TYPE_KEY: &str = "type";
/// Key holding the event payload, spelled as the page spells it.
pub const PAYLOAD_KEY: &str = "payLoad";
/// Accepted alternative spelling of [`PAYLOAD_KEY`].
pub const PAYLOAD_KEY_ALIAS: &str = "payload";

/// Event type, decoded once from the envelope's `type` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Open,
    Message,
    Close,
    Error,
    Unrecognized(String),
}

impl MessageKind {
    pub fn from_type(value: &str) -> Self {
        match value {
            "onopen" => Self::Open,
            "onmessage" => Self::Message,
            "onclose" => Self::Close,
            "onerror" => Self::Error,
            other => Self::Unrecognized(other.to_owned()),
        }
    }

    /// The wire string for this kind.
    pub fn as_type(&self) -> &str {
        match self {
            Self::Open => "onopen",
            Self::Message => "onmessage",
            Self::Close => "onclose",
            Self::Error => "onerror",
            Self::Unrecognized(other) => other,
        }
    }
}

/// One decoded channel event.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeMessage {
    Open,
    /// Channel data, already decoded from its inner JSON string.
    Message(JsonMap),
    Close,
    Error { code: i32, description: String },
}

impl BridgeMessage {
    /// Decode an envelope string returned by the page.
    pub fn parse(raw: &str) -> Result<Self, BridgeError> {
        let envelope = json::decode_object(raw)?;
        Self::from_envelope(&envelope)
    }

    /// Decode an already-parsed envelope.
    pub fn from_envelope(envelope: &JsonMap) -> Result<Self, BridgeError> {
        let kind = match envelope.get(TYPE_KEY) {
            Some(Value::String(t)) => MessageKind::from_type(t),
            Some(_) => return Err(invalid("`type` is not a string")),
            None => return Err(invalid("missing `type`")),
        };

        match kind {
            MessageKind::Unrecognized(t) => Err(BridgeError::UnrecognizedType(t)),
            MessageKind::Open => payload_of(envelope).map(|_| Self::Open),
            MessageKind::Close => payload_of(envelope).map(|_| Self::Close),
            MessageKind::Message => {
                let data = payload_of(envelope)?
                    .get("data")
                    .and_then(Value::as_str)
                    .ok_or_else(|| invalid("onmessage payload has no string `data`"))?;
                Ok(Self::Message(json::decode_object(data)?))
            }
            MessageKind::Error => {
                let payload = payload_of(envelope)?;
                let code = payload
                    .get("code")
                    .and_then(coerce_i32)
                    .ok_or_else(|| invalid("onerror payload has no numeric `code`"))?;
                let description = payload
                    .get("description")
                    .and_then(Value::as_str)
                    .ok_or_else(|| invalid("onerror payload has no string `description`"))?;
                Ok(Self::Error {
                    code,
                    description: description.to_owned(),
                })
            }
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Open => MessageKind::Open,
            Self::Message(_) => MessageKind::Message,
            Self::Close => MessageKind::Close,
            Self::Error { .. } => MessageKind::Error,
        }
    }

    /// Build the envelope the page would queue for this event.
    pub fn to_envelope(&self) -> Value {
        let payload = match self {
            Self::Open | Self::Close => json!({}),
            Self::Message(data) => {
                json!({ "data": Value::Object(data.clone()).to_string() })
            }
            Self::Error { code, description } => {
                json!({ "code": code, "description": description })
            }
        };
        json!({ TYPE_KEY: self.kind().as_type(), PAYLOAD_KEY: payload })
    }
}

fn payload_of(envelope: &JsonMap) -> Result<&JsonMap, BridgeError> {
    envelope
        .get(PAYLOAD_KEY)
        .or_else(|| envelope.get(PAYLOAD_KEY_ALIAS))
        .ok_or_else(|| invalid("missing `payLoad`"))?
        .as_object()
        .ok_or_else(|| invalid("`payLoad` is not an object"))
}

/// Numeric code as a C `int`: integers wrap, floats truncate and saturate.
fn coerce_i32(value: &Value) -> Option<i32> {
    value
        .as_i64()
        .map(|n| n as i32)
        .or_else(|| value.as_u64().map(|n| n as i32))
        .or_else(|| value.as_f64().map(|n| n as i32))
}

fn invalid(reason: &str) -> BridgeError {
    BridgeError::InvalidEnvelope(reason.to_owned())
}
