//! Wire types shared between the CC Switch web bridge and the web service.
//!
//! The service exposes two endpoints: `POST /invoke` carrying an
//! [`InvokeRequest`] and answering with an [`InvokeEnvelope`], and
//! `GET /events`, a server-sent-event stream whose messages the bridge
//! re-wraps as [`EventEnvelope`]s for its subscribers.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// Path of the command endpoint, relative to the backend base URL.
pub const INVOKE_PATH: &str = "/invoke";

/// Path of the SSE event stream.
pub const EVENTS_PATH: &str = "/events";

/// Path of the liveness endpoint.
pub const HEALTH_PATH: &str = "/health";

/// Body of a `POST /invoke` request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvokeRequest {
    pub command: String,
    #[serde(default)]
    pub args: Value,
}

impl InvokeRequest {
    pub fn new(command: impl Into<String>, args: Value) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

/// Response envelope for `/invoke`.
///
/// `ok` is the authoritative discriminant between success and failure.
/// The HTTP status is an independent signal and is checked separately by
/// the RPC client; this type only models the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeEnvelope {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InvokeEnvelope {
    pub fn ok(data: Value) -> Self {
        Self {
            ok: true,
            data,
            error: None,
        }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: Value::Null,
            error: Some(error.into()),
        }
    }

    /// Splits the envelope into the caller-facing result.
    pub fn into_result(self) -> Result<Value, String> {
        if self.ok {
            Ok(self.data)
        } else {
            Err(self
                .error
                .unwrap_or_else(|| "backend reported an unspecified error".to_string()))
        }
    }
}

/// Event delivered to an event-bridge subscriber.
///
/// `id` is always `0`: the SSE transport carries no sequence identity,
/// unlike the native event model this envelope mimics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventEnvelope {
    pub event: String,
    pub id: u64,
    pub payload: Value,
}

impl EventEnvelope {
    pub fn new(event: impl Into<String>, payload: Value) -> Self {
        Self {
            event: event.into(),
            id: 0,
            payload,
        }
    }
}

/// A configuration snapshot as produced by `get_snapshot` and consumed by
/// `apply_snapshot`.
///
/// Only `format` and `sql` are meaningful to the bridge; everything else is
/// opaque payload carried through the flattened map.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Snapshot {
    /// Whether the snapshot declares itself to be a raw SQL dump.
    pub fn declares_sql(&self) -> bool {
        self.format.as_deref() == Some("sql")
    }
}
