//! Remote RPC client: one `POST /invoke` per command, single attempt.

use cc_switch_protocol::InvokeEnvelope;
use cc_switch_protocol::InvokeRequest;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::config::BackendConfig;
use crate::error::BridgeError;

/// How much of an unparseable error body is carried into the error message.
const BODY_SNIPPET_LEN: usize = 200;

/// Thin client for the service's `/invoke` endpoint.
#[derive(Debug, Clone, Default)]
pub struct RpcClient {
    http: reqwest::Client,
}

impl RpcClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Useful for tests or custom TLS/proxy configurations.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Sends `{command, args}` and unwraps the response envelope.
    ///
    /// The token, when configured, travels both as a query parameter and as
    /// a bearer header. Only the header is strictly required here; the query
    /// parameter mirrors the SSE transport, which cannot set headers.
    pub async fn call(
        &self,
        config: &BackendConfig,
        command: &str,
        args: Value,
    ) -> Result<Value, BridgeError> {
        tracing::debug!(command, "invoking backend command");

        let mut request = self
            .http
            .post(config.invoke_url())
            .header(CONTENT_TYPE, "application/json")
            .json(&InvokeRequest::new(command, args));
        if let Some(token) = &config.token {
            request = request.query(&[("token", token)]).bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        let envelope = serde_json::from_str::<InvokeEnvelope>(&body);

        if !status.is_success() {
            let message = match envelope {
                Ok(env) => env.error.unwrap_or_else(|| snippet(&body)),
                Err(_) => snippet(&body),
            };
            return Err(BridgeError::Http {
                status: status.as_u16(),
                message,
            });
        }

        match envelope {
            Ok(env) => env.into_result().map_err(BridgeError::Backend),
            Err(e) => Err(BridgeError::Protocol(format!(
                "body is not an invoke envelope: {e}"
            ))),
        }
    }

    /// Probes `GET /health`. True only when the service answers `{ok: true}`.
    pub async fn health(&self, config: &BackendConfig) -> Result<bool, BridgeError> {
        let response = self.http.get(config.health_url()).send().await?;
        if !response.status().is_success() {
            return Ok(false);
        }
        let body: Value = response.json().await.unwrap_or(Value::Null);
        Ok(body.get("ok").and_then(Value::as_bool).unwrap_or(false))
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "(empty body)".to_string();
    }
    let mut end = trimmed.len().min(BODY_SNIPPET_LEN);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].to_string()
}
