//! Event bridge: one SSE connection per subscription.
//!
//! Connection problems never raise. The documented consequence of a broken
//! stream is loss of live refresh, so errors are logged, the health signal
//! flips to [`StreamHealth::Disconnected`], and the subscriber's handler
//! simply stops being called.

use cc_switch_protocol::EventEnvelope;
use eventsource_stream::Eventsource;
use futures::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::BackendConfig;

/// Observable connection state of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamHealth {
    /// No backend configuration could be resolved; the subscription is inert.
    Unconfigured,
    Connecting,
    Connected,
    /// The connection failed, errored, or ended. There is no reconnect.
    Disconnected,
}

/// A live (or inert) event subscription. Dropping it unsubscribes.
pub struct Subscription {
    handle: Option<JoinHandle<()>>,
    health: watch::Receiver<StreamHealth>,
}

impl Subscription {
    pub(crate) fn unavailable() -> Self {
        let (_tx, rx) = watch::channel(StreamHealth::Unconfigured);
        Self {
            handle: None,
            health: rx,
        }
    }

    /// Current connection health.
    pub fn health(&self) -> StreamHealth {
        *self.health.borrow()
    }

    /// A watch handle for asserting on health transitions.
    pub fn health_changes(&self) -> watch::Receiver<StreamHealth> {
        self.health.clone()
    }

    /// Closes the connection and drops the handler. Idempotent.
    pub fn unsubscribe(&self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

pub(crate) fn subscribe<F>(
    http: reqwest::Client,
    config: BackendConfig,
    event: &str,
    handler: F,
) -> Subscription
where
    F: Fn(EventEnvelope) + Send + Sync + 'static,
{
    let (tx, rx) = watch::channel(StreamHealth::Connecting);
    let event = event.to_string();
    let handle = tokio::spawn(run_stream(http, config, event, handler, tx));
    Subscription {
        handle: Some(handle),
        health: rx,
    }
}

async fn run_stream<F>(
    http: reqwest::Client,
    config: BackendConfig,
    event: String,
    handler: F,
    health: watch::Sender<StreamHealth>,
) where
    F: Fn(EventEnvelope) + Send + Sync + 'static,
{
    let mut request = http.get(config.events_url());
    if let Some(token) = &config.token {
        // SSE cannot carry custom headers, so the token rides the query string.
        request = request.query(&[("token", token)]);
    }

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(%event, error = %e, "event stream connection failed");
            let _ = health.send(StreamHealth::Disconnected);
            return;
        }
    };
    if !response.status().is_success() {
        tracing::warn!(%event, status = %response.status(), "event stream refused");
        let _ = health.send(StreamHealth::Disconnected);
        return;
    }
    let _ = health.send(StreamHealth::Connected);

    let mut stream = response.bytes_stream().eventsource();
    while let Some(item) = stream.next().await {
        match item {
            Ok(message) if message.event == event => {
                match serde_json::from_str(&message.data) {
                    Ok(payload) => handler(EventEnvelope::new(event.clone(), payload)),
                    // Dropped, not raised: a bad payload costs one update.
                    Err(e) => {
                        tracing::warn!(%event, error = %e, "dropping event with unparseable payload");
                    }
                }
            }
            // Other event names and keep-alive comments are not ours.
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(%event, error = %e, "event stream error");
                break;
            }
        }
    }
    let _ = health.send(StreamHealth::Disconnected);
}
