//! Error types for the web bridge.

use thiserror::Error;

/// Errors surfaced by bridge operations.
///
/// Expected failure modes of the import/export handlers (bad file, cancelled
/// picker) are not represented here; those come back as structured
/// `{success, message}` result objects so the UI can render them inline.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// No backend base URL could be resolved.
    #[error("backend is not configured: {0}")]
    NotConfigured(String),

    /// The HTTP request could not complete.
    #[error("request to backend failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success HTTP status.
    #[error("backend returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body was not the expected `{ok, data|error}` envelope.
    #[error("unexpected response from backend: {0}")]
    Protocol(String),

    /// The backend answered with an explicit `ok: false` envelope.
    #[error("{0}")]
    Backend(String),

    /// A local command received missing or mistyped arguments.
    #[error("invalid arguments for {command}: {reason}")]
    InvalidArgs {
        command: &'static str,
        reason: String,
    },

    /// A host affordance (download, open URL) failed.
    #[error("shell operation failed: {0}")]
    Shell(String),

    /// Serialization failed while preparing an export.
    #[error("failed to serialize snapshot: {0}")]
    Codec(#[from] serde_json::Error),
}
