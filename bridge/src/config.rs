//! Backend locator: resolves the web service's base URL and access token.
//!
//! Resolution is repeated on every operation; nothing is cached. The base
//! comes from `CC_SWITCH_WEB_URL`, falling back to the hosting page's origin
//! when the UI is served by the backend itself.

use cc_switch_protocol::EVENTS_PATH;
use cc_switch_protocol::HEALTH_PATH;
use cc_switch_protocol::INVOKE_PATH;

/// Environment variable naming the backend base URL.
pub const BASE_URL_ENV: &str = "CC_SWITCH_WEB_URL";

/// Environment variable naming the optional access token.
pub const TOKEN_ENV: &str = "CC_SWITCH_WEB_TOKEN";

/// A resolved backend endpoint. Lifetime is one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Normalized base URL: trimmed, no trailing slash, non-empty.
    pub base_url: String,
    /// Access token, if one is configured.
    pub token: Option<String>,
}

impl BackendConfig {
    pub fn invoke_url(&self) -> String {
        format!("{}{INVOKE_PATH}", self.base_url)
    }

    pub fn events_url(&self) -> String {
        format!("{}{EVENTS_PATH}", self.base_url)
    }

    pub fn health_url(&self) -> String {
        format!("{}{HEALTH_PATH}", self.base_url)
    }
}

/// Resolves the backend configuration from the process environment, with
/// `origin` as the fallback base.
///
/// Returns `None` when no usable base can be determined. Callers must treat
/// that as "remote operations unavailable", not as something to retry.
pub fn resolve(origin: Option<&str>) -> Option<BackendConfig> {
    resolve_from(|key| std::env::var(key).ok(), origin)
}

/// [`resolve`] with an injectable environment, for tests.
pub fn resolve_from(
    env: impl Fn(&str) -> Option<String>,
    origin: Option<&str>,
) -> Option<BackendConfig> {
    let configured = env(BASE_URL_ENV).map(normalize_base).unwrap_or_default();

    let base_url = if configured.is_empty() {
        origin.map(normalize_base).unwrap_or_default()
    } else {
        configured
    };
    if base_url.is_empty() {
        return None;
    }

    let token = env(TOKEN_ENV)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    Some(BackendConfig { base_url, token })
}

fn normalize_base(raw: impl AsRef<str>) -> String {
    raw.as_ref().trim().trim_end_matches('/').to_string()
}
