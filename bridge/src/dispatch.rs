//! Command dispatcher: the bridge's public entry point.
//!
//! Every invocation resolves the backend configuration fresh, then either
//! runs a local emulation handler or forwards the command verbatim to the
//! RPC client. Routing is a registry over [`LocalCommand::ROUTES`] so the
//! set of locally-handled commands stays mechanically checkable.

use cc_switch_protocol::EventEnvelope;
use cc_switch_protocol::Snapshot;
use serde_json::Value;
use serde_json::json;

use crate::client::RpcClient;
use crate::config;
use crate::config::BASE_URL_ENV;
use crate::config::BackendConfig;
use crate::error::BridgeError;
use crate::events;
use crate::events::Subscription;
use crate::files;
use crate::files::FileTokenPool;
use crate::shell::Shell;
use crate::snapshot::detect_import;
use crate::snapshot::plan_export;

/// Filename offered when the caller does not name one.
pub const DEFAULT_EXPORT_FILENAME: &str = "cc-switch-export.json";

/// Picker filter for the open-file dialog: JSON, SQL, or plain text.
pub const OPEN_DIALOG_ACCEPT: &str = ".json,.sql,.txt,application/json,text/plain";

/// Commands handled locally instead of being forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalCommand {
    OpenFileDialog,
    SaveFileDialog,
    OpenExternal,
    ExportConfig,
    ImportConfig,
}

impl LocalCommand {
    /// The exhaustive local routing table. Anything absent from this table
    /// is passed through to the backend unchanged.
    pub const ROUTES: [(&'static str, LocalCommand); 5] = [
        ("open_file_dialog", LocalCommand::OpenFileDialog),
        ("save_file_dialog", LocalCommand::SaveFileDialog),
        ("open_external", LocalCommand::OpenExternal),
        ("export_config_to_file", LocalCommand::ExportConfig),
        ("import_config_from_file", LocalCommand::ImportConfig),
    ];

    pub fn lookup(command: &str) -> Option<LocalCommand> {
        LocalCommand::ROUTES
            .iter()
            .find(|(name, _)| *name == command)
            .map(|(_, route)| *route)
    }
}

/// The web bridge: translates native-style `invoke`/`listen` calls into
/// HTTP and SSE traffic against the CC Switch web service.
pub struct Bridge<S: Shell> {
    shell: S,
    client: RpcClient,
    pool: FileTokenPool,
}

impl<S: Shell> Bridge<S> {
    pub fn new(shell: S) -> Self {
        Self::with_client(shell, RpcClient::new())
    }

    /// Useful for tests or custom TLS/proxy configurations.
    pub fn with_client(shell: S, client: RpcClient) -> Self {
        Self {
            shell,
            client,
            pool: FileTokenPool::default(),
        }
    }

    /// Invokes a command by name.
    ///
    /// Fails with [`BridgeError::NotConfigured`] when no backend base URL
    /// can be resolved, regardless of whether the command is local.
    pub async fn invoke(&self, command: &str, args: Value) -> Result<Value, BridgeError> {
        let config = self.config()?;
        match LocalCommand::lookup(command) {
            Some(LocalCommand::OpenFileDialog) => self.open_file_dialog().await,
            Some(LocalCommand::SaveFileDialog) => Ok(save_file_dialog(&args)),
            Some(LocalCommand::OpenExternal) => self.open_external(&args),
            Some(LocalCommand::ExportConfig) => self.export_config(&config, &args).await,
            Some(LocalCommand::ImportConfig) => self.import_config(&config, &args).await,
            None => self.client.call(&config, command, args).await,
        }
    }

    /// Subscribes to a pushed event by name.
    ///
    /// Best-effort by contract: an unresolvable configuration yields an
    /// inert subscription rather than an error, and connection failures
    /// only show up on the subscription's health signal.
    pub fn listen(
        &self,
        event: &str,
        handler: impl Fn(EventEnvelope) + Send + Sync + 'static,
    ) -> Subscription {
        match self.resolve_config() {
            Some(config) => events::subscribe(self.client.http().clone(), config, event, handler),
            None => Subscription::unavailable(),
        }
    }

    /// Probes the backend's liveness endpoint.
    pub async fn health_check(&self) -> Result<bool, BridgeError> {
        let config = self.config()?;
        self.client.health(&config).await
    }

    fn resolve_config(&self) -> Option<BackendConfig> {
        config::resolve(self.shell.page_origin().as_deref())
    }

    fn config(&self) -> Result<BackendConfig, BridgeError> {
        self.resolve_config().ok_or_else(|| {
            BridgeError::NotConfigured(format!(
                "set {BASE_URL_ENV} or serve the UI from the backend origin"
            ))
        })
    }

    async fn open_file_dialog(&self) -> Result<Value, BridgeError> {
        match self.shell.pick_file(OPEN_DIALOG_ACCEPT).await? {
            Some(file) => Ok(Value::String(self.pool.register(file.name, file.text))),
            // Cancellation is a successful null, not an error.
            None => Ok(Value::Null),
        }
    }

    fn open_external(&self, args: &Value) -> Result<Value, BridgeError> {
        let url = args
            .get("url")
            .and_then(Value::as_str)
            .ok_or_else(|| BridgeError::InvalidArgs {
                command: "open_external",
                reason: "missing string field `url`".to_string(),
            })?;
        self.shell.open_external(url)?;
        Ok(Value::Null)
    }

    async fn export_config(
        &self,
        config: &BackendConfig,
        args: &Value,
    ) -> Result<Value, BridgeError> {
        let requested = args.get("filePath").and_then(Value::as_str).unwrap_or("");
        // A save token comes from save_file_dialog; any other non-empty
        // string is taken as a literal filename, matching desktop callers
        // that pass real paths.
        let filename = match files::resolve_saved(requested) {
            Some(name) => name,
            None if requested.trim().is_empty() => DEFAULT_EXPORT_FILENAME.to_string(),
            None => requested.trim().to_string(),
        };

        let raw = self.client.call(config, "get_snapshot", json!({})).await?;
        let snapshot: Snapshot = serde_json::from_value(raw).map_err(|e| {
            BridgeError::Protocol(format!("get_snapshot returned a non-snapshot payload: {e}"))
        })?;

        let plan = plan_export(&snapshot, &filename)?;
        self.shell.download(&plan.filename, &plan.content)?;

        Ok(json!({
            "success": true,
            "message": "Export completed",
            "filePath": plan.filename,
        }))
    }

    async fn import_config(
        &self,
        config: &BackendConfig,
        args: &Value,
    ) -> Result<Value, BridgeError> {
        let token = args.get("filePath").and_then(Value::as_str).unwrap_or("");
        let Some(entry) = self.pool.resolve_opened(token) else {
            return Ok(failure(
                "selected file is no longer available; pick it again",
            ));
        };

        // Decode/validation failures never reach the network.
        let payload = match detect_import(&entry.name, &entry.text) {
            Ok(payload) => payload,
            Err(rejected) => return Ok(failure(&rejected.to_string())),
        };

        let result = self
            .client
            .call(
                config,
                "apply_snapshot",
                json!({"snapshot": {"sql": payload.sql()}}),
            )
            .await?;

        // The service reports success/failure in the result body; surface
        // it verbatim, including `success: false`.
        if result.get("success").is_some() {
            Ok(result)
        } else {
            Ok(json!({"success": true, "message": "imported"}))
        }
    }
}

fn save_file_dialog(args: &Value) -> Value {
    let filename = args
        .get("defaultPath")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_EXPORT_FILENAME);
    Value::String(files::make_save_token(filename))
}

fn failure(message: &str) -> Value {
    json!({"success": false, "message": message})
}
