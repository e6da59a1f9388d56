//! Browser-side command/event bridge for CC Switch.
//!
//! Lets the desktop UI run unmodified in a browser: `invoke`d commands
//! become `POST /invoke` calls against the web service, event listeners
//! become SSE subscriptions to `GET /events`, and native affordances (file
//! dialogs, downloads, opening URLs) are emulated through the host-supplied
//! [`Shell`] trait.
//!
//! The bridge degrades rather than crashes: a missing backend configuration
//! fails command dispatch with a named error but leaves event subscriptions
//! inert, and a broken event stream only flips the subscription's health
//! signal.

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod files;
pub mod shell;
pub mod snapshot;

pub use client::RpcClient;
pub use config::BASE_URL_ENV;
pub use config::BackendConfig;
pub use config::TOKEN_ENV;
pub use config::resolve;
pub use dispatch::Bridge;
pub use dispatch::DEFAULT_EXPORT_FILENAME;
pub use dispatch::LocalCommand;
pub use dispatch::OPEN_DIALOG_ACCEPT;
pub use error::BridgeError;
pub use events::StreamHealth;
pub use events::Subscription;
pub use files::FileTokenPool;
pub use shell::PickedFile;
pub use shell::Shell;
pub use snapshot::ExportPlan;
pub use snapshot::ImportPayload;
pub use snapshot::ImportRejected;
