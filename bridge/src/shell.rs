//! Host affordances the bridge needs from the page embedding it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BridgeError;

/// A file the user picked through the host's file-selection affordance,
/// with its full text content already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub text: String,
}

/// Browser-side affordances supplied by the embedding page.
///
/// The bridge never touches a real filesystem; everything file-shaped goes
/// through this trait and the token pool.
#[async_trait]
pub trait Shell: Send + Sync {
    /// Origin of the page hosting the UI, if there is a browsing context to
    /// derive one from. Used as the backend-base fallback.
    fn page_origin(&self) -> Option<String>;

    /// Prompt the user to pick a file. `accept` is a comma-separated
    /// MIME/extension filter. `Ok(None)` covers both user cancellation and a
    /// failure to read the selected file.
    ///
    /// The wait on user interaction is unbounded; only the user can cancel.
    async fn pick_file(&self, accept: &str) -> Result<Option<PickedFile>, BridgeError>;

    /// Trigger a client-side download of `content` under `filename`.
    fn download(&self, filename: &str, content: &str) -> Result<(), BridgeError>;

    /// Open `url` in a new browsing context. Implementors must not leak a
    /// referrer or an opener handle to the target.
    fn open_external(&self, url: &str) -> Result<(), BridgeError>;
}

#[async_trait]
impl<T: Shell + ?Sized> Shell for Arc<T> {
    fn page_origin(&self) -> Option<String> {
        (**self).page_origin()
    }

    async fn pick_file(&self, accept: &str) -> Result<Option<PickedFile>, BridgeError> {
        (**self).pick_file(accept).await
    }

    fn download(&self, filename: &str, content: &str) -> Result<(), BridgeError> {
        (**self).download(filename, content)
    }

    fn open_external(&self, url: &str) -> Result<(), BridgeError> {
        (**self).open_external(url)
    }
}
