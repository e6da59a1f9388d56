//! Shared test support: a scripted `Shell` implementation.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use cc_switch_bridge::BridgeError;
use cc_switch_bridge::PickedFile;
use cc_switch_bridge::Shell;

/// A `Shell` whose picker is scripted and whose side effects are recorded.
#[derive(Default)]
pub struct MockShell {
    origin: Option<String>,
    pick_result: Mutex<Option<PickedFile>>,
    pub accept_filters: Mutex<Vec<String>>,
    pub downloads: Mutex<Vec<(String, String)>>,
    pub opened_urls: Mutex<Vec<String>>,
}

impl MockShell {
    pub fn with_origin(origin: &str) -> Self {
        Self {
            origin: Some(origin.to_string()),
            ..Self::default()
        }
    }

    pub fn without_origin() -> Self {
        Self::default()
    }

    /// Scripts the next (and every subsequent) file pick.
    pub fn picking(self, name: &str, text: &str) -> Self {
        *self.pick_result.lock().unwrap_or_else(|e| e.into_inner()) = Some(PickedFile {
            name: name.to_string(),
            text: text.to_string(),
        });
        self
    }

    pub fn downloads(&self) -> Vec<(String, String)> {
        self.downloads
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.opened_urls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn accept_filters(&self) -> Vec<String> {
        self.accept_filters
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl Shell for MockShell {
    fn page_origin(&self) -> Option<String> {
        self.origin.clone()
    }

    async fn pick_file(&self, accept: &str) -> Result<Option<PickedFile>, BridgeError> {
        self.accept_filters
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(accept.to_string());
        Ok(self
            .pick_result
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    fn download(&self, filename: &str, content: &str) -> Result<(), BridgeError> {
        self.downloads
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((filename.to_string(), content.to_string()));
        Ok(())
    }

    fn open_external(&self, url: &str) -> Result<(), BridgeError> {
        self.opened_urls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(url.to_string());
        Ok(())
    }
}
