//! File token pool: opaque stand-ins for filesystem paths.
//!
//! Opened files are registered in an in-memory pool and addressed by a
//! generated `ccs-open://` token. Save targets are stateless `ccs-save://`
//! tokens that encode only the desired filename. The two prefixes are
//! distinct namespaces; resolving a token of the wrong kind returns `None`
//! rather than erroring.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::SystemTime;

use uuid::Uuid;

/// Prefix of tokens referring to a pooled, already-read file.
pub const OPEN_TOKEN_PREFIX: &str = "ccs-open://";

/// Prefix of tokens encoding a save-target filename.
pub const SAVE_TOKEN_PREFIX: &str = "ccs-save://";

/// Default pool capacity. Entries beyond this are evicted oldest-first, so a
/// long-lived page cannot grow memory without bound on repeated file picks.
pub const DEFAULT_POOL_CAPACITY: usize = 64;

/// A pooled opened-file record.
#[derive(Debug, Clone)]
pub struct FileTokenEntry {
    pub name: String,
    pub text: String,
    pub captured_at: SystemTime,
}

/// In-memory registry of opened files, keyed by opaque token.
///
/// Lookup is by exact token match only. Insert order is retained so the
/// oldest entry can be evicted when the pool is full.
pub struct FileTokenPool {
    capacity: usize,
    entries: Mutex<VecDeque<(String, FileTokenEntry)>>,
}

impl Default for FileTokenPool {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_POOL_CAPACITY)
    }
}

impl FileTokenPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(VecDeque::new()),
        }
    }

    /// Registers an opened file and returns its token.
    pub fn register(&self, name: impl Into<String>, text: impl Into<String>) -> String {
        let token = format!("{OPEN_TOKEN_PREFIX}{}", Uuid::new_v4());
        let entry = FileTokenEntry {
            name: name.into(),
            text: text.into(),
            captured_at: SystemTime::now(),
        };
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back((token.clone(), entry));
        token
    }

    /// Looks up an opened-file token. Save tokens and unknown tokens both
    /// come back as `None`.
    pub fn resolve_opened(&self, token: &str) -> Option<FileTokenEntry> {
        if !token.starts_with(OPEN_TOKEN_PREFIX) {
            return None;
        }
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .iter()
            .find(|(key, _)| key == token)
            .map(|(_, entry)| entry.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Encodes a save-target filename as an opaque token.
pub fn make_save_token(filename: &str) -> String {
    format!("{SAVE_TOKEN_PREFIX}{}", urlencoding::encode(filename))
}

/// Decodes a save token back into its filename. Open tokens and arbitrary
/// strings come back as `None`.
pub fn resolve_saved(token: &str) -> Option<String> {
    let encoded = token.strip_prefix(SAVE_TOKEN_PREFIX)?;
    urlencoding::decode(encoded)
        .ok()
        .map(std::borrow::Cow::into_owned)
}
