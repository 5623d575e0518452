// Local session token storage. The CLI keeps at most one token, written on
// login and removed on logout. `FileTokenStore` is what the binary uses;
// `MemoryTokenStore` lets tests run without touching the home directory.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// On-disk shape of the token file: `{ "token": "..." }`.
#[derive(Serialize, Deserialize, Debug)]
struct StoredToken {
    token: String,
}

pub trait TokenStore: Send {
    /// True iff a token is stored.
    fn exists(&self) -> bool;

    /// Returns the stored token, or `CliError::NotLoggedIn` when there is none.
    fn read(&self) -> Result<String>;

    /// Persists `token`, replacing any previous value.
    fn write(&self, token: &str) -> Result<()>;

    /// Removes the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileTokenStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_error(&self, source: std::io::Error) -> CliError {
        CliError::TokenFile {
            path: self.path.clone(),
            source,
        }
    }
}

impl TokenStore for FileTokenStore {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn read(&self) -> Result<String> {
        if !self.exists() {
            return Err(CliError::NotLoggedIn);
        }
        let data = std::fs::read_to_string(&self.path).map_err(|e| self.file_error(e))?;
        let stored: StoredToken =
            serde_json::from_str(&data).map_err(|source| CliError::TokenFormat {
                path: self.path.clone(),
                source,
            })?;
        Ok(stored.token)
    }

    fn write(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.file_error(e))?;
            }
        }
        let data = serde_json::to_string(&StoredToken {
            token: token.to_string(),
        })
        .map_err(|source| CliError::TokenFormat {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, data).map_err(|e| self.file_error(e))?;
        tracing::debug!(path = %self.path.display(), "token written");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "token removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.file_error(e)),
        }
    }
}

/// In-memory store. Clones share the same slot, so a test can keep a handle
/// and inspect the token after handing the store to an `ApiClient`.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store.set(Some(token.to_string()));
        store
    }

    fn get(&self) -> Option<String> {
        match self.token.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set(&self, value: Option<String>) {
        match self.token.lock() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn exists(&self) -> bool {
        self.get().is_some()
    }

    fn read(&self) -> Result<String> {
        self.get().ok_or(CliError::NotLoggedIn)
    }

    fn write(&self, token: &str) -> Result<()> {
        self.set(Some(token.to_string()));
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.set(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_store() -> (TempDir, FileTokenStore) {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join(".vault-build-token"));
        (dir, store)
    }

    #[test]
    fn missing_file_is_not_logged_in() {
        let (_dir, store) = file_store();
        assert!(!store.exists());
        assert!(matches!(store.read(), Err(CliError::NotLoggedIn)));
    }

    #[test]
    fn write_then_read_returns_token() {
        let (_dir, store) = file_store();
        store.write("abc123").unwrap();
        assert!(store.exists());
        assert_eq!(store.read().unwrap(), "abc123");
    }

    #[test]
    fn file_holds_json_object() {
        let (_dir, store) = file_store();
        store.write("abc123").unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!({ "token": "abc123" }));
    }

    #[test]
    fn write_overwrites_previous_token() {
        let (_dir, store) = file_store();
        store.write("first").unwrap();
        store.write("second").unwrap();
        assert_eq!(store.read().unwrap(), "second");
    }

    #[test]
    fn write_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested/dir/token"));
        store.write("abc").unwrap();
        assert_eq!(store.read().unwrap(), "abc");
    }

    #[test]
    fn clear_is_idempotent() {
        let (_dir, store) = file_store();
        store.write("abc").unwrap();
        store.clear().unwrap();
        assert!(!store.exists());
        store.clear().unwrap();
    }

    #[test]
    fn reads_token_written_with_extra_fields() {
        let (_dir, store) = file_store();
        std::fs::write(store.path(), r#"{"token":"xyz","email":"a@x.com"}"#).unwrap();
        assert_eq!(store.read().unwrap(), "xyz");
    }

    #[test]
    fn malformed_file_reports_format_error() {
        let (_dir, store) = file_store();
        std::fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.read(), Err(CliError::TokenFormat { .. })));
    }

    #[test]
    fn memory_store_clones_share_state() {
        let store = MemoryTokenStore::new();
        let handle = store.clone();
        store.write("shared").unwrap();
        assert_eq!(handle.read().unwrap(), "shared");
        handle.clear().unwrap();
        assert!(!store.exists());
    }
}
