//! Persistent client state.
//!
//! The console keeps two named JSON blobs in the user data directory: the
//! cached request list and the current session. Reads tolerate a missing or
//! damaged blob by falling back to the empty default; corrupt state must
//! never take the console down.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde_json::{Value, json};
use tracing::warn;

use crate::error::{AdminError, Result};
use crate::types::{AuthenticatedUser, Record};

/// Blob name for the cached request list.
pub const REQUESTS_KEY: &str = "rr_requests_v1";

/// Blob name for the session envelope.
pub const AUTH_KEY: &str = "rr_auth_v1";

#[derive(Debug, Clone)]
pub struct ClientStore {
    root: PathBuf,
}

fn default_root() -> PathBuf {
    if let Ok(dir) = env::var("CLIMADMIN_DATA_DIR")
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }

    ProjectDirs::from("", "", "climadmin")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".climadmin"))
}

impl ClientStore {
    pub fn new() -> Self {
        Self {
            root: default_root(),
        }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Read a named blob, discarding it when unreadable or not valid JSON.
    fn read_blob(&self, key: &str) -> Option<Value> {
        let raw = fs::read_to_string(self.blob_path(key)).ok()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("discarding corrupt state blob '{}': {}", key, e);
                None
            }
        }
    }

    fn write_blob(&self, key: &str, value: &Value) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| {
            AdminError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create state directory at {}: {}",
                    self.root.display(),
                    e
                ),
            ))
        })?;

        let path = self.blob_path(key);
        fs::write(&path, serde_json::to_string(value)?).map_err(|e| {
            AdminError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write state blob at {}: {}", path.display(), e),
            ))
        })?;
        Ok(())
    }

    /// Persist the session. The user record is wrapped in a `{"user": ...}`
    /// envelope, and the blob carries the bearer token, so it is written
    /// owner read/write only.
    pub fn save_session(&self, user: &AuthenticatedUser) -> Result<()> {
        self.write_blob(AUTH_KEY, &json!({ "user": user }))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let path = self.blob_path(AUTH_KEY);
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, permissions).map_err(|e| {
                AdminError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to set permissions on session blob at {}: {}",
                        path.display(),
                        e
                    ),
                ))
            })?;
        }

        Ok(())
    }

    /// Current session, `None` when absent, corrupt, or not shaped like a
    /// session envelope.
    pub fn load_session(&self) -> Option<AuthenticatedUser> {
        let envelope = self.read_blob(AUTH_KEY)?;
        let user = envelope.get("user")?.clone();
        serde_json::from_value(user).ok()
    }

    /// Drop the stored session. Missing blobs are fine.
    pub fn clear_session(&self) {
        let _ = fs::remove_file(self.blob_path(AUTH_KEY));
    }

    /// Bearer token of the current session, `None` when signed out or the
    /// stored token is empty.
    pub fn token(&self) -> Option<String> {
        self.load_session()
            .map(|user| user.token)
            .filter(|token| !token.is_empty())
    }

    pub fn save_cached_requests(&self, requests: &[Record]) -> Result<()> {
        let items: Vec<Value> = requests
            .iter()
            .map(|record| Value::Object(record.clone()))
            .collect();
        self.write_blob(REQUESTS_KEY, &Value::Array(items))
    }

    /// Cached request list, empty when the blob is missing, corrupt, or not
    /// an array. Non-object entries are skipped.
    pub fn load_cached_requests(&self) -> Vec<Record> {
        match self.read_blob(REQUESTS_KEY) {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(record) => Some(record),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl Default for ClientStore {
    fn default() -> Self {
        Self::new()
    }
}
