use super::backend::StorageBackend;
use crate::error::{Result, VitaeError};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::debug;

/// File-backed storage: each key is a JSON file in `root`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the file holding `key`.
    pub fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }
}

/// Keys become file names, so only `[A-Za-z0-9_-]` is allowed.
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(VitaeError::Store(format!("Invalid storage key: '{}'", key)));
    }
    Ok(())
}

impl StorageBackend for FsBackend {
    fn load(&self, key: &str) -> Option<Value> {
        let path = self.key_path(key).ok()?;
        if !path.exists() {
            debug!(key, "nothing stored yet");
            return None;
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                debug!(key, error = %e, "unreadable storage file");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(key, error = %e, "stored value is not valid JSON");
                None
            }
        }
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        let target = self.key_path(key)?;
        self.ensure_dir()?;

        let content = serde_json::to_string_pretty(value)?;

        // Atomic write; the temp file is removed on drop if anything fails
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(content.as_bytes())?;
        tmp.persist(&target).map_err(|e| e.error)?;

        debug!(key, path = %target.display(), "saved");
        Ok(())
    }
}
