//! Storage port for the options store
//!
//! The extension keeps its options in the WebExtension local storage area, a
//! flat key-value mapping persisted by the host. This module models that area
//! as the [`StorageArea`] trait so the options manager never touches ambient
//! global state: callers hand it a storage implementation explicitly, and
//! tests substitute [`MemoryStorage`].
//!
//! [`LocalStorage`] is the on-disk implementation: a flat JSON object of
//! string keys to booleans, living by default at
//! `<profile>/browser-extension-data/<extension id>/storage.js`. A missing
//! file reads as an empty store; the file and its parent directories are
//! created on first write.

use crate::error::{Error, Result};
use crate::types::Settings;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Extension id used for the default storage location under a profile
pub const EXTENSION_ID: &str = "identitychooser@mozilla.kewis.ch";

/// The key-value storage area holding current option values
///
/// Matches the host storage contract: `get_all` returns the entire mapping,
/// `set` writes a single key. There are no transactions and no ordering
/// guarantees across keys.
pub trait StorageArea {
    /// Read the entire stored mapping
    fn get_all(&self) -> Result<Settings>;

    /// Write a single key-value pair
    fn set(&self, name: &str, value: bool) -> Result<()>;
}

/// File-backed storage area: one flat JSON object of booleans
#[derive(Debug)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Open a storage area backed by the given file (not read until used)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LocalStorage { path: path.into() }
    }

    /// Storage file location inside a Thunderbird profile
    pub fn default_path(profile_path: &Path) -> PathBuf {
        profile_path
            .join("browser-extension-data")
            .join(EXTENSION_ID)
            .join("storage.js")
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Settings> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::new()),
            Err(e) => return Err(e.into()),
        };

        let raw: HashMap<String, serde_json::Value> =
            serde_json::from_str(&content).map_err(|e| Error::InvalidStorage {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        let mut settings = Settings::new();
        for (key, value) in raw {
            match value.as_bool() {
                Some(b) => {
                    settings.insert(key, b);
                }
                None => {
                    return Err(Error::InvalidStorage {
                        path: self.path.clone(),
                        message: format!("key '{}' holds a non-boolean value", key),
                    });
                }
            }
        }
        Ok(settings)
    }

    fn write(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings).map_err(Error::StorageEncode)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl StorageArea for LocalStorage {
    fn get_all(&self) -> Result<Settings> {
        self.read()
    }

    fn set(&self, name: &str, value: bool) -> Result<()> {
        let mut settings = self.read()?;
        settings.insert(name.to_string(), value);
        self.write(&settings)
    }
}

/// In-memory storage area for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStorage {
    settings: RefCell<Settings>,
}

impl MemoryStorage {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Create a store pre-populated from key-value pairs
    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, bool)>,
    {
        let settings = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        MemoryStorage {
            settings: RefCell::new(settings),
        }
    }
}

impl StorageArea for MemoryStorage {
    fn get_all(&self) -> Result<Settings> {
        Ok(self.settings.borrow().clone())
    }

    fn set(&self, name: &str, value: bool) -> Result<()> {
        self.settings.borrow_mut().insert(name.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("storage.js"));
        assert!(storage.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_set_creates_file_and_parents() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir
            .path()
            .join("browser-extension-data")
            .join(EXTENSION_ID)
            .join("storage.js");
        let storage = LocalStorage::new(&path);

        storage.set("icEnableReplyMessage", false).unwrap();

        assert!(path.exists());
        let settings = storage.get_all().unwrap();
        assert_eq!(settings.get("icEnableReplyMessage"), Some(&false));
    }

    #[test]
    fn test_set_preserves_other_keys() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("storage.js"));

        storage.set("icEnableComposeMessage", true).unwrap();
        storage.set("icEnableForwardMessage", false).unwrap();

        let settings = storage.get_all().unwrap();
        assert_eq!(settings.len(), 2);
        assert_eq!(settings.get("icEnableComposeMessage"), Some(&true));
        assert_eq!(settings.get("icEnableForwardMessage"), Some(&false));
    }

    #[test]
    fn test_non_boolean_value_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("storage.js");
        std::fs::write(&path, r#"{"icEnableReplyMessage": "yes"}"#).unwrap();

        let storage = LocalStorage::new(&path);
        let err = storage.get_all().unwrap_err();
        assert!(err.to_string().contains("non-boolean"));
    }

    #[test]
    fn test_corrupt_file_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("storage.js");
        std::fs::write(&path, "not json").unwrap();

        let storage = LocalStorage::new(&path);
        assert!(storage.get_all().is_err());
    }

    #[test]
    fn test_default_path_layout() {
        let path = LocalStorage::default_path(Path::new("/home/user/.thunderbird/abcd.default"));
        assert_eq!(
            path,
            Path::new("/home/user/.thunderbird/abcd.default")
                .join("browser-extension-data")
                .join(EXTENSION_ID)
                .join("storage.js")
        );
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        storage.set("icEnableComposeMessage", false).unwrap();
        let settings = storage.get_all().unwrap();
        assert_eq!(settings.get("icEnableComposeMessage"), Some(&false));
    }
}
