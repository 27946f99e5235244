//! Pluggable key-value persistence adapters.
//!
//! The store talks to on-device storage through the `KeyValueStorage` trait.
//! The host app implements it on the foreign side (AsyncStorage on React
//! Native hosts); `MemoryStorage` and `FileStorage` are Rust-native adapters
//! for tests, local development, and desktop demo hosts.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for storage adapter operations.
#[derive(Debug, Error, uniffi::Error)]
pub enum StorageError {
    #[error("Storage read failed: {0}")]
    Read(String),
    #[error("Storage write failed: {0}")]
    Write(String),
}

/// Asynchronous key-value storage, one text value per key.
///
/// All methods suspend; callers must await completion before trusting the
/// result. Implementations are not required to serialize concurrent writers -
/// the store layers its own single-flight lock on top.
#[uniffi::export(with_foreign)]
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, or None if absent.
    async fn get(&self, key: String) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: String, value: String) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Absent keys are not an error.
    async fn remove(&self, key: String) -> Result<(), StorageError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// IN-MEMORY ADAPTER
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory storage for testing and local development.
#[derive(Default, uniffi::Object)]
pub struct MemoryStorage {
    entries: tokio::sync::RwLock<HashMap<String, String>>,
}

#[uniffi::export]
impl MemoryStorage {
    /// Create an empty in-memory storage.
    #[uniffi::constructor]
    pub fn new() -> Self {
        Self::default()
    }
}

#[uniffi::export]
#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: String) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().await;
        Ok(entries.get(&key).cloned())
    }

    async fn set(&self, key: String, value: String) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: String) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.remove(&key);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// FILE-BACKED ADAPTER
// ─────────────────────────────────────────────────────────────────────────────

/// File-backed storage: one `<key>.json` file per key under a root directory.
///
/// Suitable for desktop demo hosts where no platform key-value store exists.
#[derive(uniffi::Object)]
pub struct FileStorage {
    root: PathBuf,
}

#[uniffi::export]
impl FileStorage {
    /// Create a file storage rooted at `root_dir`. The directory is created
    /// lazily on the first write.
    #[uniffi::constructor]
    pub fn new(root_dir: String) -> Self {
        Self {
            root: PathBuf::from(root_dir),
        }
    }
}

impl FileStorage {
    fn key_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

/// Reject keys that are empty or unsafe as file names.
fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::Read("key cannot be empty".to_string()));
    }
    if key.contains('/') || key.contains('\\') || key.contains("..") || key.contains('\0') {
        return Err(StorageError::Read(format!(
            "key contains invalid characters: {key:?}"
        )));
    }
    Ok(())
}

#[uniffi::export]
#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, key: String) -> Result<Option<String>, StorageError> {
        let path = self.key_path(&key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read(e.to_string())),
        }
    }

    async fn set(&self, key: String, value: String) -> Result<(), StorageError> {
        let path = self.key_path(&key).map_err(write_fault)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::Write(e.to_string()))?;
        // Write to a sibling temp file and rename, so a crash mid-write never
        // leaves a truncated payload under the live key.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value.as_bytes())
            .await
            .map_err(|e| StorageError::Write(e.to_string()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| StorageError::Write(e.to_string()))
    }

    async fn remove(&self, key: String) -> Result<(), StorageError> {
        let path = self.key_path(&key).map_err(write_fault)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Write(e.to_string())),
        }
    }
}

/// Key validation surfaces as a read fault; reclassify for write paths.
fn write_fault(e: StorageError) -> StorageError {
    match e {
        StorageError::Read(msg) => StorageError::Write(msg),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k".to_string()).await.unwrap(), None);

        storage.set("k".to_string(), "v1".to_string()).await.unwrap();
        assert_eq!(
            storage.get("k".to_string()).await.unwrap(),
            Some("v1".to_string())
        );

        storage.set("k".to_string(), "v2".to_string()).await.unwrap();
        assert_eq!(
            storage.get("k".to_string()).await.unwrap(),
            Some("v2".to_string())
        );

        storage.remove("k".to_string()).await.unwrap();
        assert_eq!(storage.get("k".to_string()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn memory_storage_remove_absent_key_is_ok() {
        let storage = MemoryStorage::new();
        storage.remove("missing".to_string()).await.unwrap();
    }

    #[tokio::test]
    async fn file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_string_lossy().into_owned());

        assert_eq!(storage.get("offers".to_string()).await.unwrap(), None);

        storage
            .set("offers".to_string(), "[1,2,3]".to_string())
            .await
            .unwrap();
        assert_eq!(
            storage.get("offers".to_string()).await.unwrap(),
            Some("[1,2,3]".to_string())
        );

        storage.remove("offers".to_string()).await.unwrap();
        assert_eq!(storage.get("offers".to_string()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_storage_rejects_path_traversal_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_string_lossy().into_owned());

        assert!(storage.get("../escape".to_string()).await.is_err());
        assert!(matches!(
            storage.set("a/b".to_string(), "x".to_string()).await,
            Err(StorageError::Write(_))
        ));
    }

    #[tokio::test]
    async fn file_storage_remove_absent_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_string_lossy().into_owned());
        storage.remove("missing".to_string()).await.unwrap();
    }
}
