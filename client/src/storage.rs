//! Device key-value storage
//!
//! String keys to string values, the same contract the mobile app's
//! AsyncStorage offers. [`FileStore`] keeps everything in one JSON document
//! and rewrites it atomically (temp file, then rename) on every change.

use crate::error::ClientResult;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> ClientResult<Option<String>>;

    async fn set(&self, key: &str, value: String) -> ClientResult<()>;

    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> ClientResult<()>;

    /// All keys, sorted
    async fn keys(&self) -> ClientResult<Vec<String>>;

    async fn remove_many(&self, keys: &[String]) -> ClientResult<()> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }
}

/// Volatile store, mostly for tests
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> ClientResult<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> ClientResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> ClientResult<Vec<String>> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }
}

/// Store persisted as a single JSON object on disk
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file does not exist yet
    pub async fn open(path: impl Into<PathBuf>) -> ClientResult<Self> {
        let path = path.into();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), entries = entries.len(), "Opened file store");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        tokio::fs::write(&tmp_path, serde_json::to_vec_pretty(entries)?).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> ClientResult<()> {
        // Hold the lock across the write so the file always matches memory
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value);
        self.persist(&entries).await
    }

    async fn remove(&self, key: &str) -> ClientResult<()> {
        let mut entries = self.entries.lock().await;
        if entries.remove(key).is_some() {
            self.persist(&entries).await?;
        }
        Ok(())
    }

    async fn keys(&self) -> ClientResult<Vec<String>> {
        Ok(self.entries.lock().await.keys().cloned().collect())
    }

    async fn remove_many(&self, keys: &[String]) -> ClientResult<()> {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        for key in keys {
            entries.remove(key);
        }
        if entries.len() != before {
            self.persist(&entries).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("balance-plus-store-{}", uuid::Uuid::new_v4()))
            .join("storage.json")
    }

    #[tokio::test]
    async fn test_memory_store_basics() {
        let store = MemoryStore::new();
        assert_eq!(store.get("a").await.unwrap(), None);

        store.set("b", "2".into()).await.unwrap();
        store.set("a", "1".into()).await.unwrap();
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(store.keys().await.unwrap(), vec!["a", "b"]);

        store.remove("a").await.unwrap();
        store.remove("missing").await.unwrap();
        assert_eq!(store.keys().await.unwrap(), vec!["b"]);
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let path = temp_path();

        let store = FileStore::open(&path).await.unwrap();
        store.set("dailyLog-2024-03-05", "{}".into()).await.unwrap();
        store.set("@auth_token", "tok".into()).await.unwrap();
        store.remove("@auth_token").await.unwrap();
        drop(store);

        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("dailyLog-2024-03-05").await.unwrap().as_deref(),
            Some("{}")
        );
        assert_eq!(reopened.get("@auth_token").await.unwrap(), None);

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        assert!(!PathBuf::from(tmp).exists());

        tokio::fs::remove_dir_all(path.parent().unwrap()).await.ok();
    }

    #[tokio::test]
    async fn test_file_store_remove_many() {
        let path = temp_path();
        let store = FileStore::open(&path).await.unwrap();
        for key in ["a", "b", "c"] {
            store.set(key, key.to_string()).await.unwrap();
        }

        store
            .remove_many(&["a".to_string(), "c".to_string(), "zzz".to_string()])
            .await
            .unwrap();
        assert_eq!(store.keys().await.unwrap(), vec!["b"]);

        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(reopened.keys().await.unwrap(), vec!["b"]);

        tokio::fs::remove_dir_all(path.parent().unwrap()).await.ok();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let path = temp_path();
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, b"not json").await.unwrap();

        assert!(FileStore::open(&path).await.is_err());

        tokio::fs::remove_dir_all(path.parent().unwrap()).await.ok();
    }
}
