use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::error::StorageError;

const EXTENSION: &str = ".json";

/// A directory of JSON blobs, one file per key.
///
/// Cloning is cheap and clones share the write lock, so a read-modify-write
/// sequence holding [`Store::lock`] cannot interleave with another one in
/// the same process.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl Store {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| StorageError::io(&root, e))?;
        tracing::debug!(root = %root.display(), "store opened");
        Ok(Self {
            root,
            lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Serialize read-modify-write sequences across the store.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.root.join(format!("{key}{EXTENSION}")))
    }

    /// Read the raw bytes stored under `key`.
    pub async fn get_object(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(key)?;
        tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::NotFound {
                    key: key.to_string(),
                }
            } else {
                StorageError::io(&path, e)
            }
        })
    }

    /// Replace the value under `key`. The bytes land in a temp file first and
    /// are renamed into place, so readers never see a partial write.
    pub async fn put_object(&self, key: &str, body: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp_path = self.root.join(format!("{key}{EXTENSION}.tmp"));

        tokio::fs::write(&tmp_path, body)
            .await
            .map_err(|e| StorageError::io(&tmp_path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| StorageError::io(&tmp_path, e))?;
        }

        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| StorageError::io(&path, e))?;

        tracing::debug!(key, bytes = body.len(), "object written");
        Ok(())
    }

    /// Remove `key`. Returns whether anything was there.
    pub async fn delete_object(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(key, "object deleted");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::io(&path, e)),
        }
    }

    pub async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| StorageError::io(&path, e))
    }

    /// All keys currently stored, sorted.
    pub async fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| StorageError::io(&self.root, e))?;

        let mut keys = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::io(&self.root, e))?
        {
            let name = entry.file_name();
            if let Some(key) = name.to_str().and_then(|n| n.strip_suffix(EXTENSION)) {
                keys.push(key.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();

        assert!(!store.exists("a").await.unwrap());
        store.put_object("a", b"[1,2]").await.unwrap();
        assert!(store.exists("a").await.unwrap());
        assert_eq!(store.get_object("a").await.unwrap(), b"[1,2]");

        store.put_object("a", b"[]").await.unwrap();
        assert_eq!(store.get_object("a").await.unwrap(), b"[]");

        assert!(store.delete_object("a").await.unwrap());
        assert!(!store.delete_object("a").await.unwrap());
        assert!(matches!(
            store.get_object("a").await,
            Err(StorageError::NotFound { key }) if key == "a"
        ));
    }

    #[tokio::test]
    async fn keys_are_listed_without_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("nested")).await.unwrap();
        store.put_object("b_key", b"{}").await.unwrap();
        store.put_object("a-key", b"{}").await.unwrap();
        std::fs::write(store.root().join("stray.json.tmp"), b"x").unwrap();

        assert_eq!(store.list_keys().await.unwrap(), vec!["a-key", "b_key"]);
    }

    #[tokio::test]
    async fn path_like_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();
        for key in ["", "../escape", "a/b", "a.b"] {
            assert!(matches!(
                store.put_object(key, b"{}").await,
                Err(StorageError::InvalidKey { .. })
            ));
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn objects_are_private_to_the_owner() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();
        store.put_object("secret", b"{}").await.unwrap();
        let mode = std::fs::metadata(dir.path().join("secret.json"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
