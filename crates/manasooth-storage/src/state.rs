use serde::{Serialize, de::DeserializeOwned};

use manasooth_core::storage_keys;

use crate::error::StorageError;
use crate::objects::Store;

/// A value read from the store, and whether a corrupted blob had to be
/// discarded to produce it.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub value: T,
    pub recovered: bool,
}

impl<T> Loaded<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            recovered: false,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loaded<U> {
        Loaded {
            value: f(self.value),
            recovered: self.recovered,
        }
    }

    /// Replace the value, keeping the recovery flag.
    pub fn with<U>(&self, value: U) -> Loaded<U> {
        Loaded {
            value,
            recovered: self.recovered,
        }
    }
}

/// Load and deserialize a JSON blob.
pub async fn load_state<T: DeserializeOwned>(store: &Store, key: &str) -> Result<T, StorageError> {
    let body = store.get_object(key).await?;
    let value: T = serde_json::from_slice(&body)?;
    Ok(value)
}

/// Serialize and save a JSON blob.
pub async fn save_state<T: Serialize>(
    store: &Store,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    store.put_object(key, &body).await
}

/// Load a blob, falling back to `T::default()` when it is missing.
///
/// A blob that no longer parses is deleted and reported through
/// [`Loaded::recovered`]. I/O failures are still errors.
pub async fn load_or_default<T>(store: &Store, key: &str) -> Result<Loaded<T>, StorageError>
where
    T: DeserializeOwned + Default,
{
    match load_state(store, key).await {
        Ok(value) => Ok(Loaded::clean(value)),
        Err(StorageError::NotFound { .. }) => Ok(Loaded::clean(T::default())),
        Err(StorageError::Serialization(e)) => {
            tracing::warn!(key, error = %e, "discarding corrupted stored value");
            store.delete_object(key).await?;
            Ok(Loaded {
                value: T::default(),
                recovered: true,
            })
        }
        Err(e) => Err(e),
    }
}

/// Delete every known blob. Returns whether anything was removed.
pub async fn clear_all(store: &Store) -> Result<bool, StorageError> {
    let _guard = store.lock().await;
    let mut removed = false;
    for key in storage_keys::ALL {
        removed |= store.delete_object(key).await?;
    }
    tracing::info!(removed, "all stored data cleared");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn missing_key_is_default() {
        let (_dir, store) = store().await;
        let loaded: Loaded<Vec<u32>> = load_or_default(&store, "numbers").await.unwrap();
        assert_eq!(loaded, Loaded::clean(vec![]));
        assert!(matches!(
            load_state::<Vec<u32>>(&store, "numbers").await,
            Err(StorageError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn saved_state_loads_back() {
        let (_dir, store) = store().await;
        save_state(&store, "numbers", &vec![3u32, 1]).await.unwrap();
        let loaded: Loaded<Vec<u32>> = load_or_default(&store, "numbers").await.unwrap();
        assert_eq!(loaded.value, vec![3, 1]);
        assert!(!loaded.recovered);
    }

    #[tokio::test]
    async fn corrupted_value_is_discarded() {
        let (_dir, store) = store().await;
        store.put_object("numbers", b"[1, 2,").await.unwrap();

        let loaded: Loaded<Vec<u32>> = load_or_default(&store, "numbers").await.unwrap();
        assert!(loaded.recovered);
        assert!(loaded.value.is_empty());
        assert!(!store.exists("numbers").await.unwrap());

        // A value of the wrong shape is treated the same way.
        store.put_object("numbers", br#"{"a":1}"#).await.unwrap();
        let loaded: Loaded<Vec<u32>> = load_or_default(&store, "numbers").await.unwrap();
        assert!(loaded.recovered);
    }

    #[tokio::test]
    async fn clear_all_only_touches_known_keys() {
        let (_dir, store) = store().await;
        assert!(!clear_all(&store).await.unwrap());

        save_state(&store, storage_keys::USER_GOALS, &Vec::<u32>::new()).await.unwrap();
        save_state(&store, storage_keys::MOOD_ENTRIES, &Vec::<u32>::new()).await.unwrap();
        save_state(&store, "unrelated", &1u32).await.unwrap();

        assert!(clear_all(&store).await.unwrap());
        assert_eq!(store.list_keys().await.unwrap(), vec!["unrelated"]);
    }
}
