//! Completed assessment sets, kept as one array under
//! [`PROGRESS_DATA`].

use manasooth_core::models::assessment::{self, CompletedAssessmentSet};
use manasooth_core::storage_keys::PROGRESS_DATA;

use crate::error::StorageError;
use crate::objects::Store;
use crate::state::{Loaded, load_or_default, save_state};

/// Every completed set, oldest first.
pub async fn list(store: &Store) -> Result<Loaded<Vec<CompletedAssessmentSet>>, StorageError> {
    let mut loaded: Loaded<Vec<CompletedAssessmentSet>> =
        load_or_default(store, PROGRESS_DATA).await?;
    loaded.value.sort_by_key(|s| s.date);
    Ok(loaded)
}

/// Append a set. Returns the number of sets now stored.
pub async fn append(
    store: &Store,
    set: CompletedAssessmentSet,
) -> Result<Loaded<usize>, StorageError> {
    let _guard = store.lock().await;
    let mut loaded = list(store).await?;
    loaded.value.push(set);
    loaded.value.sort_by_key(|s| s.date);
    save_state(store, PROGRESS_DATA, &loaded.value).await?;
    tracing::info!(count = loaded.value.len(), "assessment set appended");
    Ok(loaded.map(|sets| sets.len()))
}

/// The set with the greatest date.
pub async fn latest(
    store: &Store,
) -> Result<Loaded<Option<CompletedAssessmentSet>>, StorageError> {
    let loaded = list(store).await?;
    let latest = assessment::latest(&loaded.value).cloned();
    Ok(loaded.with(latest))
}
