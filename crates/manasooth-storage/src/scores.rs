//! Scratch scores for the assessment session in progress.

use manasooth_core::models::assessment::{AssessmentType, CurrentScores};
use manasooth_core::storage_keys::CURRENT_ASSESSMENT_SCORES;

use crate::error::StorageError;
use crate::objects::Store;
use crate::state::{Loaded, load_or_default, save_state};

pub async fn load(store: &Store) -> Result<Loaded<CurrentScores>, StorageError> {
    load_or_default(store, CURRENT_ASSESSMENT_SCORES).await
}

/// Record one questionnaire's score, keeping the others. Returns the updated
/// scores.
pub async fn record(
    store: &Store,
    assessment: AssessmentType,
    score: u32,
) -> Result<Loaded<CurrentScores>, StorageError> {
    let _guard = store.lock().await;
    let mut loaded = load(store).await?;
    loaded.value.set(assessment, score);
    save_state(store, CURRENT_ASSESSMENT_SCORES, &loaded.value).await?;
    tracing::info!(%assessment, score, "current score recorded");
    Ok(loaded)
}

pub async fn clear(store: &Store) -> Result<bool, StorageError> {
    let _guard = store.lock().await;
    store.delete_object(CURRENT_ASSESSMENT_SCORES).await
}
