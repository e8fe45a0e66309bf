//! The ordered list of questionnaires still to take in this session.

use manasooth_core::models::assessment::AssessmentType;
use manasooth_core::storage_keys::SELECTED_ASSESSMENT_FLOW;
use manasooth_instruments::flow as instrument_flow;

use crate::error::StorageError;
use crate::objects::Store;
use crate::state::{Loaded, load_or_default, save_state};

pub async fn get(store: &Store) -> Result<Loaded<Vec<AssessmentType>>, StorageError> {
    load_or_default(store, SELECTED_ASSESSMENT_FLOW).await
}

/// Store a flow that is already in canonical order.
pub async fn set(store: &Store, flow: &[AssessmentType]) -> Result<(), StorageError> {
    let _guard = store.lock().await;
    save_state(store, SELECTED_ASSESSMENT_FLOW, &flow).await?;
    tracing::info!(?flow, "assessment flow selected");
    Ok(())
}

/// Drop `completed` from the stored flow and return what remains. The key is
/// removed once the flow is empty.
pub async fn advance(
    store: &Store,
    completed: AssessmentType,
) -> Result<Loaded<Vec<AssessmentType>>, StorageError> {
    let _guard = store.lock().await;
    let loaded = get(store).await?;
    let remaining = instrument_flow::advance(&loaded.value, completed);
    if remaining.is_empty() {
        store.delete_object(SELECTED_ASSESSMENT_FLOW).await?;
    } else {
        save_state(store, SELECTED_ASSESSMENT_FLOW, &remaining).await?;
    }
    Ok(loaded.with(remaining))
}

pub async fn clear(store: &Store) -> Result<bool, StorageError> {
    let _guard = store.lock().await;
    store.delete_object(SELECTED_ASSESSMENT_FLOW).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use AssessmentType::*;

    #[tokio::test]
    async fn flow_advances_until_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();

        assert!(get(&store).await.unwrap().value.is_empty());
        set(&store, &[Who5, Phq9]).await.unwrap();
        assert_eq!(get(&store).await.unwrap().value, vec![Who5, Phq9]);

        assert_eq!(advance(&store, Who5).await.unwrap().value, vec![Phq9]);
        assert!(advance(&store, Phq9).await.unwrap().value.is_empty());
        assert!(!store.exists(SELECTED_ASSESSMENT_FLOW).await.unwrap());
        assert!(!clear(&store).await.unwrap());
    }

    #[tokio::test]
    async fn stored_flow_is_a_plain_id_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();
        set(&store, &[Gad7]).await.unwrap();
        let raw: serde_json::Value =
            serde_json::from_slice(&store.get_object(SELECTED_ASSESSMENT_FLOW).await.unwrap()).unwrap();
        assert_eq!(raw, serde_json::json!(["gad7"]));
    }
}
