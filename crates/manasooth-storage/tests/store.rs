//! End-to-end checks across the typed accessors sharing one store directory.

use manasooth_core::models::assessment::AssessmentType;
use manasooth_core::models::mood::MoodLevel;
use manasooth_core::storage_keys;
use manasooth_storage::{Store, flow, mood, scores, state};

#[tokio::test]
async fn clear_all_resets_every_accessor() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path()).await.unwrap();

    scores::record(&store, AssessmentType::Phq9, 12).await.unwrap();
    flow::set(&store, &[AssessmentType::Gad7]).await.unwrap();
    mood::add(&store, MoodLevel::GOOD, None, "yoga", jiff::Timestamp::now())
        .await
        .unwrap();

    let mut keys = store.list_keys().await.unwrap();
    keys.sort();
    let mut expected = vec![
        storage_keys::CURRENT_ASSESSMENT_SCORES,
        storage_keys::MOOD_ENTRIES,
        storage_keys::SELECTED_ASSESSMENT_FLOW,
    ];
    expected.sort();
    assert_eq!(keys, expected);

    assert!(state::clear_all(&store).await.unwrap());
    assert!(store.list_keys().await.unwrap().is_empty());
    assert!(scores::load(&store).await.unwrap().value.is_empty());
    assert!(mood::list(&store).await.unwrap().value.is_empty());
}

#[tokio::test]
async fn concurrent_writers_do_not_lose_updates() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path()).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            mood::add(&store, MoodLevel::OKAY, None, "", jiff::Timestamp::now())
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(mood::list(&store).await.unwrap().value.len(), 16);
}

#[tokio::test]
async fn data_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = Store::open(dir.path()).await.unwrap();
        scores::record(&store, AssessmentType::Who5, 48).await.unwrap();
    }
    let store = Store::open(dir.path()).await.unwrap();
    assert_eq!(scores::load(&store).await.unwrap().value.who5, Some(48));
}
