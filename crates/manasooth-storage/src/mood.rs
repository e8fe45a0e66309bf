//! Mood journal under [`MOOD_ENTRIES`].

use uuid::Uuid;

use manasooth_core::models::mood::{MoodEntry, MoodLevel, parse_activities};
use manasooth_core::storage_keys::MOOD_ENTRIES;

use crate::error::StorageError;
use crate::objects::Store;
use crate::state::{Loaded, load_or_default, save_state};

/// Every entry, newest first.
pub async fn list(store: &Store) -> Result<Loaded<Vec<MoodEntry>>, StorageError> {
    let mut loaded: Loaded<Vec<MoodEntry>> = load_or_default(store, MOOD_ENTRIES).await?;
    loaded.value.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(loaded)
}

/// Log a new entry. `activities` is the raw comma-separated text.
pub async fn add(
    store: &Store,
    mood_level: MoodLevel,
    notes: Option<String>,
    activities: &str,
    now: jiff::Timestamp,
) -> Result<Loaded<MoodEntry>, StorageError> {
    let entry = MoodEntry {
        id: Uuid::new_v4(),
        date: now,
        mood_level,
        notes: notes.filter(|n| !n.trim().is_empty()),
        activities: parse_activities(activities),
    };

    let _guard = store.lock().await;
    let mut loaded = list(store).await?;
    loaded.value.insert(0, entry.clone());
    save_state(store, MOOD_ENTRIES, &loaded.value).await?;

    tracing::info!(entry_id = %entry.id, mood = mood_level.value(), "mood logged");
    Ok(loaded.with(entry))
}

/// Remove an entry. Returns whether it existed.
pub async fn delete(store: &Store, id: Uuid) -> Result<Loaded<bool>, StorageError> {
    let _guard = store.lock().await;
    let mut loaded = list(store).await?;
    let before = loaded.value.len();
    loaded.value.retain(|e| e.id != id);
    let removed = loaded.value.len() != before;
    if removed {
        save_state(store, MOOD_ENTRIES, &loaded.value).await?;
        tracing::info!(entry_id = %id, "mood entry deleted");
    }
    Ok(loaded.with(removed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn entries_are_listed_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();

        let first = add(&store, MoodLevel::BAD, None, "", "2025-01-01T08:00:00Z".parse().unwrap())
            .await
            .unwrap()
            .value;
        let second = add(
            &store,
            MoodLevel::GREAT,
            Some("slept well".to_string()),
            "walk, reading",
            "2025-01-02T08:00:00Z".parse().unwrap(),
        )
        .await
        .unwrap()
        .value;
        assert_eq!(second.activities, vec!["walk", "reading"]);

        let entries = list(&store).await.unwrap().value;
        assert_eq!(entries.iter().map(|e| e.id).collect::<Vec<_>>(), vec![second.id, first.id]);

        assert!(delete(&store, first.id).await.unwrap().value);
        assert!(!delete(&store, first.id).await.unwrap().value);
        assert_eq!(list(&store).await.unwrap().value.len(), 1);
    }

    #[tokio::test]
    async fn blank_notes_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();
        let entry = add(&store, MoodLevel::OKAY, Some("  ".to_string()), " , ", jiff::Timestamp::now())
            .await
            .unwrap()
            .value;
        assert_eq!(entry.notes, None);
        assert!(entry.activities.is_empty());
    }
}
