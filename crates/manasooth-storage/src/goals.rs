//! User goals under [`USER_GOALS`].

use uuid::Uuid;

use manasooth_core::models::goal::{GoalStatus, UserGoal};
use manasooth_core::storage_keys::USER_GOALS;
use manasooth_instruments::progress::{self, GoalDraft, GoalRefresh};

use crate::error::StorageError;
use crate::history;
use crate::objects::Store;
use crate::state::{Loaded, load_or_default, save_state};

pub async fn list(store: &Store) -> Result<Loaded<Vec<UserGoal>>, StorageError> {
    load_or_default(store, USER_GOALS).await
}

pub async fn get(store: &Store, id: Uuid) -> Result<Loaded<Option<UserGoal>>, StorageError> {
    let loaded = list(store).await?;
    let goal = loaded.value.iter().find(|g| g.id == id).cloned();
    Ok(loaded.with(goal))
}

/// Create a goal, taking its start score from the latest completed set.
pub async fn create(
    store: &Store,
    draft: &GoalDraft,
    now: jiff::Timestamp,
) -> Result<Loaded<UserGoal>, StorageError> {
    let _guard = store.lock().await;
    let history = history::list(store).await?;
    let mut goals = list(store).await?;

    let goal = progress::build_goal(draft, None, &history.value, now)?;
    goals.value.push(goal.clone());
    save_state(store, USER_GOALS, &goals.value).await?;

    tracing::info!(goal_id = %goal.id, assessment = %goal.assessment_type, "goal created");
    Ok(Loaded {
        value: goal,
        recovered: history.recovered || goals.recovered,
    })
}

/// Replace a goal's user-editable fields.
pub async fn update(
    store: &Store,
    id: Uuid,
    draft: &GoalDraft,
    now: jiff::Timestamp,
) -> Result<Loaded<UserGoal>, StorageError> {
    let _guard = store.lock().await;
    let history = history::list(store).await?;
    let mut goals = list(store).await?;

    let slot = goals
        .value
        .iter_mut()
        .find(|g| g.id == id)
        .ok_or(StorageError::GoalNotFound(id))?;
    let goal = progress::build_goal(draft, Some(slot), &history.value, now)?;
    *slot = goal.clone();
    save_state(store, USER_GOALS, &goals.value).await?;

    tracing::info!(goal_id = %id, "goal updated");
    Ok(Loaded {
        value: goal,
        recovered: history.recovered || goals.recovered,
    })
}

/// Remove a goal. Returns whether it existed.
pub async fn delete(store: &Store, id: Uuid) -> Result<Loaded<bool>, StorageError> {
    let _guard = store.lock().await;
    let mut goals = list(store).await?;
    let before = goals.value.len();
    goals.value.retain(|g| g.id != id);
    let removed = goals.value.len() != before;
    if removed {
        save_state(store, USER_GOALS, &goals.value).await?;
        tracing::info!(goal_id = %id, "goal deleted");
    }
    Ok(goals.with(removed))
}

/// Apply a user-requested status change.
pub async fn set_status(
    store: &Store,
    id: Uuid,
    status: GoalStatus,
    now: jiff::Timestamp,
) -> Result<Loaded<UserGoal>, StorageError> {
    let _guard = store.lock().await;
    let mut goals = list(store).await?;
    let goal = goals
        .value
        .iter_mut()
        .find(|g| g.id == id)
        .ok_or(StorageError::GoalNotFound(id))?;
    let from = goal.status;
    progress::transition(goal, status, now)?;
    let updated = goal.clone();
    save_state(store, USER_GOALS, &goals.value).await?;

    tracing::info!(goal_id = %id, %from, to = %status, "goal status changed");
    Ok(goals.with(updated))
}

/// Evaluate active goals against the latest completed set, saving only when
/// something changed.
pub async fn refresh(
    store: &Store,
    now: jiff::Timestamp,
) -> Result<Loaded<(Vec<UserGoal>, GoalRefresh)>, StorageError> {
    let _guard = store.lock().await;
    let history = history::list(store).await?;
    let mut goals = list(store).await?;

    let summary = progress::refresh_goals(&mut goals.value, &history.value, now);
    if summary.is_dirty() {
        save_state(store, USER_GOALS, &goals.value).await?;
        tracing::info!(
            scores_updated = summary.scores_updated,
            achieved = summary.achieved.len(),
            missed = summary.missed.len(),
            "goals refreshed"
        );
    }

    Ok(Loaded {
        value: (goals.value, summary),
        recovered: history.recovered || goals.recovered,
    })
}
