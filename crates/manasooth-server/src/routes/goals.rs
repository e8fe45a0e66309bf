use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use manasooth_core::models::goal::{GoalStatus, UserGoal};
use manasooth_instruments::progress::{GoalDraft, progress_percent};
use manasooth_storage::goals;

use crate::error::ApiError;
use crate::routes::WithWarnings;
use crate::state::AppState;

/// A goal with its progress towards the target, 0-100, and whether it is
/// still active past its target date.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalView {
    #[serde(flatten)]
    goal: UserGoal,
    progress_percent: f64,
    overdue: bool,
}

impl From<UserGoal> for GoalView {
    fn from(goal: UserGoal) -> Self {
        Self {
            progress_percent: progress_percent(&goal),
            overdue: goal.is_overdue(jiff::Timestamp::now()),
            goal,
        }
    }
}

#[derive(Serialize)]
pub struct GoalList {
    goals: Vec<GoalView>,
}

pub async fn list_goals(
    State(state): State<AppState>,
) -> Result<Json<WithWarnings<GoalList>>, ApiError> {
    let loaded = goals::list(&state.store).await?;
    let goals = loaded.value.into_iter().map(GoalView::from).collect();
    Ok(Json(WithWarnings::new(GoalList { goals }, loaded.recovered)))
}

pub async fn get_goal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WithWarnings<GoalView>>, ApiError> {
    let loaded = goals::get(&state.store, id).await?;
    let goal = loaded
        .value
        .ok_or_else(|| ApiError::NotFound(format!("goal not found: {id}")))?;
    Ok(Json(WithWarnings::new(goal.into(), loaded.recovered)))
}

pub async fn create_goal(
    State(state): State<AppState>,
    Json(draft): Json<GoalDraft>,
) -> Result<Json<WithWarnings<GoalView>>, ApiError> {
    let created = goals::create(&state.store, &draft, jiff::Timestamp::now()).await?;
    Ok(Json(WithWarnings::new(created.value.into(), created.recovered)))
}

pub async fn update_goal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<GoalDraft>,
) -> Result<Json<WithWarnings<GoalView>>, ApiError> {
    let updated = goals::update(&state.store, id, &draft, jiff::Timestamp::now()).await?;
    Ok(Json(WithWarnings::new(updated.value.into(), updated.recovered)))
}

#[derive(Serialize)]
pub struct Deleted {
    deleted: bool,
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WithWarnings<Deleted>>, ApiError> {
    let removed = goals::delete(&state.store, id).await?;
    if !removed.value {
        return Err(ApiError::NotFound(format!("goal not found: {id}")));
    }
    Ok(Json(WithWarnings::new(Deleted { deleted: true }, removed.recovered)))
}

#[derive(Deserialize)]
pub struct StatusRequest {
    status: GoalStatus,
}

pub async fn set_goal_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<WithWarnings<GoalView>>, ApiError> {
    let updated = goals::set_status(&state.store, id, req.status, jiff::Timestamp::now()).await?;
    Ok(Json(WithWarnings::new(updated.value.into(), updated.recovered)))
}
