use axum::Json;
use axum::extract::State;
use serde::Serialize;

use manasooth_core::models::assessment::CompletedAssessmentSet;
use manasooth_instruments::progress::GoalRefresh;
use manasooth_storage::{goals, history};

use crate::error::ApiError;
use crate::routes::WithWarnings;
use crate::routes::goals::GoalView;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressBody {
    history: Vec<CompletedAssessmentSet>,
    goals: Vec<GoalView>,
    /// What changed when the goals were checked against the latest set.
    goal_updates: GoalRefresh,
}

/// History oldest first, plus goals re-evaluated against the latest set.
pub async fn get_progress(
    State(state): State<AppState>,
) -> Result<Json<WithWarnings<ProgressBody>>, ApiError> {
    let refreshed = goals::refresh(&state.store, jiff::Timestamp::now()).await?;
    let past = history::list(&state.store).await?;

    let (goal_list, goal_updates) = refreshed.value;
    Ok(Json(WithWarnings::new(
        ProgressBody {
            history: past.value,
            goals: goal_list.into_iter().map(GoalView::from).collect(),
            goal_updates,
        },
        refreshed.recovered || past.recovered,
    )))
}
