use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use manasooth_core::models::mood::{MoodEntry, MoodLevel};
use manasooth_storage::mood;

use crate::error::ApiError;
use crate::routes::WithWarnings;
use crate::state::AppState;

#[derive(Serialize)]
pub struct MoodList {
    entries: Vec<MoodEntry>,
}

pub async fn list_mood(
    State(state): State<AppState>,
) -> Result<Json<WithWarnings<MoodList>>, ApiError> {
    let loaded = mood::list(&state.store).await?;
    Ok(Json(WithWarnings::new(
        MoodList {
            entries: loaded.value,
        },
        loaded.recovered,
    )))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodRequest {
    mood_level: u8,
    #[serde(default)]
    notes: Option<String>,
    /// Comma-separated, e.g. `"walk, reading"`.
    #[serde(default)]
    activities: String,
}

pub async fn add_mood(
    State(state): State<AppState>,
    Json(req): Json<MoodRequest>,
) -> Result<Json<WithWarnings<MoodEntry>>, ApiError> {
    let level = MoodLevel::new(req.mood_level)?;
    let added = mood::add(
        &state.store,
        level,
        req.notes,
        &req.activities,
        jiff::Timestamp::now(),
    )
    .await?;
    Ok(Json(WithWarnings::new(added.value, added.recovered)))
}

#[derive(Serialize)]
pub struct Deleted {
    deleted: bool,
}

pub async fn delete_mood(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WithWarnings<Deleted>>, ApiError> {
    let removed = mood::delete(&state.store, id).await?;
    if !removed.value {
        return Err(ApiError::NotFound(format!("mood entry not found: {id}")));
    }
    Ok(Json(WithWarnings::new(Deleted { deleted: true }, removed.recovered)))
}
