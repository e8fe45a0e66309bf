use axum::Json;
use axum::extract::State;
use serde::Serialize;

use manasooth_storage::state::clear_all;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct Cleared {
    cleared: bool,
}

/// Remove every stored blob. Conversations in memory are dropped too.
pub async fn clear_data(State(state): State<AppState>) -> Result<Json<Cleared>, ApiError> {
    let cleared = clear_all(&state.store).await?;
    state.sessions.lock().await.clear();
    tracing::info!(cleared, "all user data cleared");
    Ok(Json(Cleared { cleared }))
}
