use axum::Json;
use axum::extract::Path;

use manasooth_core::helplines::{self, Helpline, HelplineDirectory};

use crate::error::ApiError;

pub async fn list_helplines() -> Json<HelplineDirectory> {
    Json(helplines::directory())
}

pub async fn get_helpline(
    Path(id): Path<String>,
) -> Result<Json<&'static Helpline>, ApiError> {
    helplines::find(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("helpline not found: {id}")))
}
