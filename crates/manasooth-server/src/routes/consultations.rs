use axum::Json;
use axum::extract::State;
use rand::distributions::{Bernoulli, Distribution};

use manasooth_bedrock::consultation::{BookingOutcome, BookingRequest, book_consultation};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn book(
    State(state): State<AppState>,
    Json(req): Json<BookingRequest>,
) -> Result<Json<BookingOutcome>, ApiError> {
    if req.date.trim().is_empty() || req.time.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "please select a date and time for the consultation".to_string(),
        ));
    }
    let high_demand = Bernoulli::new(state.decline_rate)
        .map_err(|e| ApiError::Internal(format!("booking decline rate: {e}")))?;

    let mut rng = rand::thread_rng();
    let decline = high_demand.sample(&mut rng);
    Ok(Json(book_consultation(
        &req,
        decline,
        jiff::Timestamp::now(),
        &mut rng,
    )))
}
