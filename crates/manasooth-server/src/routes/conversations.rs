//! Conversational walk through one questionnaire. Sessions live in memory
//! only; a finished questionnaire's score goes to the stored current scores.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use manasooth_core::models::chat::TranscriptMessage;
use manasooth_instruments::conversation::{
    CompletedQuestionnaire, ConversationSession, Reply, Stage,
};
use manasooth_storage::scores;

use crate::error::ApiError;
use crate::routes::WithWarnings;
use crate::state::{AppState, TrackedSession, prune_idle};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Started {
    id: Uuid,
    greeting: String,
    stage: Stage,
}

pub async fn start(State(state): State<AppState>) -> Json<Started> {
    let now = jiff::Timestamp::now();
    let session = ConversationSession::new();
    let id = Uuid::new_v4();
    let started = Started {
        id,
        greeting: session.greeting().to_string(),
        stage: session.stage(),
    };

    let mut sessions = state.sessions.lock().await;
    let pruned = prune_idle(&mut sessions, now);
    if pruned > 0 {
        tracing::debug!(pruned, "idle conversations dropped");
    }
    sessions.insert(
        id,
        TrackedSession {
            session,
            last_active: now,
        },
    );
    tracing::info!(conversation_id = %id, active = sessions.len(), "conversation started");

    Json(started)
}

#[derive(Deserialize)]
pub struct MessageRequest {
    text: String,
}

pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MessageRequest>,
) -> Result<Json<WithWarnings<Reply>>, ApiError> {
    let reply = {
        let mut sessions = state.sessions.lock().await;
        let tracked = sessions
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("conversation not found: {id}")))?;
        let reply = tracked
            .session
            .respond(&req.text)
            .ok_or_else(|| ApiError::BadRequest("message text must not be empty".to_string()))?;
        tracked.last_active = jiff::Timestamp::now();
        reply
    };

    let mut recovered = false;
    if let Some(CompletedQuestionnaire { assessment, score }) = reply.completed {
        let recorded = scores::record(&state.store, assessment, score).await?;
        recovered = recorded.recovered;
        tracing::info!(conversation_id = %id, %assessment, score, "conversational assessment completed");
    }

    Ok(Json(WithWarnings::new(reply, recovered)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationView {
    id: Uuid,
    stage: Stage,
    transcript: Vec<TranscriptMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed: Option<CompletedQuestionnaire>,
}

pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConversationView>, ApiError> {
    let sessions = state.sessions.lock().await;
    let tracked = sessions
        .get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("conversation not found: {id}")))?;

    Ok(Json(ConversationView {
        id,
        stage: tracked.session.stage(),
        transcript: tracked.session.transcript().to_vec(),
        completed: tracked.session.completed(),
    }))
}
