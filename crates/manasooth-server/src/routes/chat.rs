use axum::Json;
use axum::extract::State;
use serde::Serialize;

use manasooth_bedrock::chatbot::{self, ChatbotInput, ChatbotReply};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ChatBody {
    response: String,
    /// True when the model was unreachable and a canned reply was sent.
    fallback: bool,
}

pub async fn chat(
    State(state): State<AppState>,
    Json(input): Json<ChatbotInput>,
) -> Result<Json<ChatBody>, ApiError> {
    if input.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }

    let body = match chatbot::chat(state.model.as_ref(), &input).await {
        Ok(ChatbotReply { response }) => ChatBody {
            response,
            fallback: false,
        },
        Err(e) => {
            tracing::warn!(error = %e, "chatbot call failed, using fallback");
            ChatBody {
                response: ChatbotReply::fallback().response,
                fallback: true,
            }
        }
    };
    Ok(Json(body))
}
