use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use manasooth_core::models::chat::{ChatMessage, ChatSender};

use crate::client::ModelClient;
use crate::error::BedrockError;
use crate::prompts::{self, CHATBOT};

/// Messages of history sent with each request (five exchanges).
pub const HISTORY_WINDOW: usize = 10;

pub const FALLBACK_REPLY: &str =
    "I'm having a little trouble connecting right now. Please try again in a moment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ChatTone {
    Empathetic,
    Motivational,
    Calm,
    Neutral,
    Direct,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChatbotInput {
    pub message: String,
    #[serde(default)]
    pub preferred_tone: Option<ChatTone>,
    #[serde(default)]
    pub chat_history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatbotReply {
    pub response: String,
}

impl ChatbotReply {
    pub fn fallback() -> Self {
        Self {
            response: FALLBACK_REPLY.to_string(),
        }
    }
}

#[derive(Serialize)]
struct PromptContext<'a> {
    message: &'a str,
    preferred_tone: Option<ChatTone>,
    chat_history: &'a [ChatMessage],
}

/// The tail of `history` that is sent to the model.
pub fn recent_history(history: &[ChatMessage]) -> &[ChatMessage] {
    &history[history.len().saturating_sub(HISTORY_WINDOW)..]
}

pub fn build_prompt(input: &ChatbotInput) -> Result<String, BedrockError> {
    let context = PromptContext {
        message: &input.message,
        preferred_tone: input.preferred_tone,
        chat_history: recent_history(&input.chat_history),
    };
    prompts::render_prompt(CHATBOT, &context)
}

/// Produce one supportive reply to the user's message.
pub async fn chat(
    client: &dyn ModelClient,
    input: &ChatbotInput,
) -> Result<ChatbotReply, BedrockError> {
    let system_prompt = build_prompt(input)?;
    info!(
        model = client.model_id(),
        tone = ?input.preferred_tone,
        history = recent_history(&input.chat_history).len(),
        "chatbot request"
    );

    let request = [ChatMessage {
        sender: ChatSender::User,
        text: input.message.clone(),
    }];
    let response = client.converse(&system_prompt, &request).await?;
    let response = response.trim();
    if response.is_empty() {
        return Err(BedrockError::SchemaViolation(
            "chatbot returned an empty response".to_string(),
        ));
    }

    Ok(ChatbotReply {
        response: response.to_string(),
    })
}
