use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole, Message, SystemContentBlock};
use tracing::info;

use manasooth_core::models::chat::{ChatMessage, ChatSender};

use crate::error::BedrockError;

/// Default Converse model: a US cross-region Claude inference profile.
pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";

/// A hosted language model that answers a system prompt plus a conversation.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send the conversation and return the model's text reply.
    async fn converse(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Result<String, BedrockError>;

    fn model_id(&self) -> &str;
}

/// [`ModelClient`] backed by the Bedrock Converse API.
#[derive(Debug, Clone)]
pub struct BedrockClient {
    client: Client,
    model_id: String,
}

impl BedrockClient {
    pub fn new(config: &aws_config::SdkConfig, model_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(config),
            model_id: model_id.into(),
        }
    }

    /// Build a client from the default AWS credential chain.
    pub async fn from_env(region: &str, model_id: impl Into<String>) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;
        Self::new(&config, model_id)
    }
}

#[async_trait]
impl ModelClient for BedrockClient {
    async fn converse(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Result<String, BedrockError> {
        let mut converse_messages: Vec<Message> = Vec::with_capacity(messages.len());
        for msg in messages {
            let role = match msg.sender {
                ChatSender::User => ConversationRole::User,
                ChatSender::Ai => ConversationRole::Assistant,
            };
            let message = Message::builder()
                .role(role)
                .content(ContentBlock::Text(msg.text.clone()))
                .build()
                .map_err(|e| BedrockError::Invocation(e.to_string()))?;
            converse_messages.push(message);
        }

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(system_prompt.to_string()))
            .set_messages(Some(converse_messages))
            .send()
            .await
            .map_err(|e| BedrockError::Invocation(e.into_service_error().to_string()))?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| BedrockError::ResponseParse("no message in response".to_string()))?;

        let response_text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        if let Some(usage) = response.usage() {
            info!(
                model = %self.model_id,
                input_tokens = usage.input_tokens(),
                output_tokens = usage.output_tokens(),
                "converse complete"
            );
        }

        Ok(response_text)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
