//! Scripted [`ModelClient`] for tests.

use async_trait::async_trait;
use tokio::sync::Mutex;

use manasooth_core::models::chat::ChatMessage;

use crate::client::ModelClient;
use crate::error::BedrockError;

/// A recorded call to [`ScriptedClient::converse`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub messages: Vec<ChatMessage>,
}

/// Returns scripted replies in FIFO order, then `"Mock response"` once the
/// script runs out.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<Vec<Result<String, BedrockError>>>,
    call_log: Mutex<Vec<RecordedCall>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: Vec<Result<String, BedrockError>>) -> Self {
        Self {
            replies: Mutex::new(replies),
            call_log: Mutex::new(Vec::new()),
        }
    }

    /// A client whose every call fails.
    pub fn failing(times: usize) -> Self {
        Self::with_replies(
            (0..times)
                .map(|_| Err(BedrockError::Invocation("scripted failure".to_string())))
                .collect(),
        )
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.call_log.lock().await.clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedClient {
    async fn converse(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Result<String, BedrockError> {
        self.call_log.lock().await.push(RecordedCall {
            system_prompt: system_prompt.to_string(),
            messages: messages.to_vec(),
        });

        let mut replies = self.replies.lock().await;
        if replies.is_empty() {
            Ok("Mock response".to_string())
        } else {
            replies.remove(0)
        }
    }

    fn model_id(&self) -> &str {
        "mock"
    }
}
