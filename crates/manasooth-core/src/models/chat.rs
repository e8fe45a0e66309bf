use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ChatSender {
    User,
    Ai,
}

/// A message as passed to the model: sender and text only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatMessage {
    pub sender: ChatSender,
    pub text: String,
}

/// A message in an in-memory transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TranscriptMessage {
    pub sender: ChatSender,
    pub text: String,
    pub timestamp: jiff::Timestamp,
}

impl TranscriptMessage {
    pub fn now(sender: ChatSender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: jiff::Timestamp::now(),
        }
    }
}
