use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid assessment type: {0}")]
    InvalidAssessmentType(String),

    #[error("invalid mood level: {0} (expected 1-5)")]
    InvalidMoodLevel(u8),

    #[error("invalid goal status: {0}")]
    InvalidGoalStatus(String),
}
