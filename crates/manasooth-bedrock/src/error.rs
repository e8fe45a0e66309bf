use thiserror::Error;

#[derive(Debug, Error)]
pub enum BedrockError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("response did not conform to expected schema: {0}")]
    SchemaViolation(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("prompt template error: {0}")]
    Template(String),

    #[error("AWS config error: {0}")]
    Config(String),
}

impl From<tera::Error> for BedrockError {
    fn from(e: tera::Error) -> Self {
        BedrockError::Template(e.to_string())
    }
}
