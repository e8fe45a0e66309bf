//! Pulling structured output out of free-form model replies.

use serde::de::DeserializeOwned;

use crate::error::BedrockError;

/// Strip a surrounding Markdown code fence (```` ```json ... ``` ````) and
/// any prose around the outermost JSON object.
pub fn extract_json(response: &str) -> &str {
    let mut text = response.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the info string (`json`) on the opening fence line.
        let body = rest.split_once('\n').map_or("", |(_, body)| body);
        text = body.trim_end().strip_suffix("```").unwrap_or(body).trim();
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// Parse a model reply as `T`, reporting a schema violation with the raw
/// reply when it does not fit.
pub fn parse_structured<T: DeserializeOwned>(
    response: &str,
    type_name: &str,
) -> Result<T, BedrockError> {
    serde_json::from_str(extract_json(response)).map_err(|e| {
        BedrockError::SchemaViolation(format!(
            "failed to parse {type_name}: {e}. Response: {response}"
        ))
    })
}
