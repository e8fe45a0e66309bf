pub mod assessments;
pub mod chat;
pub mod consultations;
pub mod conversations;
pub mod data;
pub mod goals;
pub mod health;
pub mod helplines;
pub mod mood;
pub mod progress;
pub mod questionnaires;

use serde::Serialize;

/// Shown when a stored value could not be parsed and was reset.
pub const RECOVERED_WARNING: &str =
    "Some saved data was unreadable and has been reset to empty.";

/// A response body plus any data-recovery warnings.
#[derive(Debug, Serialize)]
pub struct WithWarnings<T> {
    #[serde(flatten)]
    pub body: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl<T> WithWarnings<T> {
    pub fn new(body: T, recovered: bool) -> Self {
        Self {
            body,
            warnings: warnings(recovered),
        }
    }
}

pub fn warnings(recovered: bool) -> Vec<String> {
    if recovered {
        vec![RECOVERED_WARNING.to_string()]
    } else {
        Vec::new()
    }
}
