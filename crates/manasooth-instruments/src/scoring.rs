use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Answers keyed by question id (e.g. `"gad7_3" -> 2`).
pub type Answers = BTreeMap<String, u32>;

/// One selectable answer for a question.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerOption {
    pub text: String,
    pub value: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn accepts(&self, value: u32) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    pub fn max_value(&self) -> u32 {
        self.options.iter().map(|o| o.value).max().unwrap_or(0)
    }
}

/// A published scoring band, inclusive on both ends.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InterpretationBand {
    pub min: u32,
    pub max: u32,
    pub label: String,
}

impl InterpretationBand {
    pub fn contains(&self, score: u32) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AnswerErrorKind {
    Missing,
    InvalidOption,
    UnknownQuestion,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct AnswerError {
    pub question_id: String,
    pub kind: AnswerErrorKind,
    pub value: Option<u32>,
    pub message: String,
}

/// Build the option list shared by every item of a questionnaire.
pub(crate) fn options(labels: &[&str]) -> Vec<AnswerOption> {
    labels
        .iter()
        .enumerate()
        .map(|(value, text)| AnswerOption {
            text: text.to_string(),
            value: value as u32,
        })
        .collect()
}

pub(crate) fn questions(prefix: &str, texts: &[&str], options: &[AnswerOption]) -> Vec<Question> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| Question {
            id: format!("{prefix}_{}", i + 1),
            text: text.to_string(),
            options: options.to_vec(),
        })
        .collect()
}

pub(crate) fn bands(ranges: &[(u32, u32, &str)]) -> Vec<InterpretationBand> {
    ranges
        .iter()
        .map(|(min, max, label)| InterpretationBand {
            min: *min,
            max: *max,
            label: label.to_string(),
        })
        .collect()
}
