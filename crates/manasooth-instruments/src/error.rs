use thiserror::Error;

use manasooth_core::models::assessment::AssessmentType;
use manasooth_core::models::goal::GoalStatus;

use crate::scoring::AnswerError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown questionnaire: {0}")]
    UnknownQuestionnaire(String),

    #[error("invalid answers for {assessment} ({} problem(s))", .errors.len())]
    InvalidAnswers {
        assessment: AssessmentType,
        errors: Vec<AnswerError>,
    },

    #[error("no assessments selected")]
    EmptySelection,
}

#[derive(Debug, Error)]
pub enum GoalError {
    #[error("target value must be positive, got {0}")]
    NegativeTarget(f64),

    #[error("you need to complete a {} assessment first to set an improvement goal", .0.display_name())]
    MissingStartScore(AssessmentType),

    #[error("cannot move goal from {from} to {to}")]
    InvalidTransition { from: GoalStatus, to: GoalStatus },
}
