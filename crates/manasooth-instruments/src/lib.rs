//! manasooth-instruments
//!
//! Self-report questionnaire definitions and everything computed from their
//! scores: interpretation bands, consultation thresholds, the assessment
//! flow, goal progress, and the conversational assessment walk. Pure logic,
//! no I/O.

pub mod conversation;
pub mod error;
pub mod flow;
pub mod progress;
pub mod questionnaires;
pub mod scoring;

use manasooth_core::models::assessment::{AssessmentType, CurrentScores};

use error::InstrumentError;
use scoring::{AnswerError, AnswerErrorKind, Answers, InterpretationBand, Question};

/// Trait implemented by each questionnaire.
pub trait Questionnaire: Send + Sync {
    fn assessment_type(&self) -> AssessmentType;

    /// Human-readable name (e.g., "WHO-5 Well-being Index").
    fn name(&self) -> &str {
        self.assessment_type().display_name()
    }

    fn scoring_note(&self) -> &str;

    fn questions(&self) -> &[Question];

    /// Published scoring bands, inclusive ranges over the final score.
    fn interpretation(&self) -> &[InterpretationBand];

    /// Factor applied to the raw item sum.
    fn multiplier(&self) -> u32 {
        1
    }

    fn max_score(&self) -> u32 {
        self.questions().iter().map(Question::max_value).sum::<u32>() * self.multiplier()
    }

    fn higher_is_better(&self) -> bool {
        self.assessment_type().higher_is_better()
    }

    /// Check that every question has exactly one valid answer and nothing else
    /// was submitted.
    fn validate_answers(&self, answers: &Answers) -> Vec<AnswerError> {
        let questions = self.questions();
        let mut errors = Vec::new();

        for question in questions {
            match answers.get(&question.id) {
                None => errors.push(AnswerError {
                    question_id: question.id.clone(),
                    kind: AnswerErrorKind::Missing,
                    value: None,
                    message: format!("{}: question {} has no answer", self.name(), question.id),
                }),
                Some(&value) if !question.accepts(value) => errors.push(AnswerError {
                    question_id: question.id.clone(),
                    kind: AnswerErrorKind::InvalidOption,
                    value: Some(value),
                    message: format!(
                        "{}: {} is not an option for question {} (0-{})",
                        self.name(),
                        value,
                        question.id,
                        question.max_value(),
                    ),
                }),
                Some(_) => {}
            }
        }

        for (id, value) in answers {
            if !questions.iter().any(|q| &q.id == id) {
                errors.push(AnswerError {
                    question_id: id.clone(),
                    kind: AnswerErrorKind::UnknownQuestion,
                    value: Some(*value),
                    message: format!("{}: unknown question {id}", self.name()),
                });
            }
        }

        errors
    }

    /// Apply the multiplier to already-validated item values.
    fn scaled_total(&self, values: &[u32]) -> u32 {
        values.iter().sum::<u32>() * self.multiplier()
    }

    fn score(&self, answers: &Answers) -> Result<u32, InstrumentError> {
        let errors = self.validate_answers(answers);
        if !errors.is_empty() {
            return Err(InstrumentError::InvalidAnswers {
                assessment: self.assessment_type(),
                errors,
            });
        }
        let values: Vec<u32> = answers.values().copied().collect();
        Ok(self.scaled_total(&values))
    }

    fn band(&self, score: u32) -> Option<&str> {
        self.interpretation()
            .iter()
            .find(|b| b.contains(score))
            .map(|b| b.label.as_str())
    }

    /// `"Moderate anxiety (Score: 12)"`, or `"Score: 12"` outside every band.
    fn interpret(&self, score: u32) -> String {
        match self.band(score) {
            Some(label) => format!("{label} (Score: {score})"),
            None => format!("Score: {score}"),
        }
    }
}

/// Return all registered questionnaires, in flow order.
pub fn all_questionnaires() -> Vec<Box<dyn Questionnaire>> {
    vec![
        Box::new(questionnaires::who5::Who5),
        Box::new(questionnaires::gad7::Gad7),
        Box::new(questionnaires::phq9::Phq9),
    ]
}

pub fn get_questionnaire(assessment: AssessmentType) -> Box<dyn Questionnaire> {
    match assessment {
        AssessmentType::Who5 => Box::new(questionnaires::who5::Who5),
        AssessmentType::Gad7 => Box::new(questionnaires::gad7::Gad7),
        AssessmentType::Phq9 => Box::new(questionnaires::phq9::Phq9),
    }
}

/// Look up a questionnaire by its string id (`"who5"`, `"gad7"`, `"phq9"`).
pub fn find_questionnaire(id: &str) -> Result<Box<dyn Questionnaire>, InstrumentError> {
    id.parse::<AssessmentType>()
        .map(get_questionnaire)
        .map_err(|_| InstrumentError::UnknownQuestionnaire(id.to_string()))
}

/// Interpretation of a possibly-missing score.
pub fn interpret_score(assessment: AssessmentType, score: Option<u32>) -> String {
    match score {
        Some(s) => get_questionnaire(assessment).interpret(s),
        None => "Not taken".to_string(),
    }
}

pub const WHO5_CONSULTATION_BELOW: u32 = 50;
pub const GAD7_CONSULTATION_AT: u32 = 10;
pub const PHQ9_CONSULTATION_AT: u32 = 10;

/// Whether the scores alone suggest a professional consultation: poor
/// well-being, or moderate-or-worse anxiety or depression. Missing scores
/// never trigger it.
pub fn requires_consultation(scores: &CurrentScores) -> bool {
    scores.who5.is_some_and(|s| s < WHO5_CONSULTATION_BELOW)
        || scores.gad7.is_some_and(|s| s >= GAD7_CONSULTATION_AT)
        || scores.phq9.is_some_and(|s| s >= PHQ9_CONSULTATION_AT)
}
