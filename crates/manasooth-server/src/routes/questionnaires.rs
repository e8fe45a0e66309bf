use axum::Json;
use axum::extract::Path;
use serde::Serialize;

use manasooth_core::models::assessment::AssessmentType;
use manasooth_instruments::scoring::{InterpretationBand, Question};
use manasooth_instruments::{all_questionnaires, find_questionnaire};

use crate::error::ApiError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireSummary {
    assessment_type: AssessmentType,
    name: String,
    question_count: usize,
    max_score: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireDetail {
    assessment_type: AssessmentType,
    name: String,
    scoring_note: String,
    max_score: u32,
    higher_is_better: bool,
    questions: Vec<Question>,
    interpretation: Vec<InterpretationBand>,
}

pub async fn list_questionnaires() -> Json<Vec<QuestionnaireSummary>> {
    let summaries = all_questionnaires()
        .iter()
        .map(|q| QuestionnaireSummary {
            assessment_type: q.assessment_type(),
            name: q.name().to_string(),
            question_count: q.questions().len(),
            max_score: q.max_score(),
        })
        .collect();
    Json(summaries)
}

pub async fn get_questionnaire_detail(
    Path(id): Path<String>,
) -> Result<Json<QuestionnaireDetail>, ApiError> {
    let q = find_questionnaire(&id)?;

    Ok(Json(QuestionnaireDetail {
        assessment_type: q.assessment_type(),
        name: q.name().to_string(),
        scoring_note: q.scoring_note().to_string(),
        max_score: q.max_score(),
        higher_is_better: q.higher_is_better(),
        questions: q.questions().to_vec(),
        interpretation: q.interpretation().to_vec(),
    }))
}
