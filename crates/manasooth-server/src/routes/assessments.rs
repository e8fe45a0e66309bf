use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use manasooth_bedrock::analyze::{
    ActiveGoalSummary, AnalyzeAssessmentInput, AssessmentAnalysis, analyze_assessment,
};
use manasooth_core::models::assessment::{AssessmentType, CompletedAssessmentSet, CurrentScores};
use manasooth_instruments::find_questionnaire;
use manasooth_instruments::flow::ordered_flow;
use manasooth_instruments::scoring::Answers;
use manasooth_storage::{flow, goals, history, scores};

use crate::error::ApiError;
use crate::report::{self, Report, ScoreLine};
use crate::routes::WithWarnings;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct FlowRequest {
    assessments: Vec<AssessmentType>,
}

#[derive(Serialize)]
pub struct FlowBody {
    flow: Vec<AssessmentType>,
}

/// Start a session: order the selection, store it, and reset current scores.
pub async fn select_flow(
    State(state): State<AppState>,
    Json(req): Json<FlowRequest>,
) -> Result<Json<FlowBody>, ApiError> {
    let ordered = ordered_flow(&req.assessments)?;
    flow::set(&state.store, &ordered).await?;
    scores::clear(&state.store).await?;
    Ok(Json(FlowBody { flow: ordered }))
}

pub async fn get_flow(
    State(state): State<AppState>,
) -> Result<Json<WithWarnings<FlowBody>>, ApiError> {
    let loaded = flow::get(&state.store).await?;
    Ok(Json(WithWarnings::new(
        FlowBody { flow: loaded.value },
        loaded.recovered,
    )))
}

#[derive(Deserialize)]
pub struct SubmitRequest {
    answers: Answers,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBody {
    assessment_type: AssessmentType,
    score: u32,
    interpretation: String,
    /// The questionnaire to take next, if the flow is not finished.
    next: Option<AssessmentType>,
    remaining: Vec<AssessmentType>,
}

pub async fn submit_answers(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<WithWarnings<SubmitBody>>, ApiError> {
    let questionnaire = find_questionnaire(&id)?;
    let assessment = questionnaire.assessment_type();
    let score = questionnaire.score(&req.answers)?;
    tracing::info!(%assessment, score, "assessment scored");

    let recorded = scores::record(&state.store, assessment, score).await?;
    let remaining = flow::advance(&state.store, assessment).await?;

    Ok(Json(WithWarnings::new(
        SubmitBody {
            assessment_type: assessment,
            score,
            interpretation: questionnaire.interpret(score),
            next: remaining.value.first().copied(),
            remaining: remaining.value,
        },
        recorded.recovered || remaining.recovered,
    )))
}

#[derive(Serialize)]
pub struct CurrentBody {
    scores: CurrentScores,
}

pub async fn current_scores(
    State(state): State<AppState>,
) -> Result<Json<WithWarnings<CurrentBody>>, ApiError> {
    let loaded = scores::load(&state.store).await?;
    Ok(Json(WithWarnings::new(
        CurrentBody {
            scores: loaded.value,
        },
        loaded.recovered,
    )))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsRequest {
    #[serde(default)]
    user_context: Option<String>,
    #[serde(default)]
    preferred_recommendation_types: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsBody {
    analysis: AssessmentAnalysis,
    interpretations: Vec<ScoreLine>,
    /// False when the model call failed and the fallback was returned.
    saved: bool,
}

/// Analyse the current scores and, when the model answers, record the set
/// in history.
pub async fn results(
    State(state): State<AppState>,
    Json(req): Json<ResultsRequest>,
) -> Result<Json<WithWarnings<ResultsBody>>, ApiError> {
    let current = scores::load(&state.store).await?;
    if current.value.is_empty() {
        return Err(ApiError::BadRequest(
            "complete at least one questionnaire before requesting results".to_string(),
        ));
    }
    let stored_goals = goals::list(&state.store).await?;

    let active_goals = stored_goals
        .value
        .iter()
        .filter(|g| g.is_active())
        .map(|g| {
            let assessment_name = g.assessment_type.display_name().to_string();
            ActiveGoalSummary {
                description: g
                    .description
                    .clone()
                    .unwrap_or_else(|| format!("Goal for {assessment_name}")),
                assessment_name,
            }
        })
        .collect();

    let scores = current.value;
    let input = AnalyzeAssessmentInput {
        who5_score: scores.who5.unwrap_or(0),
        gad7_score: scores.gad7.unwrap_or(0),
        phq9_score: scores.phq9.unwrap_or(0),
        user_context: req.user_context,
        preferred_recommendation_types: req.preferred_recommendation_types,
        active_goals,
    };

    let mut recovered = current.recovered || stored_goals.recovered;
    let (analysis, saved) = match analyze_assessment(state.model.as_ref(), &input).await {
        Ok(analysis) => {
            let set = CompletedAssessmentSet {
                date: jiff::Timestamp::now(),
                who5_score: scores.who5,
                gad7_score: scores.gad7,
                phq9_score: scores.phq9,
                ai_feedback: Some(analysis.feedback.clone()),
                ai_recommendations: Some(analysis.recommendations.clone()),
                requires_consultation: Some(analysis.requires_consultation),
            };
            let appended = history::append(&state.store, set).await?;
            recovered |= appended.recovered;
            (analysis, true)
        }
        Err(e) => {
            tracing::warn!(error = %e, "assessment analysis failed, using fallback");
            (AssessmentAnalysis::fallback(), false)
        }
    };

    Ok(Json(WithWarnings::new(
        ResultsBody {
            analysis,
            interpretations: report::score_lines(&scores),
            saved,
        },
        recovered,
    )))
}

async fn load_report(state: &AppState) -> Result<(Report, bool), ApiError> {
    let past = history::list(&state.store).await?;
    let current = scores::load(&state.store).await?;
    let report = report::build_report(&past.value, &current.value, jiff::Timestamp::now())
        .ok_or_else(|| ApiError::NotFound("no assessment results yet".to_string()))?;
    Ok((report, past.recovered || current.recovered))
}

pub async fn get_report(
    State(state): State<AppState>,
) -> Result<Json<WithWarnings<Report>>, ApiError> {
    let (report, recovered) = load_report(&state).await?;
    Ok(Json(WithWarnings::new(report, recovered)))
}

pub async fn get_report_markdown(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let (report, _) = load_report(&state).await?;
    let markdown = report::render_markdown(&report)?;
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        markdown,
    ))
}
