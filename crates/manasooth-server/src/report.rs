//! The results report shown after an assessment session, as JSON or
//! Markdown.

use serde::Serialize;
use tera::{Context, Tera};

use manasooth_bedrock::analyze::{FALLBACK_FEEDBACK, FALLBACK_RECOMMENDATIONS};
use manasooth_core::helplines::EMERGENCY_NUMBER;
use manasooth_core::models::assessment::{self, AssessmentType, CompletedAssessmentSet, CurrentScores};
use manasooth_instruments::{interpret_score, requires_consultation};

use crate::error::ApiError;

pub const NO_HISTORY_FEEDBACK: &str = "AI analysis not yet available for these scores (no history).";
pub const NO_HISTORY_RECOMMENDATIONS: &str =
    "AI recommendations not yet available for these scores (no history).";

const REPORT_TEMPLATE: &str = r#"# Manasooth Assessment Report

Date: {{ date }}

## Scores
{% for line in scores %}
- **{{ line.name }}**: {{ line.interpretation }}{% endfor %}

## Feedback

{{ ai_feedback }}

## Recommendations

{{ ai_recommendations }}
{% if requires_consultation %}
## Professional consultation

Your results suggest that speaking with a mental health professional could help. You can book a consultation from the app, or call {{ emergency_number }} in an emergency.
{% endif %}
---
This report is for self-reflection only and is not a diagnosis.
"#;

/// Where the report's contents came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSource {
    /// A completed set with exactly the current scores.
    MatchingHistory,
    /// The most recent completed set.
    LatestHistory,
    /// Current scores with no stored analysis.
    CurrentScores,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreLine {
    pub assessment: AssessmentType,
    pub name: &'static str,
    pub score: Option<u32>,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub date: jiff::Timestamp,
    pub source: ReportSource,
    pub scores: Vec<ScoreLine>,
    pub ai_feedback: String,
    pub ai_recommendations: String,
    pub requires_consultation: bool,
}

pub fn score_lines(scores: &CurrentScores) -> Vec<ScoreLine> {
    AssessmentType::FLOW
        .into_iter()
        .map(|t| ScoreLine {
            assessment: t,
            name: t.display_name(),
            score: scores.get(t),
            interpretation: interpret_score(t, scores.get(t)),
        })
        .collect()
}

fn from_set(set: &CompletedAssessmentSet, source: ReportSource) -> Report {
    let scores = set.scores();
    Report {
        date: set.date,
        source,
        scores: score_lines(&scores),
        ai_feedback: set
            .ai_feedback
            .clone()
            .unwrap_or_else(|| FALLBACK_FEEDBACK.to_string()),
        ai_recommendations: set
            .ai_recommendations
            .clone()
            .unwrap_or_else(|| FALLBACK_RECOMMENDATIONS.to_string()),
        requires_consultation: set
            .requires_consultation
            .unwrap_or_else(|| requires_consultation(&scores)),
    }
}

/// Pick the report: the newest set matching `current`, else the newest set,
/// else one built from `current` alone. `None` when there is nothing at all.
pub fn build_report(
    history: &[CompletedAssessmentSet],
    current: &CurrentScores,
    now: jiff::Timestamp,
) -> Option<Report> {
    if !current.is_empty() {
        let matching = history
            .iter()
            .filter(|s| s.matches(current))
            .max_by_key(|s| s.date);
        if let Some(set) = matching {
            return Some(from_set(set, ReportSource::MatchingHistory));
        }
    }

    if let Some(set) = assessment::latest(history) {
        return Some(from_set(set, ReportSource::LatestHistory));
    }

    if current.is_empty() {
        return None;
    }

    Some(Report {
        date: now,
        source: ReportSource::CurrentScores,
        scores: score_lines(current),
        ai_feedback: NO_HISTORY_FEEDBACK.to_string(),
        ai_recommendations: NO_HISTORY_RECOMMENDATIONS.to_string(),
        requires_consultation: requires_consultation(current),
    })
}

#[derive(Serialize)]
struct MarkdownContext<'a> {
    date: String,
    scores: &'a [ScoreLine],
    ai_feedback: &'a str,
    ai_recommendations: &'a str,
    requires_consultation: bool,
    emergency_number: &'a str,
}

pub fn render_markdown(report: &Report) -> Result<String, ApiError> {
    let mut tera = Tera::default();
    tera.add_raw_template("report.md", REPORT_TEMPLATE)?;

    let input = MarkdownContext {
        date: report.date.strftime("%B %-d, %Y").to_string(),
        scores: &report.scores,
        ai_feedback: &report.ai_feedback,
        ai_recommendations: &report.ai_recommendations,
        requires_consultation: report.requires_consultation,
        emergency_number: EMERGENCY_NUMBER,
    };
    let context = Context::from_value(serde_json::to_value(&input)?)?;
    Ok(tera.render("report.md", &context)?)
}
