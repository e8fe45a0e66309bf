use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use manasooth_core::models::chat::{ChatMessage, ChatSender};

use crate::client::ModelClient;
use crate::error::BedrockError;
use crate::extract::parse_structured;
use crate::prompts::{self, ANALYZE_ASSESSMENT};

pub const FALLBACK_FEEDBACK: &str = "Could not load AI feedback.";
pub const FALLBACK_RECOMMENDATIONS: &str = "Could not load AI recommendations.";

/// An active goal as shown to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ActiveGoalSummary {
    pub description: String,
    pub assessment_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AnalyzeAssessmentInput {
    pub who5_score: u32,
    pub gad7_score: u32,
    pub phq9_score: u32,
    #[serde(default)]
    pub user_context: Option<String>,
    #[serde(default)]
    pub preferred_recommendation_types: Vec<String>,
    #[serde(default)]
    pub active_goals: Vec<ActiveGoalSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AssessmentAnalysis {
    pub feedback: String,
    pub recommendations: String,
    pub requires_consultation: bool,
}

impl AssessmentAnalysis {
    /// Placeholder used when the model call fails.
    pub fn fallback() -> Self {
        Self {
            feedback: FALLBACK_FEEDBACK.to_string(),
            recommendations: FALLBACK_RECOMMENDATIONS.to_string(),
            requires_consultation: false,
        }
    }
}

#[derive(Serialize)]
struct PromptContext<'a> {
    who5_score: u32,
    gad7_score: u32,
    phq9_score: u32,
    user_context: Option<&'a str>,
    preferred_recommendation_types: &'a [String],
    active_goals: Vec<PromptGoal<'a>>,
}

#[derive(Serialize)]
struct PromptGoal<'a> {
    description: &'a str,
    assessment_name: &'a str,
}

/// Render the analysis prompt for `input`.
pub fn build_prompt(input: &AnalyzeAssessmentInput) -> Result<String, BedrockError> {
    let context = PromptContext {
        who5_score: input.who5_score,
        gad7_score: input.gad7_score,
        phq9_score: input.phq9_score,
        user_context: input
            .user_context
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty()),
        preferred_recommendation_types: &input.preferred_recommendation_types,
        active_goals: input
            .active_goals
            .iter()
            .map(|g| PromptGoal {
                description: &g.description,
                assessment_name: &g.assessment_name,
            })
            .collect(),
    };
    prompts::render_prompt(ANALYZE_ASSESSMENT, &context)
}

/// Ask the model for feedback, recommendations, and a consultation verdict.
pub async fn analyze_assessment(
    client: &dyn ModelClient,
    input: &AnalyzeAssessmentInput,
) -> Result<AssessmentAnalysis, BedrockError> {
    let system_prompt = build_prompt(input)?;
    info!(
        model = client.model_id(),
        goals = input.active_goals.len(),
        "starting assessment analysis"
    );

    let request = [ChatMessage {
        sender: ChatSender::User,
        text: "Analyze my assessment results.".to_string(),
    }];
    let response = client.converse(&system_prompt, &request).await?;
    let analysis: AssessmentAnalysis = parse_structured(&response, "AssessmentAnalysis")?;

    info!(
        requires_consultation = analysis.requires_consultation,
        "assessment analysis complete"
    );
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedClient;

    fn input() -> AnalyzeAssessmentInput {
        AnalyzeAssessmentInput {
            who5_score: 44,
            gad7_score: 12,
            phq9_score: 0,
            user_context: None,
            preferred_recommendation_types: vec![],
            active_goals: vec![],
        }
    }

    #[test]
    fn prompt_includes_scores_and_omits_empty_sections() {
        let prompt = build_prompt(&input()).unwrap();
        assert!(prompt.contains("WHO-5 Wellbeing Index Score: 44"));
        assert!(prompt.contains("GAD-7 Anxiety Assessment Score: 12"));
        assert!(prompt.contains("PHQ-9 Depression Screening Score: 0"));
        assert!(!prompt.contains("additional context"));
        assert!(!prompt.contains("preferred recommendation types"));
        assert!(!prompt.contains("active wellbeing goals"));
    }

    #[test]
    fn prompt_includes_context_preferences_and_goals() {
        let mut input = input();
        input.user_context = Some("Work has been stressful.".to_string());
        input.preferred_recommendation_types =
            vec!["sleep hygiene tips".to_string(), "physical activity".to_string()];
        input.active_goals = vec![ActiveGoalSummary {
            description: "Reach a score of 5 for GAD-7 Anxiety Assessment.".to_string(),
            assessment_name: "GAD-7 Anxiety Assessment".to_string(),
        }];

        let prompt = build_prompt(&input).unwrap();
        assert!(prompt.contains("User's additional context: \"Work has been stressful.\""));
        assert!(prompt.contains("sleep hygiene tips, physical activity."));
        assert!(prompt.contains(
            "- Goal for GAD-7 Anxiety Assessment: \"Reach a score of 5 for GAD-7 Anxiety Assessment.\""
        ));
    }

    #[test]
    fn input_accepts_minimal_json() {
        let input: AnalyzeAssessmentInput =
            serde_json::from_str(r#"{"who5Score":80,"gad7Score":2,"phq9Score":3}"#).unwrap();
        assert!(input.active_goals.is_empty());
        assert_eq!(input.user_context, None);
    }

    #[tokio::test]
    async fn fenced_json_reply_is_parsed() {
        let client = ScriptedClient::with_replies(vec![Ok(
            "```json\n{\"feedback\":\"f\",\"recommendations\":\"r\",\"requiresConsultation\":true}\n```"
                .to_string(),
        )]);
        let analysis = analyze_assessment(&client, &input()).await.unwrap();
        assert_eq!(analysis.feedback, "f");
        assert!(analysis.requires_consultation);

        let calls = client.calls().await;
        assert_eq!(calls.len(), 1);
        assert!(calls[0].system_prompt.contains("Score: 44"));
    }

    #[tokio::test]
    async fn malformed_reply_is_a_schema_violation() {
        let client = ScriptedClient::with_replies(vec![Ok("{\"feedback\": 1}".to_string())]);
        assert!(matches!(
            analyze_assessment(&client, &input()).await,
            Err(BedrockError::SchemaViolation(_))
        ));
    }

    #[test]
    fn fallback_never_requests_consultation() {
        let fallback = AssessmentAnalysis::fallback();
        assert_eq!(fallback.feedback, FALLBACK_FEEDBACK);
        assert!(!fallback.requires_consultation);
    }
}
