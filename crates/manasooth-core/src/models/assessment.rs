use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// One of the supported self-report questionnaires.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum AssessmentType {
    Who5,
    Gad7,
    Phq9,
}

impl AssessmentType {
    /// Canonical order used when several questionnaires are taken together.
    pub const FLOW: [AssessmentType; 3] =
        [AssessmentType::Who5, AssessmentType::Gad7, AssessmentType::Phq9];

    pub fn id(self) -> &'static str {
        match self {
            AssessmentType::Who5 => "who5",
            AssessmentType::Gad7 => "gad7",
            AssessmentType::Phq9 => "phq9",
        }
    }

    /// Human-readable name, e.g. "GAD-7 Anxiety Assessment".
    pub fn display_name(self) -> &'static str {
        match self {
            AssessmentType::Who5 => "WHO-5 Well-being Index",
            AssessmentType::Gad7 => "GAD-7 Anxiety Assessment",
            AssessmentType::Phq9 => "PHQ-9 Depression Screening",
        }
    }

    /// WHO-5 measures well-being; GAD-7 and PHQ-9 measure symptom load.
    pub fn higher_is_better(self) -> bool {
        matches!(self, AssessmentType::Who5)
    }
}

impl fmt::Display for AssessmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AssessmentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "who5" => Ok(AssessmentType::Who5),
            "gad7" => Ok(AssessmentType::Gad7),
            "phq9" => Ok(AssessmentType::Phq9),
            other => Err(CoreError::InvalidAssessmentType(other.to_string())),
        }
    }
}

/// Scratch scores for the assessment session in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CurrentScores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub who5: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub gad7: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub phq9: Option<u32>,
}

impl CurrentScores {
    pub fn get(&self, assessment: AssessmentType) -> Option<u32> {
        match assessment {
            AssessmentType::Who5 => self.who5,
            AssessmentType::Gad7 => self.gad7,
            AssessmentType::Phq9 => self.phq9,
        }
    }

    pub fn set(&mut self, assessment: AssessmentType, score: u32) {
        let slot = match assessment {
            AssessmentType::Who5 => &mut self.who5,
            AssessmentType::Gad7 => &mut self.gad7,
            AssessmentType::Phq9 => &mut self.phq9,
        };
        *slot = Some(score);
    }

    pub fn is_empty(&self) -> bool {
        self.who5.is_none() && self.gad7.is_none() && self.phq9.is_none()
    }

    /// Iterate over the scores that are present, in flow order.
    pub fn iter(&self) -> impl Iterator<Item = (AssessmentType, u32)> + '_ {
        AssessmentType::FLOW
            .into_iter()
            .filter_map(|t| self.get(t).map(|score| (t, score)))
    }
}

/// One historical record: the scores of a finished session plus the AI
/// analysis that was produced for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CompletedAssessmentSet {
    pub date: jiff::Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub who5_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub gad7_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub phq9_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub ai_feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub ai_recommendations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub requires_consultation: Option<bool>,
}

impl CompletedAssessmentSet {
    pub fn score(&self, assessment: AssessmentType) -> Option<u32> {
        match assessment {
            AssessmentType::Who5 => self.who5_score,
            AssessmentType::Gad7 => self.gad7_score,
            AssessmentType::Phq9 => self.phq9_score,
        }
    }

    pub fn scores(&self) -> CurrentScores {
        CurrentScores {
            who5: self.who5_score,
            gad7: self.gad7_score,
            phq9: self.phq9_score,
        }
    }

    /// True when all three scores equal `scores`, missing included.
    pub fn matches(&self, scores: &CurrentScores) -> bool {
        self.scores() == *scores
    }
}

/// Pick the most recent set by `date`.
pub fn latest(sets: &[CompletedAssessmentSet]) -> Option<&CompletedAssessmentSet> {
    sets.iter().max_by_key(|s| s.date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_at(secs: i64, who5: u32) -> CompletedAssessmentSet {
        CompletedAssessmentSet {
            date: jiff::Timestamp::from_second(secs).unwrap(),
            who5_score: Some(who5),
            gad7_score: None,
            phq9_score: None,
            ai_feedback: None,
            ai_recommendations: None,
            requires_consultation: None,
        }
    }

    #[test]
    fn assessment_type_round_trips_through_str() {
        for t in AssessmentType::FLOW {
            assert_eq!(t.id().parse::<AssessmentType>().unwrap(), t);
        }
        assert!("bdi".parse::<AssessmentType>().is_err());
    }

    #[test]
    fn assessment_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AssessmentType::Gad7).unwrap(), "\"gad7\"");
    }

    #[test]
    fn current_scores_skip_missing_fields() {
        let mut scores = CurrentScores::default();
        assert!(scores.is_empty());
        scores.set(AssessmentType::Phq9, 12);
        assert_eq!(serde_json::to_string(&scores).unwrap(), r#"{"phq9":12}"#);
        assert_eq!(scores.iter().collect::<Vec<_>>(), vec![(AssessmentType::Phq9, 12)]);
    }

    #[test]
    fn completed_set_reads_camel_case_blob() {
        let json = r#"{
            "date": "2025-03-01T10:00:00Z",
            "who5Score": 48,
            "gad7Score": 11,
            "phq9Score": 7,
            "aiFeedback": "ok",
            "requiresConsultation": true
        }"#;
        let set: CompletedAssessmentSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.score(AssessmentType::Gad7), Some(11));
        assert_eq!(set.ai_recommendations, None);
        assert_eq!(set.requires_consultation, Some(true));
    }

    #[test]
    fn latest_picks_greatest_date_regardless_of_order() {
        let sets = vec![set_at(300, 3), set_at(100, 1), set_at(200, 2)];
        assert_eq!(latest(&sets).unwrap().who5_score, Some(3));
        assert!(latest(&[]).is_none());
    }
}
