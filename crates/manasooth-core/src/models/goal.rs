use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::assessment::AssessmentType;
use crate::error::CoreError;

/// How the target of a goal is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GoalDefinitionType {
    /// `target_value` is an absolute score to reach.
    ReachSpecificScore,
    /// `target_value` is the number of points to improve by, in the
    /// questionnaire's "better" direction.
    ImproveCurrentScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GoalStatus {
    Active,
    Achieved,
    Missed,
    Archived,
}

impl GoalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Achieved => "achieved",
            GoalStatus::Missed => "missed",
            GoalStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(GoalStatus::Active),
            "achieved" => Ok(GoalStatus::Achieved),
            "missed" => Ok(GoalStatus::Missed),
            "archived" => Ok(GoalStatus::Archived),
            other => Err(CoreError::InvalidGoalStatus(other.to_string())),
        }
    }
}

/// A user-defined target tied to one questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserGoal {
    pub id: Uuid,
    pub assessment_type: AssessmentType,
    pub goal_definition_type: GoalDefinitionType,
    pub target_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub target_date: Option<jiff::Timestamp>,
    pub start_date: jiff::Timestamp,
    pub status: GoalStatus,
    pub start_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub current_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub description: Option<String>,
}

impl UserGoal {
    pub fn is_active(&self) -> bool {
        self.status == GoalStatus::Active
    }

    /// Active with a target date that has already passed.
    pub fn is_overdue(&self, now: jiff::Timestamp) -> bool {
        self.is_active() && self.target_date.is_some_and(|d| d < now)
    }
}
